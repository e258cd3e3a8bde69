pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::TokenClaims;
pub use errors::EncodingError;
pub use errors::TokenConfigError;
pub use errors::ValidationError;
pub use handler::JwtHandler;
