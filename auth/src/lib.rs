//! Session token and credential primitives
//!
//! Provides the building blocks of the authentication service:
//! - Principals and validated role names
//! - HS512 session tokens with a bounded validity window
//! - Password hashing (Argon2id)
//!
//! Storage and transport are left to the service; this crate does no I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::Argon2Hasher;
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::{Principal, Role, TokenIssuer, ValidationError};
//!
//! let issuer = TokenIssuer::new(
//!     b"secret_key_at_least_64_bytes_long_for_the_hs512_signature_scheme",
//!     Duration::from_secs(3600),
//! )
//! .unwrap();
//!
//! let alice = Principal::new("alice", [Role::new("ADMIN").unwrap()]).unwrap();
//! let token = issuer.generate(&alice).unwrap();
//! assert_eq!(issuer.validate(&token), Ok(alice));
//! assert_eq!(issuer.validate("garbage"), Err(ValidationError::MalformedToken));
//! ```

pub mod clock;
pub mod issuer;
pub mod jwt;
pub mod password;
pub mod principal;

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use issuer::TokenIssuer;
pub use jwt::EncodingError;
pub use jwt::TokenConfigError;
pub use jwt::ValidationError;
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use principal::Principal;
pub use principal::PrincipalError;
pub use principal::Role;
pub use principal::RoleError;
