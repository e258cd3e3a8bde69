use thiserror::Error;

/// Reasons a presented token is rejected.
///
/// Closed set: every validation failure is one of these, so callers
/// handle each case explicitly.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed JWT token")]
    MalformedToken,

    #[error("Invalid JWT signature")]
    InvalidSignature,

    #[error("Expired JWT token")]
    ExpiredToken,

    #[error("Unsupported JWT token")]
    UnsupportedToken,
}

/// Error raised while signing a token.
#[derive(Debug, Clone, Error)]
#[error("Failed to encode token: {0}")]
pub struct EncodingError(pub String);

/// Invalid token configuration detected when building a handler or issuer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("JWT signing key is empty")]
    EmptySigningKey,

    #[error("Token validity of {0} seconds is out of range")]
    ValidityOutOfRange(u64),
}

impl From<jsonwebtoken::errors::Error> for ValidationError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => ValidationError::InvalidSignature,
            ErrorKind::ExpiredSignature => ValidationError::ExpiredToken,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => ValidationError::UnsupportedToken,
            _ => ValidationError::MalformedToken,
        }
    }
}
