use auth::EncodingError;
use auth::PasswordError;
use auth::RoleError;
use auth::ValidationError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlainPasswordError {
    #[error("Password must not be empty")]
    Empty,
}

/// Top-level error for sign-in, sign-up and token authentication
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PlainPasswordError),

    // Domain-level errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User is disabled: {0}")]
    UserDisabled(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("{0}")]
    Token(#[from] ValidationError),

    // Infrastructure errors
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] PasswordError),

    #[error("Token generation failed: {0}")]
    TokenEncoding(#[from] EncodingError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
