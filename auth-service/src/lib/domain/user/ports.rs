use std::collections::BTreeSet;

use async_trait::async_trait;
use auth::PasswordError;
use auth::Principal;
use auth::Role;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::models::Username;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `username` - Account name as submitted, not yet validated
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// Signed session token for the account's principal
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this username, or the name is not a valid username
    /// * `InvalidCredentials` - Password does not match
    /// * `UserDisabled` - Account exists but is disabled
    /// * `DatabaseError` - Store operation failed
    async fn sign_in(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username, password and roles
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username is already taken; nothing is written
    /// * `DatabaseError` - Store operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<(), AuthError>;

    /// Validate a session token and return its principal.
    ///
    /// # Errors
    /// * `Token` - The token is malformed, tampered, expired or unsupported
    fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Persistence operations for account credentials and role assignments.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Check whether an account with this username exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_user(&self, username: &Username) -> Result<bool, AuthError>;

    /// Retrieve account credentials by username.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Retrieve the roles assigned to an account.
    ///
    /// # Returns
    /// Role set, empty when the account has none or does not exist
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_roles(&self, username: &Username) -> Result<BTreeSet<Role>, AuthError>;

    /// Persist a new account together with its roles, atomically.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn save_user(&self, user: NewUser) -> Result<(), AuthError>;
}

/// One-way password hashing and verification.
pub trait PasswordVerifier: Send + Sync + 'static {
    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - The stored hash is unusable
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;

    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing failed
    fn hash(&self, password: &str) -> Result<String, PasswordError>;
}
