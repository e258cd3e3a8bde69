use std::sync::Arc;

use async_trait::async_trait;
use auth::Principal;
use auth::TokenIssuer;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialStore;
use crate::user::ports::PasswordVerifier;

/// Well-formed Argon2id hash (default cost) that matches no password.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<CS, PV>
where
    CS: CredentialStore,
    PV: PasswordVerifier,
{
    store: Arc<CS>,
    password_verifier: Arc<PV>,
    token_issuer: Arc<TokenIssuer>,
}

impl<CS, PV> AuthService<CS, PV>
where
    CS: CredentialStore,
    PV: PasswordVerifier,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `password_verifier` - Password hashing implementation
    /// * `token_issuer` - Session token issuer sharing the process signing key
    pub fn new(store: Arc<CS>, password_verifier: Arc<PV>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            password_verifier,
            token_issuer,
        }
    }
}

#[async_trait]
impl<CS, PV> AuthServicePort for AuthService<CS, PV>
where
    CS: CredentialStore,
    PV: PasswordVerifier,
{
    async fn sign_in(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.store.get_user(&username).await?,
            // A name that fails validation was never registered
            Err(_) => None,
        };

        let Some(user) = user else {
            // Unknown accounts cost one hash verification, like known ones
            let _ = self.password_verifier.verify(password, DUMMY_PASSWORD_HASH);
            tracing::warn!(username = ?username, "Rejected sign-in: unknown user");
            return Err(AuthError::UserNotFound(username.to_string()));
        };

        if !self.password_verifier.verify(password, &user.password_hash)? {
            tracing::warn!(username = %user.username, "Rejected sign-in: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.enabled {
            tracing::warn!(username = %user.username, "Rejected sign-in: user disabled");
            return Err(AuthError::UserDisabled(user.username.to_string()));
        }

        let roles = self.store.get_roles(&user.username).await?;
        let role_count = roles.len();
        let principal = Principal::new(user.username.as_str(), roles)
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let token = self.token_issuer.generate(&principal)?;

        tracing::info!(username = %user.username, roles = role_count, "User signed in");

        Ok(token)
    }

    async fn sign_up(&self, command: SignUpCommand) -> Result<(), AuthError> {
        if self.store.exists_user(&command.username).await? {
            return Err(AuthError::UserAlreadyExists(command.username.to_string()));
        }

        let password_hash = self.password_verifier.hash(command.password.expose())?;

        let user = NewUser {
            username: command.username,
            password_hash,
            roles: command.roles,
        };
        let username = user.username.clone();
        let role_count = user.roles.len();

        self.store.save_user(user).await?;

        tracing::info!(username = %username, roles = role_count, "User registered");

        Ok(())
    }

    fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError> {
        self.token_issuer.validate(token).map_err(|e| {
            tracing::warn!(reason = %e, "Rejected session token");
            AuthError::Token(e)
        })
    }
}
