use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::EncodingError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenConfigError;
use crate::jwt::ValidationError;
use crate::principal::Principal;
use crate::principal::Role;

/// Issues and validates time-bounded session tokens for principals.
///
/// Holds no mutable state: the signing key and validity are fixed at
/// construction, so one issuer can be shared across tasks behind an `Arc`.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    validity_secs: i64,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer reading wall-clock time.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing key
    /// * `validity` - How long generated tokens stay valid
    ///
    /// # Errors
    /// * `EmptySigningKey` - The secret is empty
    /// * `ValidityOutOfRange` - The validity does not fit a Unix timestamp offset
    pub fn new(secret: &[u8], validity: Duration) -> Result<Self, TokenConfigError> {
        Self::with_clock(secret, validity, Arc::new(SystemClock))
    }

    /// Create an issuer driven by the given clock.
    pub fn with_clock(
        secret: &[u8],
        validity: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenConfigError> {
        let validity_secs = i64::try_from(validity.as_secs())
            .map_err(|_| TokenConfigError::ValidityOutOfRange(validity.as_secs()))?;

        Ok(Self {
            jwt_handler: JwtHandler::new(secret)?,
            validity_secs,
            clock,
        })
    }

    /// Validity of generated tokens.
    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_secs as u64)
    }

    /// Generate a signed token for `principal`, valid from now for the
    /// configured duration.
    ///
    /// # Errors
    /// * `EncodingError` - Signing failed
    pub fn generate(&self, principal: &Principal) -> Result<String, EncodingError> {
        let claims = TokenClaims::new(
            principal.username(),
            principal.roles().iter().map(|r| r.as_str().to_string()),
            self.clock.now(),
            self.validity_secs,
        );

        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and recover the principal it was issued for.
    ///
    /// # Errors
    /// * `MalformedToken` - Bad structure, missing claims, empty subject or invalid role
    /// * `UnsupportedToken` - Signed with an algorithm other than HS512
    /// * `InvalidSignature` - Tampered or signed with another key
    /// * `ExpiredToken` - The validity window has passed
    pub fn validate(&self, token: &str) -> Result<Principal, ValidationError> {
        let claims: TokenClaims = self.jwt_handler.decode(token)?;
        let expired = claims.is_expired_at(self.clock.now());

        let roles = claims
            .roles
            .into_iter()
            .map(Role::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|_| ValidationError::MalformedToken)?;
        let principal =
            Principal::new(claims.sub, roles).map_err(|_| ValidationError::MalformedToken)?;

        // Payload errors take precedence over expiry
        if expired {
            return Err(ValidationError::ExpiredToken);
        }

        Ok(principal)
    }
}
