use std::collections::BTreeSet;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Every field is required: a token missing any of them fails to
/// deserialize and is rejected as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,

    /// Role names granted to the subject
    pub roles: BTreeSet<String>,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Create claims for a subject valid from `issued_at` for `validity_secs`.
    pub fn new(
        sub: impl ToString,
        roles: impl IntoIterator<Item = String>,
        issued_at: DateTime<Utc>,
        validity_secs: i64,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: sub.to_string(),
            roles: roles.into_iter().collect(),
            iat,
            exp: iat.saturating_add(validity_secs),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Check if the token is expired at `now`.
    ///
    /// The validity window is `[iat, exp)`: a token whose `exp` equals the
    /// current second is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_claims() {
        let claims = TokenClaims::new(
            "alice",
            vec!["USER".to_string(), "ADMIN".to_string()],
            at(1_000),
            3_600,
        );

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 4_600);
        assert_eq!(
            claims.roles.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["ADMIN", "USER"]
        );
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_claims_gets_its_own_id() {
        let a = TokenClaims::new("alice", Vec::new(), at(1_000), 60);
        let b = TokenClaims::new("alice", Vec::new(), at(1_000), 60);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_is_expired_at() {
        let claims = TokenClaims::new("alice", Vec::new(), at(1_000), 60);

        assert!(!claims.is_expired_at(at(1_000)));
        assert!(!claims.is_expired_at(at(1_059)));
        assert!(!claims.is_expired_at(at(1_059) + Duration::milliseconds(999)));
        assert!(claims.is_expired_at(at(1_060))); // Exactly at expiration
        assert!(claims.is_expired_at(at(1_061)));
    }

    #[test]
    fn test_zero_validity_is_born_expired() {
        let claims = TokenClaims::new("alice", Vec::new(), at(1_000), 0);
        assert!(claims.is_expired_at(at(1_000)));
    }

    #[test]
    fn test_missing_claim_fails_to_deserialize() {
        let json = r#"{"sub":"alice","iat":1,"exp":2,"jti":"x"}"#;
        assert!(serde_json::from_str::<TokenClaims>(json).is_err());
    }
}
