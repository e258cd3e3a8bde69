use auth::Argon2Hasher;
use auth::PasswordError;

use crate::user::ports::PasswordVerifier;

/// Argon2id adapter for the password verification port.
#[derive(Clone, Default)]
pub struct Argon2PasswordVerifier {
    hasher: Argon2Hasher,
}

impl Argon2PasswordVerifier {
    pub fn new(hasher: Argon2Hasher) -> Self {
        Self { hasher }
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        self.hasher.verify(password, hash)
    }

    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_round_trip() {
        let verifier =
            Argon2PasswordVerifier::new(Argon2Hasher::with_params(1024, 1, 1).unwrap());

        let hash = verifier.hash("pass_word!").unwrap();
        assert!(verifier.verify("pass_word!", &hash).unwrap());
        assert!(!verifier.verify("pass_word?", &hash).unwrap());
    }
}
