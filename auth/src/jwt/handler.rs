use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::EncodingError;
use super::errors::TokenConfigError;
use super::errors::ValidationError;

/// JWT token handler for signing and verifying compact tokens.
///
/// Generic over the claims type. Tokens are signed with HS512 and only
/// HS512 tokens are accepted. Time-based claims are not checked here;
/// expiry is decided by the caller against its own clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Errors
    /// * `EmptySigningKey` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 512 bits (64 bytes) for HS512
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, TokenConfigError> {
        if secret.is_empty() {
            return Err(TokenConfigError::EmptySigningKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingError` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, EncodingError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key).map_err(|e| EncodingError(e.to_string()))
    }

    /// Decode a JWT token, verifying its structure, algorithm and signature.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three segments, bad encoding or unparsable claims
    /// * `UnsupportedToken` - Header names an algorithm other than HS512
    /// * `InvalidSignature` - Signature does not match the signing key
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, ValidationError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(ValidationError::MalformedToken);
        }

        if !self.accepts_algorithm_of(segments[0])? {
            return Err(ValidationError::UnsupportedToken);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        let token_data = decode::<T>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Read `alg` from an encoded header segment and compare it to ours.
    ///
    /// A header that is not a base64url JSON object is malformed; a missing,
    /// non-string or unknown `alg` is simply not accepted.
    fn accepts_algorithm_of(&self, header_segment: &str) -> Result<bool, ValidationError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|_| ValidationError::MalformedToken)?;
        let header: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| ValidationError::MalformedToken)?;

        let header = header
            .as_object()
            .ok_or(ValidationError::MalformedToken)?;

        Ok(header
            .get("alg")
            .and_then(serde_json::Value::as_str)
            .and_then(|alg| alg.parse::<Algorithm>().ok())
            .is_some_and(|alg| alg == self.algorithm))
    }
}
