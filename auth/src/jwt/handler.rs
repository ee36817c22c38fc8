use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// Issuer tag stamped into every access token.
pub const DEFAULT_ISSUER: &str = "chirpy-access";

/// Access token codec.
///
/// Issues and validates HS256-signed JWTs binding a user identifier to an
/// expiry. Validation is a purely local computation: there is no store and
/// therefore no early revocation, which is why lifetimes are kept short.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Override the issuer tag used when issuing and expected when validating.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Issue an access token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    /// Issue an access token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: Uuid,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_subject(&self.issuer, subject, now, ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `BadSignature` - Signature does not verify under this handler's secret
    /// * `Malformed` - Token does not parse into the expected claims
    /// * `WrongIssuer` - Issuer tag differs from this handler's
    /// * `Expired` - Current time is at or past the encoded expiry
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate an access token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.iss != self.issuer {
            return Err(JwtError::WrongIssuer);
        }

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        claims
            .subject()
            .map_err(|e| JwtError::Malformed(format!("invalid subject: {}", e)))
    }

    /// Verify the signature and deserialize the claims.
    ///
    /// Expiry and issuer are checked by `validate_at` against an explicit
    /// clock, so the library's own time checks are disabled here.
    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::BadSignature
                }
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
