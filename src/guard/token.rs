//! Signed-token verification against the shared HMAC secret.

use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Claim names that may carry the subject, in lookup order.
const SUBJECT_CLAIMS: [&str; 3] = ["sub", "id", "userId"];

#[derive(Debug, Error)]
pub enum Error {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    Immature,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("unsupported algorithm")]
    UnsupportedAlg,
    #[error("missing required claim: {0}")]
    MissingClaim(String),
    #[error("malformed token")]
    Malformed(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::Immature,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => Self::UnsupportedAlg,
            ErrorKind::MissingRequiredClaim(claim) => Self::MissingClaim(claim.clone()),
            _ => Self::Malformed(err),
        }
    }
}

/// Verified token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "numeric_date")]
    pub exp: i64,
    #[serde(
        default,
        deserialize_with = "optional_numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Subject identifier, taken from `sub`, then `id`, then `userId`.
    #[must_use]
    pub fn subject(&self) -> Option<String> {
        SUBJECT_CLAIMS
            .iter()
            .find_map(|name| match self.extra.get(*name)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

// NumericDate may be fractional; whole seconds are kept.
#[allow(clippy::cast_possible_truncation)]
fn whole_seconds(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|seconds| seconds.is_finite())
            .map(|seconds| seconds.trunc() as i64)
    })
}

fn numeric_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    whole_seconds(&number)
        .ok_or_else(|| de::Error::custom(format!("invalid NumericDate: {number}")))
}

fn optional_numeric_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<Number>::deserialize(deserializer)?
        .map(|number| {
            whole_seconds(&number)
                .ok_or_else(|| de::Error::custom(format!("invalid NumericDate: {number}")))
        })
        .transpose()
}

/// HS256/HS384/HS512 verifier. Built without a secret, it rejects every token.
pub struct Verifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl Verifier {
    /// An absent or empty secret leaves the verifier unconfigured.
    #[must_use]
    pub fn new(secret: Option<&SecretString>) -> Self {
        let key = secret
            .map(|secret| secret.expose_secret())
            .filter(|secret| !secret.is_empty())
            .map(|secret| DecodingKey::from_secret(secret.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        Self { key, validation }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSecret`] when no secret was configured, otherwise
    /// the reason the token failed decoding, signature or time validation.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        let key = self.key.as_ref().ok_or(Error::MissingSecret)?;
        let data = jsonwebtoken::decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("key", &self.key.as_ref().map(|_| "***"))
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}
