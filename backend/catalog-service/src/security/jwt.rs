//! JWT token issuance and validation.
//!
//! The codec is constructed once from the signing secret and the token
//! validity window, then shared read-only across workers. Rotating the secret
//! invalidates every previously issued token; there is no revocation list.
//!
//! Callers supply the clock. Expiry is enforced here rather than by the JWT
//! library, so `now >= exp` is rejected exactly at the boundary and tests can
//! run against a fixed instant.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::security::identity::Identity;

/// Claims carried inside every issued token.
///
/// The roles in the token are the sole source of truth for authorization;
/// validation never goes back to the user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role names granted at issuance
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp, whole seconds)
    pub iat: i64,
    /// Expiration time (Unix timestamp, whole seconds)
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token could not be encoded")]
    Encoding,
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Stateless HS256 codec between an [`Identity`] and a compact token string.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            validity,
        }
    }

    /// The validity window applied to issued tokens.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a signed token for `identity`, valid from `now` until
    /// `now + validity`.
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        if identity.username.is_empty() {
            return Err(TokenError::Encoding);
        }

        let claims = Claims {
            sub: identity.username.clone(),
            roles: identity.roles.clone(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Encoding)
    }

    /// Validate `token` as of `now` and rebuild the identity it carries.
    ///
    /// A token whose `exp` equals `now` is already expired: success requires
    /// strictly `now < exp`.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(Identity::new(data.claims.sub, data.claims.roles))
    }
}
