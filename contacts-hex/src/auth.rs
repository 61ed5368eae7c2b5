//! Bearer token issuance and validation.
//!
//! Tokens are HS256 JWTs with the user's email as `sub` and the user id in
//! a `uid` claim. The same claims drive authentication and rate-limit keying.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use contacts_types::{AppError, UserId};

/// JWT claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user
    pub sub: String,
    /// User id (UUID)
    pub uid: String,
    /// Expiry, seconds since epoch
    pub exp: usize,
}

/// The authenticated identity attached to each request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = uuid::Error;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.uid.parse()?,
            email: claims.sub,
        })
    }
}

/// HS256 signing and verification keys plus the token lifetime.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Seconds a freshly issued token stays valid.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Mints a token for the given identity.
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, AppError> {
        let exp = (chrono::Utc::now() + chrono::Duration::seconds(self.ttl_secs as i64))
            .timestamp() as usize;

        let claims = Claims {
            sub: email.to_string(),
            uid: user_id.to_string(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token and returns the identity it carries.
    pub fn verify(&self, token: &str) -> Result<CurrentUser, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AppError::Unauthorized("Could not validate credentials".into()))?;

        CurrentUser::try_from(data.claims)
            .map_err(|_| AppError::Unauthorized("Could not validate credentials".into()))
    }
}
