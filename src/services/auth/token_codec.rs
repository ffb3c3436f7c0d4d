use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AccessTokenKey;
use crate::services::auth::directory::UserRecord;

/// Access token (JWT) claims.
///
/// `sub` is the username. `iat` is optional on the wire but a token without it
/// is rejected for users whose credentials changed after account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token rejected: {0}")]
    Rejected(jsonwebtoken::errors::Error),
    #[error("invalid access token key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Malformed,
            _ => Self::Rejected(e),
        }
    }
}

/// Decodes bearer tokens and checks them against the account they name.
pub trait TokenCodec: Send + Sync {
    /// Verify signature, structure and expiry, then return the claims.
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;

    /// Second check once the subject has been resolved to a user record.
    fn token_matches_user(&self, claims: &Claims, user: &UserRecord) -> bool;
}

/// jsonwebtoken-backed codec (HS512 secret or EdDSA public key).
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtTokenCodec {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtTokenCodec {
    pub fn new(
        key: &AccessTokenKey,
        issuer: Option<&str>,
        leeway_seconds: u64,
    ) -> Result<Self, TokenError> {
        let (decoding_key, algorithm) = match key {
            AccessTokenKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS512)
            }
            AccessTokenKey::EdPublicPem(pem) => (
                DecodingKey::from_ed_pem(pem.as_bytes()).map_err(TokenError::InvalidKey)?,
                Algorithm::EdDSA,
            ),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_seconds;
        match issuer {
            // `set_issuer` alone only checks `iss` when the token carries one.
            Some(iss) => {
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
                validation.set_issuer(&[iss]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    fn matches_at(&self, claims: &Claims, user: &UserRecord, now: i64) -> bool {
        if claims.sub != user.username || !user.enabled {
            return false;
        }
        // Same boundary as jsonwebtoken: expired only once `exp + leeway` is in the past.
        if claims.exp.saturating_add(self.validation.leeway as i64) < now {
            return false;
        }

        // Password change invalidates every token issued before it.
        match user.credentials_changed_at {
            Some(changed_at) => claims.iat.is_some_and(|iat| iat >= changed_at.timestamp()),
            None => true,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::Malformed);
        }

        Ok(data.claims)
    }

    fn token_matches_user(&self, claims: &Claims, user: &UserRecord) -> bool {
        self.matches_at(claims, user, chrono::Utc::now().timestamp())
    }
}
