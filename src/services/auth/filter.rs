//! Bearer authentication: `Authorization` header → verified identity in the RequestContext.
//!
//! Every failure is swallowed here and turned into "no identity". Rejecting
//! unauthenticated requests is the job of the extractor/handler (authorization).

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::v1::extractors::{AuthCtx, AuthDetails, RequestContext};
use crate::services::auth::directory::{DirectoryError, UserDirectory};
use crate::services::auth::fingerprint::token_fingerprint;
use crate::services::auth::token_codec::{TokenCodec, TokenError};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("missing or malformed authorization header")]
    MissingOrMalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("user not found")]
    UserNotFound,
    #[error("token does not match current user state")]
    TokenUserMismatch,
    #[error(transparent)]
    DirectoryUnavailable(#[from] DirectoryError),
}

#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated,
    /// An earlier stage already set the identity; left untouched.
    AlreadyAuthenticated,
    Unauthenticated(AuthFailure),
}

pub struct AuthenticationFilter {
    codec: Arc<dyn TokenCodec>,
    directory: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for AuthenticationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationFilter").finish_non_exhaustive()
    }
}

impl AuthenticationFilter {
    pub fn new(codec: Arc<dyn TokenCodec>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { codec, directory }
    }

    /// Try to establish an identity on `ctx`. Never fails; the outcome is
    /// returned for logging and tests only.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
        ctx: &mut RequestContext,
        details: AuthDetails,
    ) -> AuthOutcome {
        if ctx.is_authenticated() {
            debug!("identity already present; skipping bearer authentication");
            return AuthOutcome::AlreadyAuthenticated;
        }

        let Some(token) = authorization.and_then(|v| v.strip_prefix(BEARER_PREFIX)) else {
            debug!("no bearer token on request");
            return AuthOutcome::Unauthenticated(AuthFailure::MissingOrMalformedHeader);
        };

        match self.resolve(token, details).await {
            Ok(identity) => {
                debug!(
                    subject = %identity.subject,
                    roles = ?identity.roles,
                    remote_addr = ?identity.details.remote_addr,
                    request_id = ?identity.details.request_id,
                    session_id = ?identity.details.session_id,
                    "bearer authentication succeeded"
                );
                ctx.authenticate(identity);
                AuthOutcome::Authenticated
            }
            Err(failure) => {
                warn!(
                    token = %token_fingerprint(token),
                    error = %failure,
                    "bearer authentication failed; continuing unauthenticated"
                );
                AuthOutcome::Unauthenticated(failure)
            }
        }
    }

    async fn resolve(&self, token: &str, details: AuthDetails) -> Result<AuthCtx, AuthFailure> {
        let claims = self.codec.decode(token)?;

        let user = self
            .directory
            .load_by_username(&claims.sub)
            .await?
            .ok_or(AuthFailure::UserNotFound)?;

        if !self.codec.token_matches_user(&claims, &user) {
            return Err(AuthFailure::TokenUserMismatch);
        }

        Ok(AuthCtx {
            user_id: user.id,
            subject: user.username,
            roles: user.roles,
            details,
        })
    }
}
