use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::{AuthCtx, RequestContext};

/// Handler で AuthCtx を受け取るための extractor (= 認可段)
///
/// - RequestContext が無い: 認証 middleware 未設定 → 500
/// - RequestContext はあるが identity 無し: 未認証 → 401
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(ctx) = parts.extensions.get::<RequestContext>() else {
            tracing::error!("request context missing; is the access middleware applied?");
            return Err(AppError::Internal);
        };

        ctx.identity()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
