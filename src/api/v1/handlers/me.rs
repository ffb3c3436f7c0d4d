/*
 * Responsibility
 * - GET /me: 現在の identity を返す (未認証なら extractor が 401)
 */
use axum::Json;

use crate::api::v1::{dto::identity::IdentityResponse, extractors::AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<IdentityResponse> {
    Json(ctx.into())
}
