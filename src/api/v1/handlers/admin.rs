/*
 * Responsibility
 * - ADMIN ロール限定の疎通確認 (401: 未認証 / 403: ロール不足)
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;

pub const ROLE_ADMIN: &str = "ADMIN";

pub async fn ping(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Result<Json<Value>, AppError> {
    ctx.require_role(ROLE_ADMIN)?;
    Ok(Json(json!({ "status": "ok", "subject": ctx.subject })))
}
