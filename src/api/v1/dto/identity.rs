/*
 * Responsibility
 * - 認証済み identity の response DTO
 */
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub user_id: i64,
    pub subject: String,
    pub roles: Vec<String>,
}

impl From<AuthCtx> for IdentityResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            user_id: ctx.user_id,
            subject: ctx.subject,
            roles: ctx.roles,
        }
    }
}
