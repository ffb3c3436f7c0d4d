/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - bearer 認証 middleware は v1 全体に掛ける (失敗しても素通し)
 * - 認可は handler 側 (AuthCtxExtractor / require_role)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{admin, health::health, me::me};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .route("/admin/ping", get(admin::ping));

    middleware::auth::access::apply(router, state)
}
