//! Bearer token 検証 → RequestContext を extensions に入れる
//!
//! - 失敗しても 401 は返さない。identity 無しのまま次へ流す
//! - 401/403 は extractor (AuthCtxExtractor / AuthCtx::require_role) 側の責務

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{AuthDetails, RequestContext};
use crate::middleware::http::REQUEST_ID_HEADER;
use crate::services::auth::AuthOutcome;
use crate::state::AppState;

const SESSION_COOKIE: &str = "session_id";

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let details = request_details(req.headers(), remote_addr);

    // An earlier stage may already have attached a context.
    let mut ctx = req
        .extensions_mut()
        .remove::<RequestContext>()
        .unwrap_or_else(RequestContext::new);

    let outcome = state
        .auth
        .authenticate(authorization.as_deref(), &mut ctx, details)
        .await;
    if let AuthOutcome::Unauthenticated(reason) = &outcome {
        tracing::trace!(%reason, "continuing without identity");
    }

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

fn request_details(headers: &HeaderMap, remote_addr: Option<SocketAddr>) -> AuthDetails {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let session_id = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    AuthDetails {
        remote_addr,
        request_id,
        session_id,
    }
}
