/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthenticationFilter (token codec + user directory を内包)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthenticationFilter;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthenticationFilter>,
}

impl AppState {
    pub fn new(auth: Arc<AuthenticationFilter>) -> Self {
        Self { auth }
    }
}
