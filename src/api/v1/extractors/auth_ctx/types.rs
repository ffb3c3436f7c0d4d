/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions の RequestContext に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - roles は token ではなく user directory 由来
 */
use std::net::SocketAddr;

use crate::error::AppError;

/// Request-derived metadata recorded alongside an identity for audit logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthDetails {
    pub remote_addr: Option<SocketAddr>,
    pub request_id: Option<String>,
    pub session_id: Option<String>,
}

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID
/// - `subject` は token の `sub` (= username)
/// - `roles` は coarse-grained な権限情報
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: i64,
    pub subject: String,
    pub roles: Vec<String>,
    pub details: AuthDetails,
}

impl AuthCtx {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Authorization check for handlers: 403 when the role is absent.
    pub fn require_role(&self, role: &str) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            tracing::warn!(subject = %self.subject, required = role, "missing role");
            Err(AppError::Forbidden)
        }
    }
}

/// Per-request slot for the authenticated identity.
///
/// Starts unauthenticated; once an identity is set it is never replaced
/// for the rest of the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<AuthCtx>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&AuthCtx> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns `false` (and keeps the existing identity) if already authenticated.
    pub fn authenticate(&mut self, identity: AuthCtx) -> bool {
        if self.identity.is_some() {
            return false;
        }
        self.identity = Some(identity);
        true
    }
}
