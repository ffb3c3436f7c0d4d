/*
 * Responsibility
 * - users / users_roles テーブル向け SQLx 操作 (読み取りのみ)
 * - 認証フィルタが必要とする「username → ユーザー + ロール」の解決
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, FromRow)]
pub struct UserAuthRow {
    pub id: i64,
    pub username: String,
    pub enabled: bool,
    pub credentials_changed_at: Option<DateTime<Utc>>,
    // array_agg over a LEFT JOIN; users without roles come back as an empty array
    pub roles: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserAuthRow>> {
        let row = sqlx::query_as::<_, UserAuthRow>(
            r#"
            SELECT
                u.id,
                u.username,
                u.enabled,
                u.credentials_changed_at,
                COALESCE(
                    array_agg(r.role ORDER BY r.role) FILTER (WHERE r.role IS NOT NULL),
                    ARRAY[]::TEXT[]
                ) AS roles
            FROM users u
            LEFT JOIN users_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            WHERE u.username = $1
            GROUP BY u.id
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
