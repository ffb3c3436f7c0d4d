use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::repos::{error::RepoError, user_repo::UserAuthRow, user_repo::UserRepo};

/// Account state the authentication filter needs after decoding a token.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub roles: Vec<String>,
    pub enabled: bool,
    pub credentials_changed_at: Option<DateTime<Utc>>,
}

impl From<UserAuthRow> for UserRecord {
    fn from(row: UserAuthRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            roles: row.roles,
            enabled: row.enabled,
            credentials_changed_at: row.credentials_changed_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Repo(#[from] RepoError),
}

/// Username → user record lookup.
///
/// - `Ok(None)`: no such user
/// - `Err(_)`: backend failure
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn load_by_username(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError>;
}

#[derive(Clone, Debug)]
pub struct PgUserDirectory {
    repo: UserRepo,
}

impl PgUserDirectory {
    pub fn new(repo: UserRepo) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn load_by_username(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError> {
        let row = self.repo.find_by_username(username).await?;
        Ok(row.map(UserRecord::from))
    }
}
