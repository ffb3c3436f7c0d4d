//! Test doubles and token helpers shared by auth tests.

use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::config::AccessTokenKey;
use crate::repos::error::RepoError;
use crate::services::auth::directory::{DirectoryError, UserDirectory, UserRecord};
use crate::services::auth::token_codec::{Claims, JwtTokenCodec};

pub const SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn codec() -> JwtTokenCodec {
    JwtTokenCodec::new(&AccessTokenKey::Secret(SECRET.to_string()), None, 0).unwrap()
}

/// Claims issued now, expiring `ttl_seconds` from now (negative = already expired).
pub fn claims_for(sub: &str, ttl_seconds: i64) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: sub.to_string(),
        exp: now + ttl_seconds,
        iat: Some(now),
        iss: None,
    }
}

pub fn mint(claims: &Claims) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS512),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn user(username: &str, roles: &[&str]) -> UserRecord {
    UserRecord {
        id: 1,
        username: username.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        enabled: true,
        credentials_changed_at: None,
    }
}

#[derive(Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, UserRecord>,
}

impl InMemoryDirectory {
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.username.clone(), u))
                .collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn load_by_username(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.users.get(username).cloned())
    }
}

pub struct FailingDirectory;

#[async_trait]
impl UserDirectory for FailingDirectory {
    async fn load_by_username(&self, _username: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut).into())
    }
}
