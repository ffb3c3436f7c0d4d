/// Factory: build `AuthenticationFilter` from application `Config`.
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::repos::user_repo::UserRepo;
use crate::services::auth::{
    AuthenticationFilter, directory::PgUserDirectory, token_codec::JwtTokenCodec,
    token_codec::TokenError,
};

pub fn build_authentication_filter(
    config: &Config,
    db: PgPool,
) -> Result<Arc<AuthenticationFilter>, TokenError> {
    let codec = JwtTokenCodec::new(
        &config.access_token_key,
        config.auth_issuer.as_deref(),
        config.access_token_leeway_seconds,
    )?;

    let directory = PgUserDirectory::new(UserRepo::new(db));

    Ok(Arc::new(AuthenticationFilter::new(
        Arc::new(codec),
        Arc::new(directory),
    )))
}
