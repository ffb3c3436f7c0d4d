/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, CORS 許可, access token 検証鍵など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Key material used to verify access-token signatures.
///
/// Key bytes are not printable via Debug.
#[derive(Clone)]
pub enum AccessTokenKey {
    /// HS512 shared secret.
    Secret(String),
    /// Ed25519 public key, PEM encoded.
    EdPublicPem(String),
}

impl fmt::Debug for AccessTokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(_) => f.write_str("Secret(..)"),
            Self::EdPublicPem(_) => f.write_str("EdPublicPem(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub http_timeout_seconds: u64,
    pub http_body_limit_bytes: usize,

    pub auth_issuer: Option<String>,
    pub access_token_key: AccessTokenKey,
    pub access_token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            Err(_) => 5,
        };

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let http_timeout_seconds = std::env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(30);

        let http_body_limit_bytes = std::env::var("HTTP_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let auth_issuer = std::env::var("AUTH_ISSUER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let access_token_key = access_token_key_from_env()?;

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            http_timeout_seconds,
            http_body_limit_bytes,
            auth_issuer,
            access_token_key,
            access_token_leeway_seconds,
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: "postgres://localhost/hobbie_test".to_string(),
            database_max_connections: 1,
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            http_timeout_seconds: 30,
            http_body_limit_bytes: 1024 * 1024,
            auth_issuer: None,
            access_token_key: AccessTokenKey::Secret("test".to_string()),
            access_token_leeway_seconds: 0,
        }
    }
}

// Public key wins when both are set.
fn access_token_key_from_env() -> Result<AccessTokenKey, ConfigError> {
    if let Ok(pem) = std::env::var("ACCESS_JWT_PUBLIC_KEY_PEM") {
        if pem.trim().is_empty() {
            return Err(ConfigError::Invalid("ACCESS_JWT_PUBLIC_KEY_PEM"));
        }
        return Ok(AccessTokenKey::EdPublicPem(pem.replace("\\n", "\n")));
    }

    let secret =
        std::env::var("ACCESS_JWT_SECRET").map_err(|_| ConfigError::Missing("ACCESS_JWT_SECRET"))?;
    if secret.is_empty() {
        return Err(ConfigError::Invalid("ACCESS_JWT_SECRET"));
    }
    Ok(AccessTokenKey::Secret(secret))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_env_accepts_short_production_alias() {
        assert_eq!(AppEnv::parse("prod"), AppEnv::Production);
        assert_eq!(AppEnv::parse(" Production "), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
    }

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        let origins = parse_origins(" https://a.example , ,https://b.example,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn access_token_key_debug_hides_material() {
        let key = AccessTokenKey::Secret("super-secret".to_string());
        assert_eq!(format!("{:?}", key), "Secret(..)");
    }
}
