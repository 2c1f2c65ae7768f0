use std::env;
use std::path::PathBuf;

use uuid::Uuid;

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub jwt_secret: String,
    /// Snapshot file for the object store. `None` keeps data in memory only.
    pub data_file: Option<PathBuf>,
    pub bcrypt_cost: u32,
    pub token_ttl_secs: i64,
}

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60 * 12;

impl ApiConfig {
    pub fn from_env() -> Self {
        let bind = env::var("SAFECARE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        let jwt_secret = env::var("SAFECARE_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SAFECARE_JWT_SECRET not set; generated a random secret, tokens will not survive a restart");
            format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
        });

        let data_file = env::var("SAFECARE_DATA_FILE").ok().map(PathBuf::from);
        if data_file.is_none() {
            tracing::warn!("SAFECARE_DATA_FILE not set; submissions are kept in memory only");
        }

        Self {
            bind,
            jwt_secret,
            data_file,
            bcrypt_cost: parse_var("SAFECARE_BCRYPT_COST", safecare_auth::password::DEFAULT_COST),
            token_ttl_secs: parse_var("SAFECARE_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Settings for tests and local tooling: in-memory store, fixed secret,
    /// cheapest hashing cost.
    pub fn for_tests() -> Self {
        Self {
            bind: "127.0.0.1:0".to_string(),
            jwt_secret: "test-secret".to_string(),
            data_file: None,
            bcrypt_cost: 4,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

fn parse_var<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, default = %default, "unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}
