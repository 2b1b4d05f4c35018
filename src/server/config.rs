use std::path::PathBuf;

use crate::server::error::config::ConfigError;

pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub static DEFAULT_IMAGE_DIR: &str = "./images";
pub static DEFAULT_IMAGE_BASE_URL: &str = "/images";
pub const DEFAULT_JWT_TTL_SECONDS: i64 = 3600;

pub struct Config {
    pub database_url: String,
    /// Token blacklist backend; the in-process blacklist is used when unset
    pub valkey_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub bind_address: String,
    pub image_dir: PathBuf,
    pub image_base_url: String,
    /// Admin account created at startup when both are set
    pub admin_login: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };
        let optional = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let jwt_ttl_seconds = match optional("JWT_TTL_SECONDS") {
            Some(value) => {
                let ttl = value
                    .parse::<i64>()
                    .map_err(|e| ConfigError::InvalidEnvValue {
                        var: "JWT_TTL_SECONDS".to_string(),
                        reason: e.to_string(),
                    })?;

                if ttl <= 0 {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "JWT_TTL_SECONDS".to_string(),
                        reason: "must be greater than zero".to_string(),
                    });
                }

                ttl
            }
            None => DEFAULT_JWT_TTL_SECONDS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: optional("VALKEY_URL"),
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_seconds,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            image_dir: PathBuf::from(
                optional("IMAGE_DIR").unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string()),
            ),
            image_base_url: optional("IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            admin_login: optional("ADMIN_LOGIN"),
            admin_password: optional("ADMIN_PASSWORD"),
        })
    }
}
