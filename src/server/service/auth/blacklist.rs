//! Revocation list for bearer tokens.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use fred::prelude::*;
use fred::types::Expiration;
use tokio::sync::RwLock;

use crate::server::error::Error;

/// Key prefix for revoked tokens in Redis
pub static BLACKLIST_KEY_PREFIX: &str = "orrery:token:blacklist:";

#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// Marks a token as revoked for `ttl_seconds`.
    async fn revoke(&self, token: &str, ttl_seconds: i64) -> Result<(), Error>;

    /// Returns whether the token is currently revoked.
    async fn is_revoked(&self, token: &str) -> Result<bool, Error>;
}

/// Blacklist stored in Redis/Valkey, entries expire with the token
pub struct RedisTokenBlacklist {
    pool: Pool,
}

impl RedisTokenBlacklist {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn key(token: &str) -> String {
        format!("{}{}", BLACKLIST_KEY_PREFIX, token)
    }
}

#[async_trait]
impl TokenBlacklist for RedisTokenBlacklist {
    async fn revoke(&self, token: &str, ttl_seconds: i64) -> Result<(), Error> {
        self.pool
            .set::<(), _, _>(
                Self::key(token),
                "blacklisted",
                Some(Expiration::EX(ttl_seconds)),
                None,
                false,
            )
            .await?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, Error> {
        let count: i64 = self.pool.exists(Self::key(token)).await?;

        Ok(count > 0)
    }
}

/// In-process blacklist, keyed by token with the unix time it stops mattering
#[derive(Default)]
pub struct MemoryTokenBlacklist {
    entries: RwLock<HashMap<String, i64>>,
}

#[async_trait]
impl TokenBlacklist for MemoryTokenBlacklist {
    async fn revoke(&self, token: &str, ttl_seconds: i64) -> Result<(), Error> {
        let now = Utc::now().timestamp();
        let mut entries = self.entries.write().await;

        entries.retain(|_, expires_at| *expires_at > now);
        entries.insert(token.to_string(), now + ttl_seconds);

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, Error> {
        let now = Utc::now().timestamp();
        let entries = self.entries.read().await;

        Ok(entries
            .get(token)
            .is_some_and(|expires_at| *expires_at > now))
    }
}
