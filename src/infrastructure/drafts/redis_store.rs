//! Redis-backed draft store.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

use crate::domain::draft::{DraftToken, RegistrationDraft};
use crate::domain::repositories::{DraftStore, DraftStoreError, DraftStoreResult};

/// Drafts serialized as JSON under `draft:<token>` with a Redis TTL.
///
/// Redis failures are returned to the caller, never swallowed.
pub struct RedisDraftStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisDraftStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> DraftStoreResult<Self> {
        info!("Connecting to Redis draft store");

        let client = Client::open(redis_url).map_err(|e| {
            DraftStoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            DraftStoreError::Unavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| DraftStoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "draft:".to_string(),
        })
    }

    fn build_key(&self, token: &DraftToken) -> String {
        format!("{}{}", self.key_prefix, token)
    }
}

#[async_trait]
impl DraftStore for RedisDraftStore {
    async fn save(
        &self,
        token: &DraftToken,
        draft: &RegistrationDraft,
        ttl: Duration,
    ) -> DraftStoreResult<()> {
        let key = self.build_key(token);
        let payload =
            serde_json::to_string(draft).map_err(|e| DraftStoreError::Corrupt(e.to_string()))?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(&key, payload, ttl.as_secs().max(1))
            .await
            .map_err(|e| {
                error!("Redis SET error for {}: {}", key, e);
                DraftStoreError::Unavailable(e.to_string())
            })?;

        debug!("Draft SET: {} (TTL: {}s)", key, ttl.as_secs());
        Ok(())
    }

    async fn load(&self, token: &DraftToken) -> DraftStoreResult<Option<RegistrationDraft>> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();

        let raw = conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", key, e);
            DraftStoreError::Unavailable(e.to_string())
        })?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| DraftStoreError::Corrupt(format!("{}: {}", key, e))),
            None => {
                debug!("Draft MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn clear(&self, token: &DraftToken) -> DraftStoreResult<bool> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i32>(&key).await.map_err(|e| {
            error!("Redis DEL error for {}: {}", key, e);
            DraftStoreError::Unavailable(e.to_string())
        })?;

        Ok(deleted > 0)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
