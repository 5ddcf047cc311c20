//! In-process draft store with lazy expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::draft::{DraftToken, RegistrationDraft};
use crate::domain::repositories::{DraftStore, DraftStoreResult};

struct Entry {
    draft: RegistrationDraft,
    expires_at: Instant,
}

/// Keeps drafts in a map for single-instance deployments and tests.
///
/// Expired entries are dropped when touched and swept on every save.
/// Drafts do not survive a restart.
#[derive(Default)]
pub struct MemoryDraftStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        debug!("Using in-memory draft store");
        Self::default()
    }

    pub async fn active_count(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(
        &self,
        token: &DraftToken,
        draft: &RegistrationDraft,
        ttl: Duration,
    ) -> DraftStoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            token.as_str().to_string(),
            Entry {
                draft: draft.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn load(&self, token: &DraftToken) -> DraftStoreResult<Option<RegistrationDraft>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(token.as_str())
            .filter(|e| e.expires_at > now)
            .map(|e| e.draft.clone()))
    }

    async fn clear(&self, token: &DraftToken) -> DraftStoreResult<bool> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(token.as_str());
        Ok(removed.is_some_and(|e| e.expires_at > now))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
