//! Storage contract for registration drafts.

use crate::domain::draft::{DraftToken, RegistrationDraft};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DraftStoreError {
    #[error("draft store unavailable: {0}")]
    Unavailable(String),
    #[error("stored draft is corrupt: {0}")]
    Corrupt(String),
}

pub type DraftStoreResult<T> = Result<T, DraftStoreError>;

/// Key-value store of drafts with expiry.
///
/// # Implementations
///
/// - [`crate::infrastructure::drafts::RedisDraftStore`] - Redis, keys prefixed `draft:`
/// - [`crate::infrastructure::drafts::MemoryDraftStore`] - process-local fallback
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Stores `draft` under `token`, replacing any previous value and resetting its TTL.
    async fn save(
        &self,
        token: &DraftToken,
        draft: &RegistrationDraft,
        ttl: Duration,
    ) -> DraftStoreResult<()>;

    /// # Returns
    ///
    /// - `Ok(Some(draft))` if present and not expired
    /// - `Ok(None)` otherwise
    async fn load(&self, token: &DraftToken) -> DraftStoreResult<Option<RegistrationDraft>>;

    /// Removes a draft. Returns whether one existed.
    async fn clear(&self, token: &DraftToken) -> DraftStoreResult<bool>;

    async fn health_check(&self) -> bool;
}
