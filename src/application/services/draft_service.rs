//! Save and resume partially completed registrations.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use crate::domain::draft::{DraftToken, RegistrationDraft};
use crate::domain::repositories::DraftStore;
use crate::error::AppError;

pub struct DraftService {
    store: Arc<dyn DraftStore>,
    ttl: Duration,
}

impl DraftService {
    pub fn new(store: Arc<dyn DraftStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores a draft, under a fresh token when `token` is `None`.
    ///
    /// Saving resets the expiry.
    pub async fn save(
        &self,
        token: Option<DraftToken>,
        mut draft: RegistrationDraft,
    ) -> Result<DraftToken, AppError> {
        let token = match token {
            Some(t) => t,
            None => DraftToken::generate()?,
        };

        draft.saved_at = Some(Utc::now());
        self.store.save(&token, &draft, self.ttl).await?;

        tracing::debug!(token = %token, step = ?draft.step, "Draft saved");
        Ok(token)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the draft never existed or has expired.
    pub async fn load(&self, token: &DraftToken) -> Result<RegistrationDraft, AppError> {
        self.store
            .load(token)
            .await?
            .ok_or_else(|| draft_not_found(token))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there was nothing to clear.
    pub async fn clear(&self, token: &DraftToken) -> Result<(), AppError> {
        if self.store.clear(token).await? {
            Ok(())
        } else {
            Err(draft_not_found(token))
        }
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}

fn draft_not_found(token: &DraftToken) -> AppError {
    AppError::not_found(
        "Draft not found or expired",
        json!({ "token": token.as_str() }),
    )
}
