//! DTOs for registration drafts.

use serde::Serialize;

use crate::domain::draft::RegistrationDraft;

/// Draft as returned to the client, with the token needed to resume it.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub token: String,
    pub expires_in_seconds: u64,
    pub draft: RegistrationDraft,
}
