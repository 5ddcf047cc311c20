//! Partially completed registrations that can be resumed by token.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::domain::entities::{ChildProfile, GuardianProfile};
use crate::domain::rules::SelectionSet;
use crate::error::AppError;

/// Random bytes behind a token; 9 bytes encode to 12 URL-safe characters.
const TOKEN_BYTES: usize = 9;
pub const TOKEN_LENGTH: usize = 12;

/// Wizard step the user stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStep {
    #[default]
    Details,
    AddOns,
    Payment,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistrationDraft {
    #[serde(default)]
    pub step: DraftStep,
    pub guardian: Option<GuardianProfile>,
    pub child: Option<ChildProfile>,
    pub city_id: Option<i64>,
    pub event_id: Option<i64>,
    #[serde(default)]
    pub selection: SelectionSet,
    pub promo_code: Option<String>,
    #[serde(default)]
    pub terms_accepted: bool,
    /// Set by the store on every save.
    pub saved_at: Option<DateTime<Utc>>,
}

/// Opaque resume token handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DraftToken(String);

impl DraftToken {
    /// Generates a fresh random token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the system random source fails.
    pub fn generate() -> Result<Self, AppError> {
        let mut buffer = [0u8; TOKEN_BYTES];
        getrandom::fill(&mut buffer).map_err(|e| {
            AppError::internal("Failed to generate token", json!({ "reason": e.to_string() }))
        })?;
        Ok(Self(
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer),
        ))
    }

    /// Parses a client-supplied token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unless the token is 12 URL-safe base64 characters.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let well_formed = raw.len() == TOKEN_LENGTH
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(AppError::bad_request(
                "Malformed draft token",
                json!({ "expected_length": TOKEN_LENGTH }),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
