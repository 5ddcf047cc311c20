//! Handlers for saving and resuming registration drafts.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::draft::DraftResponse;
use crate::domain::draft::{DraftToken, RegistrationDraft};
use crate::error::AppError;
use crate::state::AppState;

fn response(state: &AppState, token: DraftToken, draft: RegistrationDraft) -> DraftResponse {
    DraftResponse {
        token: token.as_str().to_string(),
        expires_in_seconds: state.draft_service.ttl().as_secs(),
        draft,
    }
}

/// Starts a draft and returns its resume token.
///
/// # Endpoint
///
/// `POST /api/drafts`
///
/// The body is the partial registration as it stands; every field is
/// optional. Responds `201 Created`.
pub async fn create_draft_handler(
    State(state): State<AppState>,
    Json(draft): Json<RegistrationDraft>,
) -> Result<(StatusCode, Json<DraftResponse>), AppError> {
    let token = state.draft_service.save(None, draft).await?;
    let saved = state.draft_service.load(&token).await?;
    Ok((StatusCode::CREATED, Json(response(&state, token, saved))))
}

/// `PUT /api/drafts/{token}`
///
/// Replaces the draft and restarts its expiry. Saving under a token whose
/// draft has expired starts over under the same token.
pub async fn update_draft_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(draft): Json<RegistrationDraft>,
) -> Result<Json<DraftResponse>, AppError> {
    let token = DraftToken::parse(&raw)?;
    let token = state.draft_service.save(Some(token), draft).await?;
    let saved = state.draft_service.load(&token).await?;
    Ok(Json(response(&state, token, saved)))
}

/// `GET /api/drafts/{token}`
pub async fn get_draft_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DraftResponse>, AppError> {
    let token = DraftToken::parse(&raw)?;
    let draft = state.draft_service.load(&token).await?;
    Ok(Json(response(&state, token, draft)))
}

/// `DELETE /api/drafts/{token}`
pub async fn delete_draft_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<StatusCode, AppError> {
    let token = DraftToken::parse(&raw)?;
    state.draft_service.clear(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
