//! Handlers for the admin certificate table.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;

use crate::api::dto::certificate::{CertificateTableResponse, certificate_scope};
use crate::api::dto::pagination::TableParams;
use crate::domain::entities::CertificateListItem;
use crate::error::AppError;
use crate::state::AppState;

/// Searchable, sortable, paginated certificate list.
///
/// # Endpoint
///
/// `GET /admin/certificates`
///
/// # Query Parameters
///
/// - `event_id`, `status` (optional): Scope sent to the certificate service;
///   `all` or empty means unscoped
/// - `search`, `filter.<column>`, `sort`, `order`, `page`, `page_size`,
///   `hidden`, `viewport`: as for `GET /admin/bookings`
pub async fn admin_certificates_handler(
    State(state): State<AppState>,
    Query(mut params): Query<TableParams>,
) -> Result<Json<CertificateTableResponse>, AppError> {
    let scope = certificate_scope(&mut params)?;
    let query = params.to_query()?;
    let visibility = params.visibility(&CertificateListItem::columns())?;

    let table = state
        .certificate_service
        .list_certificates(scope, &query, &visibility, params.viewport())
        .await?;

    Ok(Json(CertificateTableResponse::from(table)))
}

/// `GET /admin/certificates/export`
///
/// Every certificate matching the scope and table query, as CSV.
pub async fn export_certificates_handler(
    State(state): State<AppState>,
    Query(mut params): Query<TableParams>,
) -> Result<impl IntoResponse, AppError> {
    let scope = certificate_scope(&mut params)?;
    let query = params.to_query()?;
    let visibility = params.visibility(&CertificateListItem::columns())?;

    let csv = state
        .certificate_service
        .export_certificates(scope, &query, &visibility)
        .await?;

    let filename = format!("certificates-{}.csv", Utc::now().format("%Y%m%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
