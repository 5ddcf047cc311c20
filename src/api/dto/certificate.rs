//! DTOs for the admin certificate list.

use serde::Serialize;
use serde_json::json;

use super::pagination::{PaginationMeta, TableParams};
use crate::application::services::CertificateTable;
use crate::domain::entities::{CertificateFilter, CertificateListItem, CertificateStatus};
use crate::domain::table::Column;
use crate::error::AppError;

/// Pulls `event_id` and `status` out of the table parameters.
///
/// An empty value or `all` leaves that scope open.
pub fn certificate_scope(params: &mut TableParams) -> Result<CertificateFilter, AppError> {
    let event_id = match scope_value(params.take_param("event_id")) {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            AppError::bad_request("Invalid event id", json!({ "event_id": raw }))
        })?),
        None => None,
    };

    let status = match scope_value(params.take_param("status")) {
        Some(raw) => Some(raw.parse::<CertificateStatus>().map_err(|_| {
            AppError::bad_request(
                "Invalid certificate status",
                json!({ "status": raw, "allowed": ["generated", "sent", "downloaded", "failed"] }),
            )
        })?),
        None => None,
    };

    Ok(CertificateFilter { event_id, status })
}

fn scope_value(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Response of `GET /admin/certificates`.
#[derive(Debug, Serialize)]
pub struct CertificateTableResponse {
    pub columns: Vec<Column>,
    pub pagination: PaginationMeta,
    pub items: Vec<CertificateListItem>,
}

impl From<CertificateTable> for CertificateTableResponse {
    fn from(table: CertificateTable) -> Self {
        Self {
            pagination: PaginationMeta::from(&table.page),
            columns: table.columns,
            items: table.page.items,
        }
    }
}
