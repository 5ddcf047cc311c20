//! Admin certificate list and export.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{CertificateFilter, CertificateListItem};
use crate::domain::gateways::CertificateGateway;
use crate::domain::table::{Column, ColumnVisibility, TablePage, TableQuery, Viewport, to_csv};
use crate::error::AppError;

/// One page of the certificate table plus the columns to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateTable {
    pub columns: Vec<Column>,
    pub page: TablePage<CertificateListItem>,
}

pub struct CertificateService {
    certificates: Arc<dyn CertificateGateway>,
}

impl CertificateService {
    pub fn new(certificates: Arc<dyn CertificateGateway>) -> Self {
        Self { certificates }
    }

    /// Certificates in `filter`'s scope, searched, sorted and paginated.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for unknown filter or sort columns
    /// - [`AppError::Upstream`] if the certificate service fails
    pub async fn list_certificates(
        &self,
        filter: CertificateFilter,
        query: &TableQuery,
        visibility: &ColumnVisibility,
        viewport: Viewport,
    ) -> Result<CertificateTable, AppError> {
        let columns = CertificateListItem::columns();
        query.validate(&columns)?;

        let rows = self.certificates.list_certificates(filter).await?;
        let page = query.apply(&rows);
        let columns = visibility
            .visible_columns(&columns, viewport)
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(
            event_id = ?filter.event_id,
            status = ?filter.status,
            total = page.total_items,
            "Certificate table"
        );

        Ok(CertificateTable { columns, page })
    }

    /// CSV of every certificate matching the scope and query, visible columns only.
    pub async fn export_certificates(
        &self,
        filter: CertificateFilter,
        query: &TableQuery,
        visibility: &ColumnVisibility,
    ) -> Result<String, AppError> {
        let columns = CertificateListItem::columns();
        query.validate(&columns)?;

        let rows = self.certificates.list_certificates(filter).await?;
        let matched = query.filter_and_sort(&rows);
        let visible = visibility.visible_columns(&columns, Viewport::Wide);

        to_csv(&visible, &matched)
    }
}
