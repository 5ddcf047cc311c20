//! Certificate records kept by the certificate webhook.

use crate::domain::entities::{CertificateFilter, CertificateListItem};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificateGateway: Send + Sync {
    /// Certificates matching `filter`, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the certificate service fails.
    async fn list_certificates(
        &self,
        filter: CertificateFilter,
    ) -> Result<Vec<CertificateListItem>, AppError>;
}
