//! Payment initiation and manual payment records.

use serde::Serialize;

use crate::domain::entities::{PaymentMethod, PaymentStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// An online payment to start for a pending booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub transaction_id: String,
    pub user_id: Option<i64>,
    pub amount: f64,
    pub mobile_number: String,
}

/// A payment taken offline by an admin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualPayment {
    pub booking_id: i64,
    pub transaction_id: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Starts an online payment and returns the URL to redirect the payer to.
    async fn initiate(&self, request: PaymentRequest) -> Result<String, AppError>;

    async fn record_manual(&self, payment: ManualPayment) -> Result<(), AppError>;
}
