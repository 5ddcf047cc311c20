//! Booking creation and administration upstream.

use crate::domain::entities::{
    BookingStatus, BookingSummary, NewBooking, PendingBooking, PendingBookingReceipt,
};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Parks a booking until payment completes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the booking service rejects the
    /// booking or returns no transaction id.
    async fn create_pending(&self, booking: PendingBooking)
    -> Result<PendingBookingReceipt, AppError>;

    /// Creates a confirmed booking and returns its id.
    async fn create_booking(&self, booking: NewBooking) -> Result<i64, AppError>;

    async fn list_bookings(&self) -> Result<Vec<BookingSummary>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the booking does not exist upstream.
    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> Result<(), AppError>;
}
