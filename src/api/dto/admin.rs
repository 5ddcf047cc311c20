//! DTOs for admin booking endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::booking::{ChildDto, GuardianDto};
use super::pagination::PaginationMeta;
use super::quote::{AddOnLineDto, add_on_lines};
use crate::application::services::{AdminBookingRequest, BookingTable};
use crate::domain::entities::{BookingStatus, BookingSummary, ChildProfile, GuardianProfile, PaymentMethod};
use crate::domain::table::Column;

/// Body of `POST /admin/bookings`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminBookingRequestDto {
    #[validate(nested)]
    pub parent: GuardianDto,

    #[validate(nested)]
    pub child: ChildDto,

    pub event_id: i64,

    #[validate(length(min = 1, max = 20, message = "Select between 1 and 20 game slots"))]
    pub slot_ids: Vec<i64>,

    #[serde(default)]
    #[validate(nested)]
    pub add_ons: Vec<AddOnLineDto>,

    #[validate(length(max = 50))]
    pub promo_code: Option<String>,

    pub payment_method: PaymentMethod,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<&AdminBookingRequestDto> for AdminBookingRequest {
    fn from(dto: &AdminBookingRequestDto) -> Self {
        AdminBookingRequest {
            guardian: GuardianProfile::from(&dto.parent),
            child: ChildProfile::from(&dto.child),
            event_id: dto.event_id,
            slot_ids: dto.slot_ids.clone(),
            add_ons: add_on_lines(&dto.add_ons),
            promo_code: dto.promo_code.clone(),
            payment_method: dto.payment_method,
            notes: dto.notes.clone(),
        }
    }
}

/// Response of `GET /admin/bookings`.
#[derive(Debug, Serialize)]
pub struct BookingTableResponse {
    pub columns: Vec<Column>,
    pub pagination: PaginationMeta,
    pub items: Vec<BookingSummary>,
}

impl From<BookingTable> for BookingTableResponse {
    fn from(table: BookingTable) -> Self {
        Self {
            pagination: PaginationMeta::from(&table.page),
            columns: table.columns,
            items: table.page.items,
        }
    }
}

/// Body of `POST /admin/bookings/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusRequest {
    #[validate(length(min = 1, max = 500, message = "Select between 1 and 500 bookings"))]
    pub booking_ids: Vec<i64>,
    pub status: BookingStatus,
}
