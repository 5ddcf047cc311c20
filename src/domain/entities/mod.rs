//! Core domain entities of the booking model.
//!
//! Entities are plain data: loosely typed upstream payloads are coerced into
//! these types once, in `crate::infrastructure::http`, and never re-parsed.
//!
//! # Entity Types
//!
//! - [`ChildProfile`] / [`GuardianProfile`] - who is being booked and who pays
//! - [`City`], [`Event`], [`GameSlot`] - the bookable catalog
//! - [`AddOn`] - optional purchasable items with variants and bundle discounts
//! - [`PromoCode`] - externally validated discount codes
//! - [`BookingSummary`], [`NewBooking`], [`PendingBooking`] - booking records
//!   exchanged with the booking webhook
//! - [`CertificateListItem`] - participation certificates for the admin list

pub mod add_on;
pub mod booking;
pub mod certificate;
pub mod child;
pub mod event;
pub mod promo_code;

pub use add_on::{AddOn, AddOnVariant, BundleDiscount};
pub use booking::{
    BookingAddOnLine, BookingGameLine, BookingStatus, BookingSummary, NewBooking,
    PaymentMethod, PaymentStatus, PendingBooking, PendingBookingReceipt,
};
pub use certificate::{CertificateFilter, CertificateListItem, CertificateStatus};
pub use child::{ChildProfile, Gender, GuardianProfile};
pub use event::{City, Event, GameSlot};
pub use promo_code::{DiscountType, PromoCode, PromoValidation};
