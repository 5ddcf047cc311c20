//! Contracts of the external webhook services.
//!
//! The service keeps no durable state of its own: catalog, bookings,
//! certificates, promo codes, payments and notifications all live behind
//! these traits.

pub mod booking;
pub mod catalog;
pub mod certificate;
pub mod notification;
pub mod payment;
pub mod promo;

pub use booking::BookingGateway;
pub use catalog::CatalogGateway;
pub use certificate::CertificateGateway;
pub use notification::NotificationGateway;
pub use payment::{ManualPayment, PaymentGateway, PaymentRequest};
pub use promo::PromoGateway;

#[cfg(test)]
pub use booking::MockBookingGateway;
#[cfg(test)]
pub use catalog::MockCatalogGateway;
#[cfg(test)]
pub use certificate::MockCertificateGateway;
#[cfg(test)]
pub use notification::MockNotificationGateway;
#[cfg(test)]
pub use payment::MockPaymentGateway;
#[cfg(test)]
pub use promo::MockPromoGateway;
