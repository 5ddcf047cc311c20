//! Webhook-backed implementations of the domain gateways.
//!
//! Every upstream service speaks JSON over HTTP POST/GET relative to a base
//! URL. Responses are loosely typed (numbers as strings, single objects
//! instead of arrays, `{ "data": [...] }` wrappers) so each gateway parses
//! them through [`coerce`] once, at the boundary.

mod booking;
mod catalog;
mod certificate;
mod client;
pub mod coerce;
mod error;
mod notification;
mod payment;
mod promo;

pub use booking::HttpBookingGateway;
pub use catalog::{HttpCatalogGateway, parse_add_on, parse_event};
pub use certificate::HttpCertificateGateway;
pub use client::WebhookClient;
pub use error::GatewayError;
pub use notification::HttpNotificationGateway;
pub use payment::HttpPaymentGateway;
pub use promo::HttpPromoGateway;
