//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod certificate;
pub mod draft;
pub mod health;
pub mod pagination;
pub mod quote;
