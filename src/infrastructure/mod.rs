//! Infrastructure layer for external integrations.
//!
//! Implements the traits defined by the domain layer against real services.
//!
//! # Modules
//!
//! - [`http`] - Webhook gateways over `reqwest`
//! - [`drafts`] - Draft stores (Redis and in-memory)

pub mod drafts;
pub mod http;
