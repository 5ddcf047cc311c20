//! Storage backends for registration drafts.
//!
//! - [`RedisDraftStore`] - Redis-backed store with native key expiry
//! - [`MemoryDraftStore`] - Process-local store used when Redis is not configured

mod memory_store;
mod redis_store;

pub use memory_store::MemoryDraftStore;
pub use redis_store::RedisDraftStore;
