//! Document store gateway
//!
//! The remote store is exposed to the pipeline as a single one-shot read
//! operation behind [`DocumentStore`]. Records come back schema-less: an
//! opaque string-keyed JSON map whose shape varies per collection and per
//! historical ingestion batch. Nothing here validates them; the normalizer
//! defensively defaults every field instead.
//!
//! The store value is constructed explicitly and injected into the session
//! that needs it, never held as a module-level global.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// A raw record as returned by the gateway
///
/// Shape is unenforced. Consumers must treat every field as optional and
/// possibly mistyped.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// One-shot read access to a named collection
///
/// No live subscription semantics: each call is a complete fetch, optionally
/// capped. Implementations must not retry internally; failure handling
/// (log-and-keep-cache) lives in the session layer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every record in `collection`, up to `limit` when given
    async fn fetch_all(
        &self,
        collection: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawRecord>, StoreError>;
}
