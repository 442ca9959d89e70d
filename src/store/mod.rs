//! Storage contract for document persistence.
//!
//! Backends implement [`DocumentStore`]; the persistence manager is written
//! against the trait alone and never sees the storage technology behind it.

use async_trait::async_trait;
use thiserror::Error;

use crate::docs::types::{Document, DocumentMeta};

pub mod memory;
pub mod sqlite;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be opened or reached
    #[error("storage unavailable: {0}")]
    Connection(String),
    /// A write could not be committed
    #[error("write failed: {0}")]
    Write(String),
    /// A read failed mid-operation
    #[error("read failed: {0}")]
    Read(String),
    /// The shared connection lock was poisoned
    #[error("storage lock poisoned")]
    Lock,
}

/// Abstract persistence backend for documents.
///
/// `save` is a full-record upsert keyed by id; the last write to commit
/// wins. A missing record is reported as `Ok(None)` from `load`, never as
/// an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upsert `doc` by id, overwriting any existing record with the same id.
    /// The write is committed before this resolves.
    async fn save(&self, doc: &Document) -> Result<(), StoreError>;

    /// Fetch the record for `id`, or `None` if absent.
    async fn load(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Remove the record for `id`. Removing an absent id is a no-op.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// All document metadata, newest first by `updated_at`.
    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError>;

    /// A fresh id, unique with overwhelming probability across calls.
    /// The format is opaque to callers.
    fn generate_id(&self) -> String;
}
