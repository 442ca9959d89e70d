//! Race-safe, debounced persistence for interactive document editors.
//!
//! Sits between an editor that emits change notifications and a pluggable
//! storage backend. Bursts of edits are coalesced into infrequent durable
//! writes, and autosave is muted while a document load is in progress so
//! that restoration echoes are never persisted as if they were user edits.
//!
//! The crate is organized into:
//!
//! - `docs/` - document record types and the SQLite table behind them
//! - `store/` - the `DocumentStore` contract plus reference backends
//! - `autosave/` - debounce primitive and the persistence manager
//! - `database.rs` - lazily opened, shared SQLite connection
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use draftstore::{Database, PersistenceManager, Snapshot};
//!
//! let store = Arc::new(Database::new(Database::default_path()));
//! let manager = PersistenceManager::new(store);
//!
//! let id = manager.create_session(Some("Q3 Proposal".into()));
//! manager.on_state_change(Snapshot { content: serde_json::json!({"body": "..."}) });
//! // ... a quiet period later the document is on disk; or:
//! manager.force_save().await;
//! ```

mod autosave;
mod database;
mod docs;
mod store;

pub use autosave::debounce::Debouncer;
pub use autosave::manager::{PersistenceManager, POST_LOAD_SETTLE, SAVE_DEBOUNCE_WINDOW};
pub use database::Database;
pub use docs::types::{Document, DocumentMeta, Snapshot};
pub use store::memory::MemoryStore;
pub use store::{DocumentStore, StoreError};
