//! In-memory backend. Volatile; contents vanish with the store. Used by
//! tests and as the smallest reference implementation of the contract.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::docs::types::{Document, DocumentMeta};
use crate::store::{DocumentStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::Lock)?;
        docs.insert(doc.id.clone(), doc.clone());
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::Lock)?;
        Ok(docs.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::Lock)?;
        docs.remove(id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::Lock)?;
        let mut metas: Vec<DocumentMeta> = docs.values().map(|d| d.meta()).collect();
        metas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(metas)
    }

    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
