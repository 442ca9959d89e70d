//! Reference backend: the storage contract mapped onto the shared SQLite
//! database.

use async_trait::async_trait;

use crate::database::Database;
use crate::docs::types::{Document, DocumentMeta};
use crate::store::{DocumentStore, StoreError};

#[async_trait]
impl DocumentStore for Database {
    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        self.save_document(doc).await
    }

    async fn load(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.get_document(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.delete_document(id).await
    }

    async fn list(&self) -> Result<Vec<DocumentMeta>, StoreError> {
        self.list_documents().await
    }

    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
