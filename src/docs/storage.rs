use rusqlite::Connection;

use crate::database::Database;
use crate::docs::types::{Document, DocumentMeta};
use crate::store::StoreError;

/// Create the documents table and the index backing the sorted listing
pub(crate) fn create_docs_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT 'null',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_documents_updated_at
         ON documents(updated_at DESC)",
        [],
    )?;

    Ok(())
}

impl Database {
    /// Write a document, replacing any record with the same id
    pub async fn save_document(&self, doc: &Document) -> Result<(), StoreError> {
        let conn = self.conn().await?;
        let conn = conn.lock().map_err(|_| StoreError::Lock)?;

        let content = serde_json::to_string(&doc.content)
            .map_err(|e| StoreError::Write(e.to_string()))?;

        conn.execute(
            "INSERT OR REPLACE INTO documents (id, name, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![doc.id, doc.name, content, doc.created_at, doc.updated_at],
        )
        .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }

    /// Get a document by id
    pub async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let conn = self.conn().await?;
        let conn = conn.lock().map_err(|_| StoreError::Lock)?;

        get_document_sync(&conn, id).map_err(|e| StoreError::Read(e.to_string()))
    }

    /// List all document metadata, ordered by updated_at desc
    pub async fn list_documents(&self) -> Result<Vec<DocumentMeta>, StoreError> {
        let conn = self.conn().await?;
        let conn = conn.lock().map_err(|_| StoreError::Lock)?;

        list_documents_sync(&conn).map_err(|e| StoreError::Read(e.to_string()))
    }

    /// Delete a document by id; deleting an absent id is a no-op
    pub async fn delete_document(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn().await?;
        let conn = conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute("DELETE FROM documents WHERE id = ?1", [id])
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }
}

fn get_document_sync(conn: &Connection, id: &str) -> rusqlite::Result<Option<Document>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, content, created_at, updated_at
         FROM documents WHERE id = ?1",
    )?;

    let mut rows = stmt.query([id])?;

    if let Some(row) = rows.next()? {
        let content_str: String = row.get(2)?;
        let content: serde_json::Value =
            serde_json::from_str(&content_str).unwrap_or(serde_json::Value::Null);

        Ok(Some(Document {
            id: row.get(0)?,
            name: row.get(1)?,
            content,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        }))
    } else {
        Ok(None)
    }
}

fn list_documents_sync(conn: &Connection) -> rusqlite::Result<Vec<DocumentMeta>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, created_at, updated_at
         FROM documents
         ORDER BY updated_at DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DocumentMeta {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    })?;

    let mut documents = Vec::new();
    for row in rows {
        documents.push(row?);
    }

    Ok(documents)
}
