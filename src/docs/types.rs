use serde::{Deserialize, Serialize};

/// A document stored in the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    /// Opaque editor state; never inspected by the persistence layer
    pub content: serde_json::Value,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Listing projection of a [`Document`] without its content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Editor state captured by a change notification. Staged in memory until
/// the next write consumes it; never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub content: serde_json::Value,
}

impl Document {
    /// Projection used for listings
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_projection_drops_content() {
        let doc = Document {
            id: "d1".to_string(),
            name: "Notes".to_string(),
            content: serde_json::json!({"body": "hello"}),
            created_at: 100,
            updated_at: 200,
        };

        let meta = doc.meta();
        assert_eq!(meta.id, "d1");
        assert_eq!(meta.name, "Notes");
        assert_eq!(meta.created_at, 100);
        assert_eq!(meta.updated_at, 200);
    }
}
