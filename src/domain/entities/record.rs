use crate::domain::entities::document::Document;
use serde::{Deserialize, Serialize};

/// Metadata attached to every stored vector so matches can be read back as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: RecordMetadata,
}

impl IndexedRecord {
    pub fn from_document(doc: &Document, values: Vec<f32>) -> Self {
        Self {
            id: doc.id.clone(),
            values,
            metadata: RecordMetadata {
                text: doc.text.clone(),
            },
        }
    }
}

/// One query hit. `metadata` is `None` when the query did not ask for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: String,
    pub score: f32,
    pub metadata: Option<RecordMetadata>,
}

impl Match {
    pub fn text(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.text.as_str())
    }
}
