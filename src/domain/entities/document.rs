use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Rejects empty ids and duplicate ids within one batch.
pub fn validate_documents(documents: &[Document]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for doc in documents {
        if doc.id.trim().is_empty() {
            return Err("Document id must not be empty".into());
        }
        if !seen.insert(doc.id.as_str()) {
            return Err(DomainError::InvalidInput(format!(
                "Duplicate document id: {}",
                doc.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_unique_ids() {
        let docs = vec![Document::new("a", "one"), Document::new("b", "two")];
        assert!(validate_documents(&docs).is_ok());
    }

    #[test]
    fn rejects_duplicates_and_blank_ids() {
        let dup = vec![Document::new("a", "one"), Document::new("a", "two")];
        assert!(matches!(
            validate_documents(&dup),
            Err(DomainError::InvalidInput(msg)) if msg.contains("Duplicate")
        ));

        let blank = vec![Document::new("  ", "text")];
        assert!(validate_documents(&blank).is_err());
    }
}
