use crate::domain::entities::document::{validate_documents, Document};
use crate::domain::error::DomainError;
use std::path::Path;

/// Six short snippets across three topics: tech, finance and animals.
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::new("vec1", "Apple released a new iPhone with a better camera."),
        Document::new("vec2", "The stock market crashed today due to inflation."),
        Document::new("vec3", "Lions are social animals that live in prides."),
        Document::new("vec4", "My laptop keyboard is broken and needs repair."),
        Document::new("vec5", "Dogs are known as man's best friend."),
        Document::new("vec6", "Interest rates were raised by the central bank."),
    ]
}

/// Concept queries that share no keywords with the documents they should hit.
pub fn sample_queries() -> Vec<String> {
    vec![
        "tell me about wild cats".to_string(),
        "tech news".to_string(),
        "money and economy".to_string(),
    ]
}

/// Reads a JSON array of `{"id": ..., "text": ...}` objects.
pub fn load_documents(path: &Path) -> Result<Vec<Document>, DomainError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DomainError::InvalidInput(format!("Cannot read {}: {e}", path.display())))?;
    let docs: Vec<Document> = serde_json::from_str(&raw)
        .map_err(|e| DomainError::Parse(format!("{}: {e}", path.display())))?;
    validate_documents(&docs)?;
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_corpus_is_valid() {
        let docs = sample_documents();
        assert_eq!(docs.len(), 6);
        assert!(validate_documents(&docs).is_ok());
        assert_eq!(sample_queries().len(), 3);
    }

    #[test]
    fn loads_documents_from_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"[{{"id": "a", "text": "alpha"}}, {{"id": "b", "text": "beta"}}]"#).unwrap();
        let docs = load_documents(f.path()).unwrap();
        assert_eq!(docs, vec![Document::new("a", "alpha"), Document::new("b", "beta")]);
    }

    #[test]
    fn rejects_malformed_or_duplicate_files() {
        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();
        assert!(matches!(load_documents(bad.path()), Err(DomainError::Parse(_))));

        let mut dup = tempfile::NamedTempFile::new().unwrap();
        write!(dup, r#"[{{"id": "a", "text": "x"}}, {{"id": "a", "text": "y"}}]"#).unwrap();
        assert!(matches!(load_documents(dup.path()), Err(DomainError::InvalidInput(_))));
    }
}
