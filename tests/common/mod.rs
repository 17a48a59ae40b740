//! Shared test helpers.

use semsearch::config::IndexSettings;
use semsearch::domain::ports::vector_index::VectorIndexProvider;
use semsearch::infrastructure::embeddings::hashing::HashingProvider;
use semsearch::infrastructure::sqlite::vector_index::SqliteIndexProvider;
use semsearch::SemanticSearch;
use std::sync::Arc;
use std::time::Duration;

pub fn settings(name: &str) -> IndexSettings {
    IndexSettings {
        name: name.to_string(),
        ready_timeout: Duration::from_secs(1),
        settle_timeout: Duration::from_secs(1),
        ..IndexSettings::default()
    }
}

/// Offline app over an in-memory SQLite index, plus the provider for direct inspection.
pub fn setup() -> (SemanticSearch, Arc<SqliteIndexProvider>) {
    let provider = Arc::new(SqliteIndexProvider::in_memory().unwrap());
    let app = SemanticSearch::with_providers(
        Arc::new(HashingProvider::default()),
        provider.clone() as Arc<dyn VectorIndexProvider>,
        settings("test-index"),
    );
    (app, provider)
}
