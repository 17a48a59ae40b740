use crate::domain::entities::record::{IndexedRecord, Match};
use crate::domain::error::DomainError;
use crate::domain::values::index::{IndexDescription, IndexSpec, IndexStats};
use async_trait::async_trait;
use std::sync::Arc;

/// Control plane of a vector database: provisioning and lookup of indexes.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    async fn list_indexes(&self) -> Result<Vec<String>, DomainError>;

    /// Creation may complete asynchronously; poll `describe_index` for readiness.
    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DomainError>;

    async fn describe_index(&self, name: &str) -> Result<IndexDescription, DomainError>;

    async fn delete_index(&self, name: &str) -> Result<(), DomainError>;

    async fn connect(&self, description: &IndexDescription)
        -> Result<Arc<dyn VectorIndex>, DomainError>;
}

/// Data plane of one connected index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    fn name(&self) -> &str;

    fn dimension(&self) -> usize;

    /// Insert-or-replace by id. Returns the number of records written.
    async fn upsert(&self, records: &[IndexedRecord]) -> Result<usize, DomainError>;

    /// Closest matches first.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<Match>, DomainError>;

    async fn stats(&self) -> Result<IndexStats, DomainError>;

    /// Which of `ids` are already stored in the bound namespace.
    async fn fetch_existing(&self, ids: &[String]) -> Result<Vec<String>, DomainError>;
}
