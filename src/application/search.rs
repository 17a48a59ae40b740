use crate::application::embed::embed_checked;
use crate::domain::entities::record::Match;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_index::VectorIndex;
use std::sync::Arc;
use tracing::debug;

pub struct SearchUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SearchUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    pub async fn execute(&self, index: &dyn VectorIndex, query: &str, top_k: usize) -> Result<Vec<Match>, DomainError> {
        if top_k == 0 {
            return Err("top_k must be at least 1".into());
        }
        let mut vectors = embed_checked(self.embedder.as_ref(), &[query.to_string()], index.dimension()).await?;
        let vector = vectors
            .pop()
            .ok_or_else(|| DomainError::Embedding("no vector returned for query".into()))?;
        let matches = index.query(&vector, top_k, true).await?;
        debug!(query, hits = matches.len(), "query answered");
        Ok(matches)
    }
}
