use crate::application::embed::embed_checked;
use crate::application::wait::poll_until;
use crate::domain::entities::document::{validate_documents, Document};
use crate::domain::entities::record::IndexedRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_index::VectorIndex;
use crate::domain::values::poll_policy::PollPolicy;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    settle_timeout: Duration,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, settle_timeout: Duration) -> Self {
        Self {
            embedder,
            settle_timeout,
        }
    }

    /// Embeds and upserts `documents` as one batch, then waits until the
    /// index count has grown by the number of ids it did not hold before.
    pub async fn execute(&self, index: &dyn VectorIndex, documents: &[Document]) -> Result<usize, DomainError> {
        validate_documents(documents)?;
        if documents.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let vectors = embed_checked(self.embedder.as_ref(), &texts, index.dimension()).await?;
        debug!(count = vectors.len(), model = self.embedder.model_name(), "embedded documents");

        let ids: Vec<String> = documents.iter().map(|d| d.id.clone()).collect();
        let before = index.stats().await?.namespace_vector_count;
        let replaced = index.fetch_existing(&ids).await?.len();
        let expected = before + ids.len().saturating_sub(replaced);
        debug!(before, replaced, expected, "expected vector count after upsert");

        let records: Vec<IndexedRecord> = documents
            .iter()
            .zip(vectors)
            .map(|(doc, values)| IndexedRecord::from_document(doc, values))
            .collect();

        let written = index.upsert(&records).await?;
        info!(index = index.name(), written, "upserted vectors");

        poll_until(
            "upserted vectors to become visible",
            &PollPolicy::settle(self.settle_timeout),
            move || async move { Ok::<_, DomainError>(index.stats().await?.namespace_vector_count >= expected) },
        )
        .await?;

        Ok(written)
    }
}
