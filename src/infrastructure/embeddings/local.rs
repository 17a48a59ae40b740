//! Local all-MiniLM-L6-v2 inference via fastembed (ONNX Runtime).
//!
//! The model is downloaded to the fastembed cache on first use.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, DEFAULT_DIMENSION};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Arc;

pub struct FastEmbedProvider {
    model: Arc<TextEmbedding>,
    model_name: String,
}

impl FastEmbedProvider {
    pub fn new() -> Result<Self, DomainError> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
        )
        .map_err(|e| DomainError::Embedding(format!("Failed to load model: {e}")))?;
        Ok(Self {
            model: Arc::new(model),
            model_name: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let model = Arc::clone(&self.model);
        let batch = texts.to_vec();
        tokio::task::spawn_blocking(move || model.embed(batch, None))
            .await
            .map_err(|e| DomainError::Embedding(format!("Embedding task failed: {e}")))?
            .map_err(|e| DomainError::Embedding(format!("fastembed error: {e}")))
    }

    fn dimension(&self) -> usize {
        DEFAULT_DIMENSION
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
