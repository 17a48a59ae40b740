pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::ensure_index::{EnsureIndexUseCase, EnsuredIndex};
use crate::application::ingest::IngestUseCase;
use crate::application::search::SearchUseCase;
use crate::config::{Config, EmbeddingBackend, IndexBackend, IndexSettings};
use crate::domain::entities::document::Document;
use crate::domain::entities::record::Match;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_index::{VectorIndex, VectorIndexProvider};
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::huggingface::HuggingFaceProvider;
use crate::infrastructure::pinecone::PineconeProvider;
use crate::infrastructure::sqlite::vector_index::SqliteIndexProvider;
use std::sync::Arc;

pub struct SemanticSearch {
    embedder: Arc<dyn EmbeddingProvider>,
    backend: String,
    ensure_uc: EnsureIndexUseCase,
    ingest_uc: IngestUseCase,
    search_uc: SearchUseCase,
}

impl SemanticSearch {
    /// Builds the embedder and index provider the configuration names.
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let embedder = build_embedder(config)?;
        let provider: Arc<dyn VectorIndexProvider> = match &config.backend {
            IndexBackend::Pinecone { api_key, control_url } => Arc::new(PineconeProvider::new(
                api_key.clone(),
                Some(control_url.clone()),
                config.index.namespace.clone(),
            )?),
            IndexBackend::Sqlite { db_path } => Arc::new(SqliteIndexProvider::open(db_path)?),
        };
        Ok(Self::with_providers(embedder, provider, config.index.clone()))
    }

    pub fn with_providers(
        embedder: Arc<dyn EmbeddingProvider>,
        provider: Arc<dyn VectorIndexProvider>,
        settings: IndexSettings,
    ) -> Self {
        let dimension = embedder.dimension();
        Self {
            embedder: embedder.clone(),
            backend: provider.name().to_string(),
            ingest_uc: IngestUseCase::new(embedder.clone(), settings.settle_timeout),
            search_uc: SearchUseCase::new(embedder),
            ensure_uc: EnsureIndexUseCase::new(provider, settings, dimension),
        }
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    // Delegating methods
    pub async fn ensure_index(&self, recreate: bool) -> Result<EnsuredIndex, DomainError> {
        self.ensure_uc.execute(recreate).await
    }

    pub async fn ingest(&self, index: &dyn VectorIndex, documents: &[Document]) -> Result<usize, DomainError> {
        self.ingest_uc.execute(index, documents).await
    }

    pub async fn search(&self, index: &dyn VectorIndex, query: &str, top_k: usize) -> Result<Vec<Match>, DomainError> {
        self.search_uc.execute(index, query, top_k).await
    }

    pub async fn delete_index(&self) -> Result<(), DomainError> {
        self.ensure_uc.delete().await
    }
}

fn build_embedder(config: &Config) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    let embedding = &config.embedding;
    let embedder: Arc<dyn EmbeddingProvider> = match embedding.provider {
        EmbeddingBackend::Hash => Arc::new(HashingProvider::default()),
        EmbeddingBackend::HuggingFace => Arc::new(HuggingFaceProvider::new(
            embedding.hf_token.clone(),
            embedding.model.clone(),
            None,
        )),
        #[cfg(feature = "fastembed")]
        EmbeddingBackend::FastEmbed => {
            Arc::new(crate::infrastructure::embeddings::local::FastEmbedProvider::new()?)
        }
        #[cfg(not(feature = "fastembed"))]
        EmbeddingBackend::FastEmbed => {
            return Err(DomainError::Config(crate::domain::error::ConfigError::Invalid {
                var: "SEMSEARCH_EMBEDDING_PROVIDER".into(),
                reason: "this build has no local model; rebuild with --features fastembed".into(),
            }))
        }
    };
    Ok(embedder)
}
