use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{check_dimension, EmbeddingProvider};

/// Embeds `texts` and verifies one vector of `dimension` came back per input.
pub async fn embed_checked(
    embedder: &dyn EmbeddingProvider,
    texts: &[String],
    dimension: usize,
) -> Result<Vec<Vec<f32>>, DomainError> {
    let vectors = embedder.embed(texts).await?;
    if vectors.len() != texts.len() {
        return Err(DomainError::Embedding(format!(
            "{} returned {} vectors for {} inputs",
            embedder.model_name(),
            vectors.len(),
            texts.len()
        )));
    }
    for v in &vectors {
        check_dimension(dimension, v)?;
    }
    Ok(vectors)
}
