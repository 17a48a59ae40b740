use crate::domain::error::DomainError;

/// Dimension of all-MiniLM-L6-v2 and of every built-in provider.
pub const DEFAULT_DIMENSION: usize = 384;

#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a batch, one vector per input in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;
    fn dimension(&self) -> usize;
    fn model_name(&self) -> &str;
}

/// Every vector sent to an index must have exactly the index's dimension.
pub fn check_dimension(expected: usize, vector: &[f32]) -> Result<(), DomainError> {
    if vector.len() != expected {
        return Err(DomainError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}
