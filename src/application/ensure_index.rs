use crate::application::wait::poll_until;
use crate::config::IndexSettings;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_index::{VectorIndex, VectorIndexProvider};
use crate::domain::values::index::{IndexDescription, IndexSpec};
use crate::domain::values::poll_policy::PollPolicy;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The index already existed and was reused as is.
    Reused,
    Created,
    /// An existing index was deleted and created again.
    Recreated,
}

pub struct EnsuredIndex {
    pub index: Arc<dyn VectorIndex>,
    pub description: IndexDescription,
    pub outcome: EnsureOutcome,
}

/// Makes sure the configured index exists and is ready, then connects to it.
pub struct EnsureIndexUseCase {
    provider: Arc<dyn VectorIndexProvider>,
    settings: IndexSettings,
    dimension: usize,
}

impl EnsureIndexUseCase {
    pub fn new(provider: Arc<dyn VectorIndexProvider>, settings: IndexSettings, dimension: usize) -> Self {
        Self { provider, settings, dimension }
    }

    fn spec(&self) -> IndexSpec {
        IndexSpec {
            name: self.settings.name.clone(),
            dimension: self.dimension,
            metric: self.settings.metric,
            cloud: self.settings.cloud.clone(),
            region: self.settings.region.clone(),
        }
    }

    pub async fn execute(&self, recreate: bool) -> Result<EnsuredIndex, DomainError> {
        let name = self.settings.name.as_str();
        let provider = &self.provider;
        let policy = PollPolicy::index_ready(self.settings.ready_timeout);

        let exists = provider.list_indexes().await?.iter().any(|n| n == name);
        let outcome = match (exists, recreate) {
            (true, false) => EnsureOutcome::Reused,
            (true, true) => {
                info!(index = name, backend = provider.name(), "deleting index before recreating");
                provider.delete_index(name).await?;
                poll_until(&format!("index {name} to be deleted"), &policy, move || async move {
                    Ok::<_, DomainError>(!provider.list_indexes().await?.iter().any(|n| n == name))
                })
                .await?;
                provider.create_index(&self.spec()).await?;
                EnsureOutcome::Recreated
            }
            (false, _) => {
                let spec = self.spec();
                info!(
                    index = name,
                    dimension = spec.dimension,
                    metric = %spec.metric,
                    cloud = %spec.cloud,
                    region = %spec.region,
                    "creating index"
                );
                provider.create_index(&spec).await?;
                EnsureOutcome::Created
            }
        };

        poll_until(&format!("index {name} to become ready"), &policy, move || async move {
            Ok::<_, DomainError>(provider.describe_index(name).await?.ready)
        })
        .await?;

        let description = provider.describe_index(name).await?;
        if description.dimension != self.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: description.dimension,
                actual: self.dimension,
            });
        }

        if description.metric != self.settings.metric {
            return Err(DomainError::MetricMismatch {
                expected: self.settings.metric,
                actual: description.metric,
            });
        }

        let index = provider.connect(&description).await?;
        info!(index = name, ?outcome, "connected");
        Ok(EnsuredIndex {
            index,
            description,
            outcome,
        })
    }

    pub async fn delete(&self) -> Result<(), DomainError> {
        info!(index = %self.settings.name, "deleting index");
        self.provider.delete_index(&self.settings.name).await
    }
}
