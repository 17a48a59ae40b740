use crate::domain::values::metric::Metric;
use serde::Serialize;

/// Everything needed to provision an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: String,
    pub dimension: usize,
    pub metric: Metric,
    pub cloud: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescription {
    pub name: String,
    pub dimension: usize,
    pub metric: Metric,
    /// Data-plane host. Empty for local backends.
    pub host: String,
    pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub dimension: usize,
    /// Vectors across all namespaces.
    pub total_vector_count: usize,
    /// Vectors in the namespace the handle is bound to.
    pub namespace_vector_count: usize,
}
