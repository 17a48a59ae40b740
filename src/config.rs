use crate::domain::error::ConfigError;
use crate::domain::values::metric::Metric;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_VAR: &str = "PINECONE_API_KEY";
pub const DEFAULT_INDEX_NAME: &str = "semantic-search-demo";
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_CONTROL_URL: &str = "https://api.pinecone.io";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBackend {
    Pinecone { api_key: String, control_url: String },
    Sqlite { db_path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    FastEmbed,
    HuggingFace,
    Hash,
}

impl EmbeddingBackend {
    /// Local inference when it is compiled in, the hosted endpoint otherwise.
    pub fn default_for_build() -> Self {
        if cfg!(feature = "fastembed") {
            EmbeddingBackend::FastEmbed
        } else {
            EmbeddingBackend::HuggingFace
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fastembed" | "local" => Ok(EmbeddingBackend::FastEmbed),
            "huggingface" | "hf" => Ok(EmbeddingBackend::HuggingFace),
            "hash" => Ok(EmbeddingBackend::Hash),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingBackend,
    pub model: String,
    pub hf_token: Option<String>,
}

/// Where and how the index is provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    pub name: String,
    pub namespace: String,
    pub metric: Metric,
    pub cloud: String,
    pub region: String,
    pub ready_timeout: Duration,
    pub settle_timeout: Duration,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_INDEX_NAME.to_string(),
            namespace: String::new(),
            metric: Metric::Cosine,
            cloud: "aws".to_string(),
            region: "us-east-1".to_string(),
            ready_timeout: Duration::from_secs(120),
            settle_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: IndexBackend,
    pub embedding: EmbeddingConfig,
    pub index: IndexSettings,
}

impl Config {
    /// Reads the process environment after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine, the variables may come from the shell.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("SEMSEARCH_INDEX_BACKEND")
            .unwrap_or_else(|| "pinecone".into())
            .to_lowercase()
            .as_str()
        {
            "pinecone" => IndexBackend::Pinecone {
                api_key: get(API_KEY_VAR)
                    .ok_or_else(|| ConfigError::MissingVar(API_KEY_VAR.to_string()))?,
                control_url: get("PINECONE_CONTROL_URL")
                    .unwrap_or_else(|| DEFAULT_CONTROL_URL.to_string()),
            },
            "sqlite" => IndexBackend::Sqlite {
                db_path: get("SEMSEARCH_DB")
                    .unwrap_or_else(|| "./semsearch.db".into())
                    .into(),
            },
            other => {
                return Err(ConfigError::Invalid {
                    var: "SEMSEARCH_INDEX_BACKEND".into(),
                    reason: format!("unknown backend '{other}'"),
                })
            }
        };

        let provider = match get("SEMSEARCH_EMBEDDING_PROVIDER") {
            Some(p) => p.parse().map_err(|reason| ConfigError::Invalid {
                var: "SEMSEARCH_EMBEDDING_PROVIDER".into(),
                reason,
            })?,
            None => EmbeddingBackend::default_for_build(),
        };

        let embedding = EmbeddingConfig {
            provider,
            model: get("SEMSEARCH_EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            hf_token: get("HF_TOKEN"),
        };

        let defaults = IndexSettings::default();
        let metric = match get("SEMSEARCH_METRIC") {
            Some(m) => m.parse().map_err(|reason| ConfigError::Invalid {
                var: "SEMSEARCH_METRIC".into(),
                reason,
            })?,
            None => defaults.metric,
        };

        let index = IndexSettings {
            name: get("SEMSEARCH_INDEX_NAME").unwrap_or(defaults.name),
            namespace: get("SEMSEARCH_NAMESPACE").unwrap_or(defaults.namespace),
            metric,
            cloud: get("SEMSEARCH_CLOUD").unwrap_or(defaults.cloud),
            region: get("SEMSEARCH_REGION").unwrap_or(defaults.region),
            ready_timeout: secs(&get, "SEMSEARCH_READY_TIMEOUT_SECS")?
                .unwrap_or(defaults.ready_timeout),
            settle_timeout: secs(&get, "SEMSEARCH_SETTLE_TIMEOUT_SECS")?
                .unwrap_or(defaults.settle_timeout),
        };

        Ok(Self {
            backend,
            embedding,
            index,
        })
    }
}

fn secs<F>(get: &F, var: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(var)
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::Invalid {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn missing_api_key_is_reported_by_name() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("PINECONE_API_KEY".into()));
        assert_eq!(
            err.to_string(),
            "PINECONE_API_KEY not found in environment variables."
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("PINECONE_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn defaults_match_the_demo() {
        let cfg = Config::from_lookup(lookup(&[("PINECONE_API_KEY", "pk-test")])).unwrap();
        assert_eq!(
            cfg.backend,
            IndexBackend::Pinecone {
                api_key: "pk-test".into(),
                control_url: DEFAULT_CONTROL_URL.into(),
            }
        );
        assert_eq!(cfg.index.name, "semantic-search-demo");
        assert_eq!(cfg.index.metric, Metric::Cosine);
        assert_eq!(cfg.index.cloud, "aws");
        assert_eq!(cfg.index.region, "us-east-1");
        assert_eq!(cfg.embedding.model, DEFAULT_MODEL);
        assert_eq!(cfg.embedding.provider, EmbeddingBackend::default_for_build());
    }

    #[test]
    fn sqlite_backend_needs_no_key() {
        let cfg = Config::from_lookup(lookup(&[
            ("SEMSEARCH_INDEX_BACKEND", "sqlite"),
            ("SEMSEARCH_DB", "/tmp/x.db"),
            ("SEMSEARCH_EMBEDDING_PROVIDER", "hash"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.backend,
            IndexBackend::Sqlite {
                db_path: "/tmp/x.db".into()
            }
        );
        assert_eq!(cfg.embedding.provider, EmbeddingBackend::Hash);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "k"),
            ("SEMSEARCH_READY_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == "SEMSEARCH_READY_TIMEOUT_SECS"));

        let err = Config::from_lookup(lookup(&[("SEMSEARCH_INDEX_BACKEND", "redis")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = Config::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "k"),
            ("SEMSEARCH_METRIC", "hamming"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == "SEMSEARCH_METRIC"));
    }

    #[test]
    fn timeouts_parse_as_seconds() {
        let cfg = Config::from_lookup(lookup(&[
            ("PINECONE_API_KEY", "k"),
            ("SEMSEARCH_READY_TIMEOUT_SECS", "5"),
            ("SEMSEARCH_SETTLE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.index.ready_timeout, Duration::from_secs(5));
        assert_eq!(cfg.index.settle_timeout, Duration::from_secs(3));
    }
}
