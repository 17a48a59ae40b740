use super::MAX_UPSERT_BATCH;
use crate::domain::entities::record::{IndexedRecord, Match, RecordMetadata};
use crate::domain::values::index::{IndexDescription, IndexStats};
use crate::domain::values::metric::Metric;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct IndexList {
    #[serde(default)]
    pub indexes: Vec<IndexModel>,
}

#[derive(Debug, Deserialize)]
pub struct IndexModel {
    pub name: String,
    pub dimension: usize,
    pub metric: Metric,
    #[serde(default)]
    pub host: String,
    pub status: IndexStatus,
}

#[derive(Debug, Deserialize)]
pub struct IndexStatus {
    pub ready: bool,
}

impl From<IndexModel> for IndexDescription {
    fn from(m: IndexModel) -> Self {
        IndexDescription {
            name: m.name,
            dimension: m.dimension,
            metric: m.metric,
            host: m.host,
            ready: m.status.ready,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateIndexRequest<'a> {
    pub name: &'a str,
    pub dimension: usize,
    pub metric: Metric,
    pub spec: IndexSpecBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct IndexSpecBody<'a> {
    pub serverless: ServerlessSpec<'a>,
}

#[derive(Debug, Serialize)]
pub struct ServerlessSpec<'a> {
    pub cloud: &'a str,
    pub region: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VectorBody<'a> {
    pub id: &'a str,
    pub values: &'a [f32],
    pub metadata: &'a RecordMetadata,
}

impl<'a> From<&'a IndexedRecord> for VectorBody<'a> {
    fn from(r: &'a IndexedRecord) -> Self {
        VectorBody {
            id: &r.id,
            values: &r.values,
            metadata: &r.metadata,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpsertRequest<'a> {
    pub vectors: Vec<VectorBody<'a>>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub namespace: &'a str,
}

/// One request body per `MAX_UPSERT_BATCH` records, in input order.
pub fn upsert_batches<'a>(records: &'a [IndexedRecord], namespace: &'a str) -> Vec<UpsertRequest<'a>> {
    records
        .chunks(MAX_UPSERT_BATCH)
        .map(|chunk| UpsertRequest {
            vectors: chunk.iter().map(VectorBody::from).collect(),
            namespace,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    #[serde(default)]
    pub upserted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub vector: &'a [f32],
    pub top_k: usize,
    pub include_metadata: bool,
    pub include_values: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub namespace: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<ScoredVector>,
}

#[derive(Debug, Deserialize)]
pub struct ScoredVector {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl From<ScoredVector> for Match {
    fn from(v: ScoredVector) -> Self {
        let metadata = v
            .metadata
            .as_ref()
            .and_then(|m| m.get("text"))
            .and_then(|t| t.as_str())
            .map(|text| RecordMetadata {
                text: text.to_string(),
            });
        Match {
            id: v.id,
            score: v.score,
            metadata,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DescribeStatsRequest {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeStatsResponse {
    #[serde(default)]
    pub namespaces: HashMap<String, NamespaceSummary>,
    #[serde(default)]
    pub dimension: usize,
    #[serde(default)]
    pub total_vector_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    #[serde(default)]
    pub vector_count: usize,
}

impl DescribeStatsResponse {
    /// An absent namespace entry means the namespace holds nothing yet.
    pub fn into_stats(self, namespace: &str) -> IndexStats {
        let namespace_vector_count = self
            .namespaces
            .get(namespace)
            .map(|n| n.vector_count)
            .unwrap_or(0);
        IndexStats {
            dimension: self.dimension,
            total_vector_count: self.total_vector_count,
            namespace_vector_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub vectors: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_uses_serverless_spec() {
        let body = serde_json::to_value(CreateIndexRequest {
            name: "semantic-search-demo",
            dimension: 384,
            metric: Metric::Cosine,
            spec: IndexSpecBody {
                serverless: ServerlessSpec {
                    cloud: "aws",
                    region: "us-east-1",
                },
            },
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "name": "semantic-search-demo",
                "dimension": 384,
                "metric": "cosine",
                "spec": {"serverless": {"cloud": "aws", "region": "us-east-1"}}
            })
        );
    }

    #[test]
    fn upsert_request_omits_default_namespace() {
        let record = IndexedRecord {
            id: "vec1".into(),
            values: vec![0.5, -0.5],
            metadata: RecordMetadata {
                text: "hello".into(),
            },
        };
        let body = serde_json::to_value(UpsertRequest {
            vectors: vec![VectorBody::from(&record)],
            namespace: "",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"vectors": [{"id": "vec1", "values": [0.5, -0.5], "metadata": {"text": "hello"}}]})
        );
    }

    #[test]
    fn query_request_is_camel_case() {
        let body = serde_json::to_value(QueryRequest {
            vector: &[1.0],
            top_k: 2,
            include_metadata: true,
            include_values: false,
            namespace: "demo",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"vector": [1.0], "topK": 2, "includeMetadata": true, "includeValues": false, "namespace": "demo"})
        );
    }

    #[test]
    fn parses_index_list_and_status() {
        let list: IndexList = serde_json::from_value(json!({
            "indexes": [{
                "name": "semantic-search-demo",
                "dimension": 384,
                "metric": "cosine",
                "host": "semantic-search-demo-abc123.svc.aped-4627-b74a.pinecone.io",
                "spec": {"serverless": {"cloud": "aws", "region": "us-east-1"}},
                "status": {"ready": false, "state": "Initializing"},
                "deletion_protection": "disabled"
            }]
        }))
        .unwrap();
        let desc: IndexDescription = list.indexes.into_iter().next().unwrap().into();
        assert_eq!(desc.name, "semantic-search-demo");
        assert_eq!(desc.dimension, 384);
        assert!(!desc.ready);
    }

    #[test]
    fn parses_matches_with_and_without_text() {
        let resp: QueryResponse = serde_json::from_value(json!({
            "matches": [
                {"id": "vec3", "score": 0.61, "values": [], "metadata": {"text": "Lions"}},
                {"id": "vec5", "score": 0.32, "values": []}
            ],
            "namespace": "",
            "usage": {"readUnits": 5}
        }))
        .unwrap();
        let matches: Vec<Match> = resp.matches.into_iter().map(Match::from).collect();
        assert_eq!(matches[0].text(), Some("Lions"));
        assert_eq!(matches[1].metadata, None);
    }

    fn records(n: usize) -> Vec<IndexedRecord> {
        (0..n)
            .map(|i| IndexedRecord {
                id: format!("r{i}"),
                values: vec![i as f32],
                metadata: RecordMetadata {
                    text: format!("record {i}"),
                },
            })
            .collect()
    }

    #[test]
    fn upserts_split_at_batch_limit() {
        let records = records(250);
        let batches = upsert_batches(&records, "demo");
        let sizes: Vec<usize> = batches.iter().map(|b| b.vectors.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(batches[2].vectors[0].id, "r200");
        assert_eq!(batches[2].vectors[49].id, "r249");
        assert!(batches.iter().all(|b| b.namespace == "demo"));
    }

    #[test]
    fn exact_multiple_has_no_empty_batch() {
        let records = records(200);
        assert_eq!(upsert_batches(&records, "").len(), 2);
        assert!(upsert_batches(&[], "").is_empty());
    }

    #[test]
    fn stats_pick_the_bound_namespace() {
        let raw = json!({
            "namespaces": {"": {"vectorCount": 4}, "demo": {"vectorCount": 6}},
            "dimension": 384,
            "totalVectorCount": 10
        });
        let demo = serde_json::from_value::<DescribeStatsResponse>(raw.clone())
            .unwrap()
            .into_stats("demo");
        assert_eq!(demo.namespace_vector_count, 6);
        assert_eq!(demo.total_vector_count, 10);

        let default = serde_json::from_value::<DescribeStatsResponse>(raw.clone())
            .unwrap()
            .into_stats("");
        assert_eq!(default.namespace_vector_count, 4);

        let missing = serde_json::from_value::<DescribeStatsResponse>(raw)
            .unwrap()
            .into_stats("other");
        assert_eq!(missing.namespace_vector_count, 0);
        assert_eq!(missing.dimension, 384);
    }

    #[test]
    fn parses_fetch_response() {
        let resp: FetchResponse = serde_json::from_value(json!({
            "vectors": {"vec1": {"id": "vec1", "values": [0.1]}},
            "namespace": "",
            "usage": {"readUnits": 1}
        }))
        .unwrap();
        assert!(resp.vectors.contains_key("vec1"));
    }

    #[test]
    fn parses_stats() {
        let stats: DescribeStatsResponse = serde_json::from_value(json!({
            "namespaces": {"": {"vectorCount": 6}},
            "dimension": 384,
            "indexFullness": 0.0,
            "totalVectorCount": 6
        }))
        .unwrap();
        assert_eq!(stats.total_vector_count, 6);
        assert_eq!(stats.namespaces[""].vector_count, 6);
    }
}
