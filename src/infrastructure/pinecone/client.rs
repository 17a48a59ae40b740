use super::types::*;
use super::{API_VERSION, MAX_UPSERT_BATCH};
use crate::domain::entities::record::{IndexedRecord, Match};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_index::{VectorIndex, VectorIndexProvider};
use crate::domain::values::index::{IndexDescription, IndexSpec, IndexStats};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Authenticated request plumbing shared by the control and data planes.
#[derive(Clone)]
struct PineconeHttp {
    client: Client,
    api_key: String,
}

impl PineconeHttp {
    fn new(api_key: String) -> Result<Self, DomainError> {
        let client = Client::builder()
            .user_agent("semsearch/0.1")
            .build()
            .map_err(|e| DomainError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, api_key })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, DomainError> {
        let resp = self
            .authed(req)
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Pinecone request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, DomainError> {
        self.send(req)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))
    }
}

fn status_error(status: StatusCode, body: &str) -> DomainError {
    DomainError::VectorIndex(format!("Pinecone API {status}: {body}"))
}

/// Index hosts come back without a scheme; tests point at plain-HTTP servers.
fn data_plane_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

pub struct PineconeProvider {
    http: PineconeHttp,
    control_url: String,
    namespace: String,
}

impl PineconeProvider {
    pub fn new(
        api_key: String,
        control_url: Option<String>,
        namespace: String,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            http: PineconeHttp::new(api_key)?,
            control_url: control_url
                .unwrap_or_else(|| crate::config::DEFAULT_CONTROL_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            namespace,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.control_url, path)
    }
}

#[async_trait]
impl VectorIndexProvider for PineconeProvider {
    fn name(&self) -> &str {
        "pinecone"
    }

    async fn list_indexes(&self) -> Result<Vec<String>, DomainError> {
        let list: IndexList = self
            .http
            .send_json(self.http.client.get(self.url("/indexes")))
            .await?;
        Ok(list.indexes.into_iter().map(|i| i.name).collect())
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DomainError> {
        let body = CreateIndexRequest {
            name: &spec.name,
            dimension: spec.dimension,
            metric: spec.metric,
            spec: IndexSpecBody {
                serverless: ServerlessSpec {
                    cloud: &spec.cloud,
                    region: &spec.region,
                },
            },
        };
        self.http
            .send(self.http.client.post(self.url("/indexes")).json(&body))
            .await?;
        Ok(())
    }

    async fn describe_index(&self, name: &str) -> Result<IndexDescription, DomainError> {
        let model: IndexModel = self
            .http
            .send_json(self.http.client.get(self.url(&format!("/indexes/{name}"))))
            .await?;
        Ok(model.into())
    }

    async fn delete_index(&self, name: &str) -> Result<(), DomainError> {
        self.http
            .send(self.http.client.delete(self.url(&format!("/indexes/{name}"))))
            .await?;
        Ok(())
    }

    async fn connect(
        &self,
        description: &IndexDescription,
    ) -> Result<Arc<dyn VectorIndex>, DomainError> {
        if description.host.is_empty() {
            return Err(DomainError::VectorIndex(format!(
                "Index {} has no data-plane host yet",
                description.name
            )));
        }
        Ok(Arc::new(PineconeIndex {
            http: self.http.clone(),
            base_url: data_plane_url(&description.host),
            name: description.name.clone(),
            dimension: description.dimension,
            namespace: self.namespace.clone(),
        }))
    }
}

pub struct PineconeIndex {
    http: PineconeHttp,
    base_url: String,
    name: String,
    dimension: usize,
    namespace: String,
}

impl PineconeIndex {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&self, records: &[IndexedRecord]) -> Result<usize, DomainError> {
        let mut written = 0;
        for body in upsert_batches(records, &self.namespace) {
            let resp: UpsertResponse = self
                .http
                .send_json(self.http.client.post(self.url("/vectors/upsert")).json(&body))
                .await?;
            written += resp.upserted_count;
        }
        Ok(written)
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<Match>, DomainError> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata,
            include_values: false,
            namespace: &self.namespace,
        };
        let resp: QueryResponse = self
            .http
            .send_json(self.http.client.post(self.url("/query")).json(&body))
            .await?;
        Ok(resp.matches.into_iter().map(Match::from).collect())
    }

    async fn stats(&self) -> Result<IndexStats, DomainError> {
        let resp: DescribeStatsResponse = self
            .http
            .send_json(
                self.http
                    .client
                    .post(self.url("/describe_index_stats"))
                    .json(&DescribeStatsRequest {}),
            )
            .await?;
        Ok(resp.into_stats(&self.namespace))
    }

    async fn fetch_existing(&self, ids: &[String]) -> Result<Vec<String>, DomainError> {
        let mut found = Vec::new();
        for chunk in ids.chunks(MAX_UPSERT_BATCH) {
            let mut query: Vec<(&str, &str)> = chunk.iter().map(|id| ("ids", id.as_str())).collect();
            if !self.namespace.is_empty() {
                query.push(("namespace", self.namespace.as_str()));
            }
            let resp: FetchResponse = self
                .http
                .send_json(self.http.client.get(self.url("/vectors/fetch")).query(&query))
                .await?;
            found.extend(chunk.iter().filter(|id| resp.vectors.contains_key(*id)).cloned());
        }
        Ok(found)
    }
}
