use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, DEFAULT_DIMENSION};
use reqwest::Client;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Sentence embeddings from the Hugging Face inference feature-extraction pipeline.
pub struct HuggingFaceProvider {
    client: Client,
    token: Option<String>,
    model: String,
    base_url: String,
    dimension: usize,
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [String],
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

impl HuggingFaceProvider {
    pub fn new(token: Option<String>, model: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            model,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            dimension: DEFAULT_DIMENSION,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}/pipeline/feature-extraction",
            self.base_url, self.model
        )
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HuggingFaceProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut req = self.client.post(self.endpoint()).json(&FeatureExtractionRequest {
            inputs: texts,
            options: RequestOptions {
                wait_for_model: true,
            },
        });
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Hugging Face API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!(
                "Hugging Face API {status}: {body}"
            )));
        }

        let vectors: Vec<Vec<f32>> = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
