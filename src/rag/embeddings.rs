use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const EMBEDDING_MODEL: &str = "embedding-001";
// The index was built with the document task type; queries must use the
// same one or similarity scores drift.
const TASK_TYPE: &str = "RETRIEVAL_DOCUMENT";

pub const EMBEDDING_DIM: u64 = 768;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: &'a str,
    content: EmbedContent<'a>,
    task_type: &'a str,
}

#[derive(Serialize)]
struct EmbedContent<'a> {
    parts: Vec<EmbedPart<'a>>,
}

#[derive(Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Thin wrapper over the Gemini `embedContent` endpoint.
pub struct EmbeddingClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EmbeddingClient {
    pub fn new(client: reqwest::Client, api_key: &str) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        let url = format!("{}/models/{}:embedContent", self.base_url, EMBEDDING_MODEL);
        let model = format!("models/{}", EMBEDDING_MODEL);
        let request = EmbedRequest {
            model: &model,
            content: EmbedContent {
                parts: vec![EmbedPart { text }],
            },
            task_type: TASK_TYPE,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(RetrievalError::Embedding)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::EmbeddingApi { status, body });
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(RetrievalError::Embedding)?;

        Ok(parsed.embedding.values)
    }
}
