use anyhow::{Context, Result};

/// Environment-driven settings. `GEMINI_API_KEY` is required; everything
/// else has a local-development default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini_api_key: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection_name: String,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let gemini_api_key =
            std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
        let qdrant_url = std::env::var("QDRANT_URL")
            .unwrap_or_else(|_| "http://localhost:6334".to_string());
        let qdrant_api_key = std::env::var("QDRANT_API_KEY").ok();
        let collection_name =
            std::env::var("RAG_COLLECTION").unwrap_or_else(|_| "contracts".to_string());
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            gemini_api_key,
            qdrant_url,
            qdrant_api_key,
            collection_name,
            bind_addr,
        })
    }
}
