use qdrant_client::qdrant::{
    point_id::PointIdOptions, CreateCollectionBuilder, Distance, PointStruct,
    ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::RetrievalError;
use crate::models::{DocumentRecord, StoredDocument};

use super::embeddings::EMBEDDING_DIM;

const SCROLL_PAGE_SIZE: u32 = 100;

pub struct VectorStore {
    client: Qdrant,
    collection_name: String,
}

impl VectorStore {
    pub async fn new(
        url: &str,
        api_key: Option<&str>,
        collection_name: &str,
    ) -> anyhow::Result<Self> {
        tracing::info!("Building Qdrant client for URL: {}", url);
        let mut builder = Qdrant::from_url(url);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        let client = match builder.build() {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Qdrant client build failed: {:?}", e);
                anyhow::bail!("Qdrant client build failed: {}", e);
            }
        };

        let store = Self {
            client,
            collection_name: collection_name.to_string(),
        };

        store.ensure_collection().await?;
        tracing::info!("Qdrant collection ready");

        Ok(store)
    }

    async fn ensure_collection(&self) -> anyhow::Result<()> {
        if !self.client.collection_exists(&self.collection_name).await? {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection_name).vectors_config(
                        VectorParamsBuilder::new(EMBEDDING_DIM, Distance::Cosine),
                    ),
                )
                .await?;
        }
        Ok(())
    }

    pub async fn upsert(
        &self,
        id: &str,
        filename: &str,
        text: &str,
        embedding: Vec<f32>,
    ) -> Result<(), RetrievalError> {
        let mut payload = JsonMap::new();
        payload.insert(
            "filename".to_string(),
            JsonValue::String(filename.to_string()),
        );
        payload.insert("text".to_string(), JsonValue::String(text.to_string()));
        let point = PointStruct::new(id.to_string(), embedding, payload);

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, vec![point]))
            .await?;

        Ok(())
    }

    /// Top-N nearest neighbors, in the order Qdrant returns them.
    pub async fn search(
        &self,
        query_vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<DocumentRecord>, RetrievalError> {
        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection_name, query_vector, limit)
                    .with_payload(true),
            )
            .await?;

        let mut records = Vec::new();
        for point in search_result.result {
            let filename = point
                .payload
                .get("filename")
                .and_then(|v| v.as_str().cloned())
                .unwrap_or_default()
                .to_string();
            let text = point
                .payload
                .get("text")
                .and_then(|v| v.as_str().cloned())
                .unwrap_or_default()
                .to_string();
            records.push(DocumentRecord {
                filename,
                text,
                score: point.score,
            });
        }

        Ok(records)
    }

    pub async fn list(&self, limit: u32) -> Result<Vec<StoredDocument>, RetrievalError> {
        let mut documents = Vec::new();
        let mut offset: Option<qdrant_client::qdrant::PointId> = None;

        while (documents.len() as u32) < limit {
            let page = (limit - documents.len() as u32).min(SCROLL_PAGE_SIZE);
            let mut builder = ScrollPointsBuilder::new(&self.collection_name)
                .limit(page)
                .with_payload(true);

            if let Some(ref off) = offset {
                builder = builder.offset(off.clone());
            }

            let result = self.client.scroll(builder).await?;

            for point in &result.result {
                let id = match point
                    .id
                    .as_ref()
                    .and_then(|id| id.point_id_options.as_ref())
                {
                    Some(PointIdOptions::Uuid(uuid)) => uuid.clone(),
                    Some(PointIdOptions::Num(num)) => num.to_string(),
                    None => continue,
                };
                let filename = point
                    .payload
                    .get("filename")
                    .and_then(|v| v.as_str().cloned())
                    .unwrap_or_default()
                    .to_string();
                let text = point
                    .payload
                    .get("text")
                    .and_then(|v| v.as_str().cloned())
                    .unwrap_or_default()
                    .to_string();
                documents.push(StoredDocument { id, filename, text });
            }

            offset = result.next_page_offset;
            if offset.is_none() {
                break;
            }
        }

        Ok(documents)
    }

    pub async fn count(&self) -> Result<u64, RetrievalError> {
        let info = self.client.collection_info(&self.collection_name).await?;
        Ok(info
            .result
            .and_then(|collection| collection.points_count)
            .unwrap_or(0))
    }

    pub async fn health(&self) -> bool {
        self.client.health_check().await.is_ok()
    }
}
