pub mod embeddings;
pub mod vector_store;

use crate::error::RetrievalError;
use crate::models::{DocumentRecord, StoredDocument};

use self::embeddings::EmbeddingClient;
use self::vector_store::VectorStore;

/// Seam between the request pipeline and the retrieval stack. Tests
/// substitute a stub; production uses [`Retriever`].
pub trait DocumentSearch {
    async fn search_documents(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<DocumentRecord>, RetrievalError>;
}

/// Embeds queries and documents via the hosted embedding API and talks to
/// the vector store. Holds no per-request state.
pub struct Retriever {
    embeddings: EmbeddingClient,
    store: VectorStore,
}

impl Retriever {
    pub fn new(embeddings: EmbeddingClient, store: VectorStore) -> Self {
        Self { embeddings, store }
    }

    pub async fn add_document(
        &self,
        id: &str,
        filename: &str,
        text: &str,
    ) -> Result<(), RetrievalError> {
        let embedding = self.embeddings.embed(text).await?;
        self.store.upsert(id, filename, text, embedding).await
    }

    pub async fn list_documents(
        &self,
        limit: u32,
    ) -> Result<(Vec<StoredDocument>, u64), RetrievalError> {
        let documents = self.store.list(limit).await?;
        let total = self.store.count().await?;
        Ok((documents, total))
    }

    pub async fn vector_store_healthy(&self) -> bool {
        self.store.health().await
    }
}

impl DocumentSearch for Retriever {
    async fn search_documents(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<DocumentRecord>, RetrievalError> {
        let embedding = self.embeddings.embed(query).await?;
        self.store.search(embedding, top_k as u64).await
    }
}
