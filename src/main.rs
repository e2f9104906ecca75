mod config;
mod enrich;
mod error;
mod llm;
mod models;
mod pipeline;
mod policy;
mod prompt;
mod rag;

use axum::http::Method;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use config::Settings;
use llm::GeminiClient;
use models::{
    AskRequest, AskResponse, DocumentUpload, ListQuery, ListResponse, SearchQuery,
    SearchResponse, SourceDocument,
};
use rag::{embeddings::EmbeddingClient, vector_store::VectorStore, DocumentSearch, Retriever};

struct AppState {
    retriever: Retriever,
    llm: GeminiClient,
}

const DEFAULT_MAX_RESULTS: usize = 5;
const DEFAULT_LIST_LIMIT: u32 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenv::dotenv().ok();
    let settings = Settings::from_env()?;

    tracing::info!("Connecting to Qdrant: {}", settings.qdrant_url);

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    let store = VectorStore::new(
        &settings.qdrant_url,
        settings.qdrant_api_key.as_deref(),
        &settings.collection_name,
    )
    .await?;
    let embeddings = EmbeddingClient::new(http.clone(), &settings.gemini_api_key);
    let retriever = Retriever::new(embeddings, store);
    let llm = GeminiClient::new(http, &settings.gemini_api_key);

    let state = Arc::new(AppState { retriever, llm });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/v1/ask", post(ask_handler))
        .route(
            "/api/v1/documents",
            get(list_documents_handler).post(add_document_handler),
        )
        .route("/api/v1/documents/search", get(search_documents_handler))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let max_results = request.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    tracing::info!(
        "Received question ({} chars, max_results={})",
        request.question.len(),
        max_results
    );

    let answer = pipeline::answer_question(
        &state.retriever,
        &state.llm,
        &request.question,
        max_results,
    )
    .await
    .map_err(|e| {
        tracing::error!("Ask pipeline failed: {}", e);
        (e.status_code(), e.to_string())
    })?;

    let sources = answer
        .sources
        .into_iter()
        .map(|record| SourceDocument {
            filename: record.filename,
            text: record.text,
        })
        .collect();

    Ok(Json(AskResponse {
        answer: answer.text,
        sources,
    }))
}

async fn list_documents_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let (documents, total) = state.retriever.list_documents(limit).await.map_err(|e| {
        tracing::error!("Document listing failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(ListResponse { documents, total }))
}

async fn search_documents_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let top_k = query.top_k.unwrap_or(DEFAULT_MAX_RESULTS);
    let text = query.query.unwrap_or_default();

    // Blank queries return nothing rather than embedding an empty string
    if text.trim().is_empty() {
        return Ok(Json(SearchResponse {
            matches: Vec::new(),
            count: 0,
        }));
    }

    let matches = state
        .retriever
        .search_documents(&text, top_k)
        .await
        .map_err(|e| {
            tracing::error!("Document search failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let count = matches.len();
    Ok(Json(SearchResponse { matches, count }))
}

async fn add_document_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DocumentUpload>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let id = payload.id.unwrap_or_else(|| Uuid::new_v4().to_string());

    state
        .retriever
        .add_document(&id, &payload.filename, &payload.text)
        .await
        .map_err(|e| {
            tracing::error!("Document upsert failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    tracing::info!("Document {} indexed as {}", payload.filename, id);

    Ok(Json(serde_json::json!({
        "status": "success",
        "id": id
    })))
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let vector_store_healthy = state.retriever.vector_store_healthy().await;

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "services": {
            "vector_store": vector_store_healthy
        }
    }))
}
