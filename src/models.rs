use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<SourceDocument>,
}

/// Citation returned alongside an answer: the file that grounded it and the
/// fragment text itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub filename: String,
    pub text: String,
}

/// Retrieved fragment plus its originating filename and similarity score.
/// Lives only for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: Option<String>,
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub documents: Vec<StoredDocument>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<DocumentRecord>,
    pub count: usize,
}
