use axum::http::StatusCode;
use thiserror::Error;

/// Failures while turning a query into retrieved documents (embedding call
/// or vector search).
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding request failed: {0}")]
    Embedding(#[source] reqwest::Error),

    #[error("embedding service returned {status}: {body}")]
    EmbeddingApi { status: StatusCode, body: String },

    #[error("vector search failed: {0}")]
    Search(#[from] qdrant_client::QdrantError),
}

/// Failures while producing the answer text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("generation service returned no text")]
    EmptyResponse,
}

/// Request-level error taxonomy. Each request fails independently; none of
/// these is fatal to the process.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pergunta inválida ou muito curta")]
    InvalidQuestion,

    #[error("nenhum documento relevante encontrado")]
    NoRelevantDocuments,

    #[error("erro ao processar a consulta: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("erro ao gerar resposta: {0}")]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::InvalidQuestion => StatusCode::BAD_REQUEST,
            PipelineError::NoRelevantDocuments => StatusCode::NOT_FOUND,
            PipelineError::Retrieval(_) | PipelineError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PipelineError::InvalidQuestion.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PipelineError::NoRelevantDocuments.status_code(),
            StatusCode::NOT_FOUND
        );
        let upstream = PipelineError::Generation(GenerationError::EmptyResponse);
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
