use crate::enrich::enrich_query;
use crate::error::PipelineError;
use crate::llm::AnswerGenerator;
use crate::models::DocumentRecord;
use crate::policy;
use crate::prompt::build_prompt;
use crate::rag::DocumentSearch;

#[derive(Debug)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<DocumentRecord>,
}

/// Canonical single-pass pipeline: validate → enrich → retrieve → filter →
/// assemble → generate. Both external clients are injected so tests can
/// run it against stubs.
pub async fn answer_question(
    retriever: &impl DocumentSearch,
    generator: &impl AnswerGenerator,
    question: &str,
    max_results: usize,
) -> Result<Answer, PipelineError> {
    // 1. Validate before touching any external service
    if !policy::validate_question(question) {
        return Err(PipelineError::InvalidQuestion);
    }

    // 2. Enrich the query and retrieve candidates
    let enriched = enrich_query(question);
    let records = retriever.search_documents(&enriched, max_results).await?;

    // 3. Drop low-relevance records; an empty result set means there is
    //    nothing to ground an answer on
    let records = policy::filter_by_score(records);
    if records.is_empty() {
        return Err(PipelineError::NoRelevantDocuments);
    }

    tracing::info!("Answering with {} relevant documents", records.len());

    // 4. Assemble the grounded prompt (with the original question) and
    //    generate the answer
    let prompt = build_prompt(question, &records);
    let text = generator.generate(&prompt).await?;

    Ok(Answer {
        text,
        sources: records,
    })
}
