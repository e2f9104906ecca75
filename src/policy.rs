use crate::models::DocumentRecord;

/// Minimum question length, in characters, after trimming.
pub const MIN_QUESTION_CHARS: usize = 5;

/// Records at or below this similarity score are discarded.
pub const SCORE_THRESHOLD: f32 = 0.2;

/// A question must be non-empty and long enough to be answerable.
pub fn validate_question(question: &str) -> bool {
    question.trim().chars().count() >= MIN_QUESTION_CHARS
}

/// Keeps only records strictly above the relevance threshold, preserving
/// the retrieval order.
pub fn filter_by_score(records: Vec<DocumentRecord>) -> Vec<DocumentRecord> {
    records
        .into_iter()
        .filter(|record| record.score > SCORE_THRESHOLD)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, score: f32) -> DocumentRecord {
        DocumentRecord {
            filename: filename.to_string(),
            text: format!("conteúdo de {}", filename),
            score,
        }
    }

    #[test]
    fn test_empty_question_rejected() {
        assert!(!validate_question(""));
        assert!(!validate_question("   "));
    }

    #[test]
    fn test_short_question_rejected() {
        assert!(!validate_question("oi?"));
        assert!(!validate_question("  abcd  "));
    }

    #[test]
    fn test_minimum_length_question_accepted() {
        assert!(validate_question("valor"));
        assert!(validate_question("  qual o valor do aluguel?  "));
    }

    #[test]
    fn test_low_score_records_dropped() {
        let records = vec![
            record("contrato_a.pdf", 0.5),
            record("contrato_b.pdf", 0.1),
        ];
        let kept = filter_by_score(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].filename, "contrato_a.pdf");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let kept = filter_by_score(vec![record("contrato.pdf", SCORE_THRESHOLD)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_retrieval_order_preserved() {
        let records = vec![
            record("primeiro.pdf", 0.9),
            record("segundo.pdf", 0.21),
            record("terceiro.pdf", 0.7),
        ];
        let kept = filter_by_score(records);
        let names: Vec<_> = kept.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["primeiro.pdf", "segundo.pdf", "terceiro.pdf"]);
    }
}
