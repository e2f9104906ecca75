/// Maximum query length, in characters, sent to the embedding service.
/// Longer queries are truncated silently.
pub const MAX_QUERY_CHARS: usize = 1000;

struct EnrichmentRule {
    triggers: &'static [&'static str],
    suffix: &'static str,
}

// Evaluated in order, first match wins. Monetary terms take precedence over
// person-name tokens.
const ENRICHMENT_RULES: &[EnrichmentRule] = &[
    EnrichmentRule {
        triggers: &[
            "valor", "preço", "custo", "aluguel", "taxa", "multa", "reais", "r$", "pagamento",
        ],
        suffix: "valor aluguel preço pagamento R$",
    },
    EnrichmentRule {
        triggers: &["eduardo", "rocha", "fontenele", "gabriela", "bruno", "ana"],
        suffix: "nome cpf rg identificação contratante locatário inquilino",
    },
];

/// Trims and truncates the raw question, then appends the suffix of the
/// first enrichment rule whose trigger terms appear in it. Matching is
/// case-insensitive substring containment.
pub fn enrich_query(question: &str) -> String {
    let trimmed = question.trim();
    let truncated: String = if trimmed.chars().count() > MAX_QUERY_CHARS {
        tracing::warn!("Query truncated to {} characters", MAX_QUERY_CHARS);
        trimmed.chars().take(MAX_QUERY_CHARS).collect()
    } else {
        trimmed.to_string()
    };

    let lowered = truncated.to_lowercase();
    for rule in ENRICHMENT_RULES {
        if rule.triggers.iter().any(|term| lowered.contains(term)) {
            tracing::debug!("Query enriched with suffix: {}", rule.suffix);
            return format!("{} {}", truncated, rule.suffix);
        }
    }

    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYMENT_SUFFIX: &str = "valor aluguel preço pagamento R$";
    const PERSON_SUFFIX: &str = "nome cpf rg identificação contratante locatário inquilino";

    #[test]
    fn test_monetary_question_gets_payment_suffix() {
        let enriched = enrich_query("qual o valor do aluguel?");
        assert!(enriched.ends_with(PAYMENT_SUFFIX));
        assert!(!enriched.contains(PERSON_SUFFIX));
    }

    #[test]
    fn test_person_question_gets_identification_suffix() {
        let enriched = enrich_query("quem é Eduardo no contrato?");
        assert!(enriched.ends_with(PERSON_SUFFIX));
    }

    #[test]
    fn test_monetary_rule_wins_over_person_rule() {
        let enriched = enrich_query("qual a multa que Gabriela deve pagar?");
        assert!(enriched.ends_with(PAYMENT_SUFFIX));
        assert!(!enriched.contains(PERSON_SUFFIX));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let enriched = enrich_query("Qual o VALOR da causa?");
        assert!(enriched.ends_with(PAYMENT_SUFFIX));
    }

    #[test]
    fn test_neutral_question_unchanged() {
        let question = "quando termina o contrato?";
        assert_eq!(enrich_query(question), question);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            enrich_query("  quando termina o contrato?  "),
            "quando termina o contrato?"
        );
    }

    #[test]
    fn test_long_query_truncated_to_char_limit() {
        let question = "x".repeat(MAX_QUERY_CHARS + 500);
        let enriched = enrich_query(&question);
        assert_eq!(enriched.chars().count(), MAX_QUERY_CHARS);
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        let question = "ç".repeat(MAX_QUERY_CHARS + 200);
        let enriched = enrich_query(&question);
        assert_eq!(enriched.chars().count(), MAX_QUERY_CHARS);
    }

    #[test]
    fn test_trigger_beyond_cutoff_ignored() {
        // The trigger only exists past the truncation point, so no rule fires.
        let question = format!("{} aluguel", "x".repeat(MAX_QUERY_CHARS));
        let enriched = enrich_query(&question);
        assert!(!enriched.ends_with(PAYMENT_SUFFIX));
    }
}
