use crate::models::DocumentRecord;

const INSTRUCTIONS: &str = "\
Você é um assistente especializado em contratos imobiliários com acesso a uma base de documentos.
Suas respostas devem ser:
1. DETALHADAS - Forneça informações completas e abrangentes sobre o que foi perguntado.
2. ESPECÍFICAS - Quando a pergunta for sobre pessoas, entidades ou cláusulas, inclua TODOS os detalhes disponíveis nos documentos.
3. ESTRUTURADAS - Organize a resposta de forma clara, usando listas ou seções quando apropriado.
4. BASEADAS EM EVIDÊNCIAS - Cite explicitamente de qual documento/contrato a informação foi extraída.
5. Cite explicitamente códigos de barras, caso as informações sejam de boletos de cobrança.";

/// Builds the grounded prompt: fixed instruction preamble, one labeled
/// block per document, then the original question. Deterministic for a
/// given input.
pub fn build_prompt(question: &str, records: &[DocumentRecord]) -> String {
    let context = records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("[Documento {} - {}]\n{}", i + 1, record.filename, record.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nDocumentos:\n{}\n\nPergunta: {}",
        INSTRUCTIONS, context, question
    )
}
