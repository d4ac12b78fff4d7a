//! Prompt construction for answering and intent classification.

/// "Stuff" strategy: every retrieved chunk goes into one prompt. If the
/// combined context exceeds the model's input window, the model truncates;
/// no iterative summarization happens here.
pub fn answer_prompt(query: &str, contexts: &[String]) -> String {
    let context = contexts.join("\n\n");
    format!(
        "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
{context}\n\nQuestion: {query}\nHelpful Answer:"
    )
}

/// Few-shot classification prompt. The model must answer with exactly one of
/// the known template keys, or the literal token `NONE`.
pub fn classification_prompt(query: &str, template_names: &str) -> String {
    format!(
        "You are an AI assistant. Analyze the user's query to determine if they are asking for a legal document template.\n\
If they are, identify which specific document they are asking for from the following types: {template_names}.\n\
If you identify a document, respond ONLY with the document type (e.g., \"nda\", \"non-disclosure agreement\").\n\
If the query is NOT a document request, respond ONLY with \"NONE\".\n\
\n\
Examples:\n\
User: I need an NDA.\n\
Response: nda\n\
\n\
User: Can you help me draft a non-disclosure agreement?\n\
Response: non-disclosure agreement\n\
\n\
User: What are the tax requirements for a new business?\n\
Response: NONE\n\
\n\
User: Draft a simple contract.\n\
Response: NONE\n\
\n\
Query: {query}\n\
Response:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_stuffs_all_contexts() {
        let prompt = answer_prompt(
            "What does Article 1 say?",
            &["Article 1: all equal.".to_string(), "Section 2: property.".to_string()],
        );
        assert!(prompt.contains("Article 1: all equal."));
        assert!(prompt.contains("Section 2: property."));
        assert!(prompt.contains("Question: What does Article 1 say?"));
    }

    #[test]
    fn classification_prompt_lists_templates_and_none() {
        let prompt = classification_prompt("I need an NDA", "nda, non-disclosure agreement");
        assert!(prompt.contains("nda, non-disclosure agreement"));
        assert!(prompt.contains("\"NONE\""));
        assert!(prompt.contains("Query: I need an NDA"));
    }
}
