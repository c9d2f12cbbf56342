//! Question-answering prompt over a processed statement.

use crate::models::statement::CanonicalRecord;
use crate::statement::prompt::truncate_chars;

const GUIDELINES: &str = "RESPONSE GUIDELINES:
1. Structure the answer with clear sections and bullet points.
2. Format amounts in Indian Rupees (₹).
3. Highlight key information and give short summaries.
4. Use tables for transaction summaries when appropriate.";

/// Builds the prompt for a question about one statement.
#[derive(Debug, Clone)]
pub struct ChatPromptBuilder {
    context_chars: usize,
}

impl ChatPromptBuilder {
    pub fn new(context_chars: usize) -> Self {
        Self { context_chars }
    }

    /// Compose the prompt. `record` is the latest reconciled record, if any.
    pub fn build(&self, text: &str, record: Option<&CanonicalRecord>, question: &str) -> String {
        let structured = record
            .and_then(|r| serde_json::to_string_pretty(r).ok())
            .unwrap_or_else(|| "{}".to_string());
        let context = truncate_chars(text, self.context_chars);

        format!(
            "You are a financial analyst assistant answering questions about one credit card statement.\n\n\
             EXTRACTED STRUCTURED DATA:\n{structured}\n\n\
             ADDITIONAL TEXT CONTEXT (for reference):\n{context}\n\n\
             USER QUESTION: {question}\n\n\
             {GUIDELINES}\n"
        )
    }
}

impl Default for ChatPromptBuilder {
    fn default() -> Self {
        Self::new(4_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_prompt_without_record() {
        let prompt = ChatPromptBuilder::default().build("statement", None, "What is due?");

        assert!(prompt.contains("EXTRACTED STRUCTURED DATA:\n{}"));
        assert!(prompt.contains("USER QUESTION: What is due?"));
    }

    #[test]
    fn test_chat_prompt_with_record_and_short_context() {
        let record = CanonicalRecord {
            bank_name: Some("HDFC Bank".to_string()),
            ..CanonicalRecord::empty()
        };
        let prompt = ChatPromptBuilder::new(5).build("0123456789", Some(&record), "Which bank?");

        assert!(prompt.contains(r#""bank_name": "HDFC Bank""#));
        assert!(prompt.contains("01234\n"));
        assert!(!prompt.contains("56789"));
    }
}
