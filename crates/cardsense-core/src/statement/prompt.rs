//! Extraction prompt for the generation service.

use tracing::debug;

use crate::models::statement::PartialRecord;

/// Fixed instruction block: the 11 fields, where to look, and the derivation rules.
const INSTRUCTIONS: &str = r#"Extract ALL 11 data points below from this credit card statement. Do not skip any field.

Use null only when a value truly cannot be found or calculated.

DATA POINTS TO EXTRACT:

1. customer_name: full name of the cardholder ("Customer Name:", "Cardholder:", "Name:", address header).
2. statement_date: statement generation date ("Statement Date:", "Date:"). Keep the original format.
3. payment_due_date: payment deadline ("Payment Due Date:", "Due Date:"). Keep the original format.
4. total_amount_due: total balance owed ("Total Amount Due:", "Total Due:"). Number only, no currency symbols.
5. minimum_amount_due: minimum payment required ("Minimum Amount Due:", "Min Amount Due:", "Minimum Due:"). Usually next to the total amount due. Number only.
6. credit_limit: total credit line ("Credit Limit:", "Limit:"). Number only.
7. available_credit_limit: remaining credit ("Available Credit Limit:", "Available Credit:"). Number only.
8. card_number: card number, may be masked (e.g. 428102*****9388) ("Card Number:", "Card No:").
9. transactions: every transaction as {"date": string, "description": string, "amount": number}; credits are negative.
10. reward_points_summary: {"opening_balance": integer, "earned": integer, "closing_balance": integer} from the rewards summary section.
11. bank_name: issuing bank or card issuer (e.g. HDFC, ICICI, Axis, IDFC FIRST, RBL).

CALCULATION RULES (use when the value is not printed):
- available_credit_limit = credit_limit - total_amount_due
- reward_points_summary.closing_balance = opening_balance + earned"#;

const REPLY_FORMAT: &str = r#"RETURN FORMAT:
Reply with a single JSON object and nothing else: no prose, no markdown fences.
{
  "customer_name": string,
  "statement_date": string,
  "payment_due_date": string,
  "total_amount_due": number,
  "minimum_amount_due": number,
  "credit_limit": number,
  "available_credit_limit": number,
  "card_number": string,
  "transactions": [{"date": string, "description": string, "amount": number}],
  "reward_points_summary": {"opening_balance": number, "earned": number, "closing_balance": number},
  "bank_name": string
}"#;

/// Builds the single extraction request sent to the generation service.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    max_source_chars: usize,
}

impl PromptBuilder {
    /// Create a builder that embeds at most `max_source_chars` characters of source text.
    pub fn new(max_source_chars: usize) -> Self {
        Self { max_source_chars }
    }

    /// Compose the prompt from the statement text and the pattern-extracted record.
    pub fn build(&self, text: &str, pattern: &PartialRecord) -> String {
        let source = truncate_chars(text, self.max_source_chars);
        let pre_extracted = serde_json::to_string_pretty(pattern)
            .unwrap_or_else(|_| "{}".to_string());

        let prompt = format!(
            "{INSTRUCTIONS}\n\nEXTRACTED TEXT FROM ALL PAGES:\n{source}\n\n\
             PRE-EXTRACTED DATA (pattern matched, use it to verify your answer):\n{pre_extracted}\n\n\
             {REPLY_FORMAT}\n"
        );

        debug!(
            source_chars = source.chars().count(),
            truncated = source.len() < text.len(),
            prompt_len = prompt.len(),
            "Built extraction prompt"
        );
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(20_000)
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::CanonicalRecord;

    #[test]
    fn test_prompt_lists_every_field() {
        let prompt = PromptBuilder::default().build("statement text", &PartialRecord::fallback());

        for field in CanonicalRecord::FIELDS {
            assert!(prompt.contains(field), "prompt does not mention {field}");
        }
        assert!(prompt.contains("available_credit_limit = credit_limit - total_amount_due"));
        assert!(prompt.contains("closing_balance = opening_balance + earned"));
        assert!(prompt.contains("single JSON object"));
    }

    #[test]
    fn test_prompt_embeds_pattern_record() {
        let pattern = PartialRecord {
            card_number: Some("4281****9388".to_string()),
            ..PartialRecord::default()
        };
        let prompt = PromptBuilder::default().build("text", &pattern);

        assert!(prompt.contains(r#""card_number": "4281****9388""#));
    }

    #[test]
    fn test_source_text_is_truncated() {
        let text = "x".repeat(50) + "TAIL";
        let prompt = PromptBuilder::new(50).build(&text, &PartialRecord::default());

        assert!(prompt.contains(&"x".repeat(50)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
