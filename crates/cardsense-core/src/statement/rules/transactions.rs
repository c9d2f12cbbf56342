//! Transaction table extraction.

use tracing::{debug, trace};

use super::amounts::parse_amount;
use super::patterns::{TRANSACTIONS_END, TRANSACTIONS_START, TRANSACTION_ROW};
use super::FieldExtractor;
use crate::models::statement::Transaction;

/// Transaction extractor.
///
/// Rows are only read inside the section that starts at `YOUR TRANSACTIONS`
/// and ends at the next `KEY OFFERS` / `Page N of M` marker or the end of text.
pub struct TransactionExtractor;

impl TransactionExtractor {
    pub fn new() -> Self {
        Self
    }

    fn section(text: &str) -> Option<&str> {
        let start = TRANSACTIONS_START.find(text)?.end();
        let rest = &text[start..];
        let end = TRANSACTIONS_END.find(rest).map_or(rest.len(), |m| m.start());
        Some(&rest[..end])
    }
}

impl Default for TransactionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TransactionExtractor {
    type Output = Vec<Transaction>;

    fn extract(&self, text: &str) -> Self::Output {
        let Some(section) = Self::section(text) else {
            return Vec::new();
        };

        let mut transactions = Vec::new();
        for caps in TRANSACTION_ROW.captures_iter(section) {
            let Some(amount) = parse_amount(&caps[3]) else {
                trace!(row = &caps[0], "Skipping row with malformed amount");
                continue;
            };
            let amount = if caps.get(4).is_some() { -amount } else { amount };

            transactions.push(Transaction {
                date: caps[1].trim().to_string(),
                description: caps[2].trim().to_string(),
                amount,
            });
        }

        debug!(count = transactions.len(), "Transactions extracted");
        transactions
    }
}

/// Extract transactions from statement text, in document order.
pub fn extract_transactions(text: &str) -> Vec<Transaction> {
    TransactionExtractor::new().extract(text)
}
