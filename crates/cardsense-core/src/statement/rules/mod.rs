//! Rule-based field extractors for credit card statements.
//!
//! Each extractor is a pure function of the statement text covering one field
//! group. Extractors are independent of each other; [`extract_patterns`] runs
//! all of them and assembles the pattern-side [`PartialRecord`].

pub mod amounts;
pub mod card;
pub mod dates;
pub mod identity;
pub mod patterns;
pub mod rewards;
pub mod transactions;

pub use amounts::{extract_amounts, parse_amount, AmountExtractor, StatementAmounts};
pub use card::{extract_card_number, CardNumberExtractor};
pub use dates::{extract_dates, DateExtractor, StatementDates};
pub use identity::{extract_identity, IdentityExtractor, StatementIdentity};
pub use rewards::{extract_reward_points, RewardPointsExtractor};
pub use transactions::{extract_transactions, TransactionExtractor};

use regex::Regex;
use tracing::debug;

use crate::models::statement::PartialRecord;

/// Trait for field group extractors.
pub trait FieldExtractor {
    /// The fragment this extractor produces.
    type Output;

    /// Extract the field group from text. Misses are represented inside the output.
    fn extract(&self, text: &str) -> Self::Output;
}

/// One matcher in an ordered list: either finds a value or passes.
pub type Attempt<T> = fn(&str) -> Option<T>;

/// Try each matcher in order and keep the first hit.
pub fn first_match<T>(text: &str, attempts: &[Attempt<T>]) -> Option<T> {
    attempts.iter().find_map(|attempt| attempt(text))
}

/// First capture group of `re`, trimmed; empty captures count as a miss.
pub(crate) fn capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    let value = caps.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Run every extractor over `text` and assemble the pattern record.
pub fn extract_patterns(text: &str) -> PartialRecord {
    let identity = extract_identity(text);
    let dates = extract_dates(text);
    let amounts = extract_amounts(text);
    let transactions = extract_transactions(text);

    let record = PartialRecord {
        customer_name: identity.customer_name,
        statement_date: dates.statement_date,
        payment_due_date: dates.payment_due_date,
        total_amount_due: amounts.total_amount_due,
        minimum_amount_due: amounts.minimum_amount_due,
        credit_limit: amounts.credit_limit,
        available_credit_limit: amounts.available_credit_limit,
        card_number: extract_card_number(text),
        transactions: Some(transactions),
        reward_points_summary: Some(extract_reward_points(text)),
        bank_name: identity.bank_name,
    };

    debug!(
        customer_name = ?record.customer_name,
        card_number = ?record.card_number,
        bank_name = ?record.bank_name,
        total_amount_due = ?record.total_amount_due,
        transactions = record.transactions.as_ref().map_or(0, Vec::len),
        "Pattern extraction result"
    );

    record
}
