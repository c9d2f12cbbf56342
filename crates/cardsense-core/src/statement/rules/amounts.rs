//! Amount extraction for credit card statements.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::{
    AVAILABLE_CREDIT_LIMIT, CREDIT_LIMIT, MINIMUM_AMOUNT_DUE, PREVIOUS_BALANCE,
    TOTAL_AMOUNT_DUE,
};
use super::FieldExtractor;
use crate::statement::formulas;

/// Labeled statement amounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementAmounts {
    /// Total balance owed.
    pub total_amount_due: Option<Decimal>,
    /// Minimum payment required.
    pub minimum_amount_due: Option<Decimal>,
    /// Total credit line.
    pub credit_limit: Option<Decimal>,
    /// Remaining credit, found or derived.
    pub available_credit_limit: Option<Decimal>,
    /// Balance carried over from the previous cycle.
    pub previous_balance: Option<Decimal>,
}

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    fn lookup(re: &Regex, text: &str) -> Option<Decimal> {
        let caps = re.captures(text)?;
        let amount = parse_amount(&caps[1]);
        if amount.is_none() {
            trace!(raw = &caps[1], "Unparsable amount");
        }
        amount
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = StatementAmounts;

    fn extract(&self, text: &str) -> Self::Output {
        let mut result = StatementAmounts {
            total_amount_due: Self::lookup(&TOTAL_AMOUNT_DUE, text),
            minimum_amount_due: Self::lookup(&MINIMUM_AMOUNT_DUE, text),
            credit_limit: Self::lookup(&CREDIT_LIMIT, text),
            available_credit_limit: Self::lookup(&AVAILABLE_CREDIT_LIMIT, text),
            previous_balance: Self::lookup(&PREVIOUS_BALANCE, text),
        };

        // If we have the limit and the balance but not the available credit, calculate it
        if result.available_credit_limit.is_none() {
            if let (Some(limit), Some(total)) = (result.credit_limit, result.total_amount_due) {
                result.available_credit_limit = formulas::available_credit(limit, total);
            }
        }

        result
    }
}

/// Extract labeled amounts from statement text.
pub fn extract_amounts(text: &str) -> StatementAmounts {
    AmountExtractor::new().extract(text)
}

/// Parse an amount such as `12,345.67`, `₹ 1,499` or `Rs. 500.00`.
///
/// Thousands separators and currency glyphs are dropped. Anything that does
/// not leave a plain decimal number is `None`, never zero.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim_end();
    let cleaned = cleaned.strip_suffix('.').unwrap_or(cleaned);

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let amount = Decimal::from_str(cleaned).ok()?;
    Some(if negative { -amount } else { amount })
}
