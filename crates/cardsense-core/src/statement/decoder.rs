//! Decoding of the generation service reply into a [`PartialRecord`].
//!
//! Replies are untrusted text. The decoder takes the span from the first `{`
//! to the last `}`, parses it strictly, and on failure applies a fixed set of
//! repairs and tries once more. Anything still unparsable yields
//! [`PartialRecord::fallback`]. Decoding never fails.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, trace, warn};

use crate::models::statement::{PartialRecord, RewardPointsSummary, Transaction};
use crate::statement::rules::parse_amount;

lazy_static! {
    /// `,` directly before a closing brace or bracket.
    static ref TRAILING_COMMA: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// Unquoted object key following `{` or `,`.
    static ref BARE_KEY: Regex = Regex::new(r"([{,]\s*)([A-Za-z_]\w*)\s*:").unwrap();

    /// `'` opening a key or value: after `{`, `[`, `,` or `:`.
    static ref SINGLE_QUOTE_OPEN: Regex = Regex::new(r"([{\[,:]\s*)'").unwrap();

    /// `'` closing a key or value: before `:`, `,`, `}` or `]`.
    static ref SINGLE_QUOTE_CLOSE: Regex = Regex::new(r"'(\s*[:,}\]])").unwrap();

    /// Python-style literals in value position.
    static ref PY_NONE: Regex = Regex::new(r":\s*None\b").unwrap();
    static ref PY_TRUE: Regex = Regex::new(r":\s*True\b").unwrap();
    static ref PY_FALSE: Regex = Regex::new(r":\s*False\b").unwrap();
}

/// Decode a free-form reply. Always returns a record.
pub fn decode_reply(reply: &str) -> PartialRecord {
    let Some(span) = object_span(reply) else {
        warn!(reply_len = reply.len(), "No JSON object in generation reply");
        return PartialRecord::fallback();
    };

    let object = match parse_object(span) {
        Ok(object) => object,
        Err(err) => {
            debug!(error = %err, "Strict decode failed, repairing reply");
            match parse_object(&repair(span)) {
                Ok(object) => object,
                Err(err) => {
                    warn!(error = %err, "Could not decode generation reply");
                    return PartialRecord::fallback();
                }
            }
        }
    };

    record_from_object(&object)
}

/// Text from the first `{` to the last `}`, inclusive.
fn object_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn parse_object(text: &str) -> serde_json::Result<Map<String, Value>> {
    serde_json::from_str(text)
}

/// Rewrite common near-JSON mistakes.
///
/// - single quotes at key or value boundaries become double quotes; an
///   apostrophe inside a string is left alone
/// - Python `None` / `True` / `False` values become JSON literals
/// - bare keys after `{` or `,` get quoted
/// - trailing commas before `}` or `]` are dropped
pub(crate) fn repair(text: &str) -> String {
    let mut fixed = SINGLE_QUOTE_OPEN.replace_all(text, "$1\"").into_owned();
    fixed = SINGLE_QUOTE_CLOSE.replace_all(&fixed, "\"$1").into_owned();
    fixed = PY_NONE.replace_all(&fixed, ": null").into_owned();
    fixed = PY_TRUE.replace_all(&fixed, ": true").into_owned();
    fixed = PY_FALSE.replace_all(&fixed, ": false").into_owned();
    fixed = BARE_KEY.replace_all(&fixed, r#"$1"$2":"#).into_owned();
    fixed = TRAILING_COMMA.replace_all(&fixed, "$1").into_owned();

    trace!(repaired = %fixed, "Repaired reply");
    fixed
}

fn record_from_object(object: &Map<String, Value>) -> PartialRecord {
    PartialRecord {
        customer_name: text_field(object, "customer_name"),
        statement_date: text_field(object, "statement_date"),
        payment_due_date: text_field(object, "payment_due_date"),
        total_amount_due: object.get("total_amount_due").and_then(amount_value),
        minimum_amount_due: object.get("minimum_amount_due").and_then(amount_value),
        credit_limit: object.get("credit_limit").and_then(amount_value),
        available_credit_limit: object.get("available_credit_limit").and_then(amount_value),
        card_number: text_field(object, "card_number"),
        transactions: object.get("transactions").and_then(transactions_value),
        reward_points_summary: object.get("reward_points_summary").and_then(rewards_value),
        bank_name: text_field(object, "bank_name"),
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    text_value(object.get(key)?)
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn amount_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

fn points_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

fn rewards_value(value: &Value) -> Option<RewardPointsSummary> {
    let object = value.as_object()?;
    let get = |key: &str| object.get(key).and_then(points_value);

    Some(RewardPointsSummary {
        opening_balance: get("opening_balance"),
        earned: get("earned"),
        closing_balance: get("closing_balance"),
    })
}

fn transactions_value(value: &Value) -> Option<Vec<Transaction>> {
    let items = value.as_array()?;
    let transactions = items
        .iter()
        .filter_map(|item| {
            let entry = item.as_object()?;
            let Some(amount) = entry.get("amount").and_then(amount_value) else {
                trace!(entry = %item, "Skipping transaction without a usable amount");
                return None;
            };
            Some(Transaction {
                date: entry.get("date").and_then(text_value).unwrap_or_default(),
                description: entry
                    .get("description")
                    .and_then(text_value)
                    .unwrap_or_default(),
                amount,
            })
        })
        .collect();
    Some(transactions)
}
