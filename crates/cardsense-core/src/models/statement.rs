//! Credit card statement data models.
//!
//! [`CanonicalRecord`] is the single output shape of a reconciliation: every
//! key is always present and unknown values are `null`. [`PartialRecord`] is
//! the looser shape produced by one extractor (pattern rules or the decoded
//! model reply) before merging and completion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fully keyed statement record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Cardholder name.
    pub customer_name: Option<String>,

    /// Statement generation date, format as found in the document.
    pub statement_date: Option<String>,

    /// Payment deadline, format as found in the document.
    pub payment_due_date: Option<String>,

    /// Total balance owed.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub total_amount_due: Option<Decimal>,

    /// Minimum payment required.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub minimum_amount_due: Option<Decimal>,

    /// Total credit line.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub credit_limit: Option<Decimal>,

    /// Remaining credit.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub available_credit_limit: Option<Decimal>,

    /// Card number, possibly masked (e.g. `4281****9388`).
    pub card_number: Option<String>,

    /// Transactions in document order.
    pub transactions: Vec<Transaction>,

    /// Reward points; always present as a three-key record.
    pub reward_points_summary: RewardPointsSummary,

    /// Issuing bank.
    pub bank_name: Option<String>,
}

/// A single statement transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date as printed.
    pub date: String,

    /// Merchant / description text.
    pub description: String,

    /// Signed amount; credits are negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Reward points block of a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPointsSummary {
    pub opening_balance: Option<i64>,
    pub earned: Option<i64>,
    pub closing_balance: Option<i64>,
}

/// A statement record where any field may be structurally missing.
///
/// `None` on a field means the extractor produced nothing for it at all;
/// `Some(vec![])` for transactions means it produced an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartialRecord {
    pub customer_name: Option<String>,
    pub statement_date: Option<String>,
    pub payment_due_date: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_amount_due: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub minimum_amount_due: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub credit_limit: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub available_credit_limit: Option<Decimal>,
    pub card_number: Option<String>,
    pub transactions: Option<Vec<Transaction>>,
    pub reward_points_summary: Option<RewardPointsSummary>,
    pub bank_name: Option<String>,
}

impl CanonicalRecord {
    /// Names of the top-level keys, in output order.
    pub const FIELDS: [&'static str; 11] = [
        "customer_name",
        "statement_date",
        "payment_due_date",
        "total_amount_due",
        "minimum_amount_due",
        "credit_limit",
        "available_credit_limit",
        "card_number",
        "transactions",
        "reward_points_summary",
        "bank_name",
    ];

    /// The all-absent record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// How many of the scalar fields carry a value.
    pub fn coverage(&self) -> (usize, usize) {
        let total = 9;
        let filled = [
            self.customer_name.is_some(),
            self.statement_date.is_some(),
            self.payment_due_date.is_some(),
            self.total_amount_due.is_some(),
            self.minimum_amount_due.is_some(),
            self.credit_limit.is_some(),
            self.available_credit_limit.is_some(),
            self.card_number.is_some(),
            self.bank_name.is_some(),
        ]
        .iter()
        .filter(|&&v| v)
        .count();
        (filled, total)
    }
}

impl PartialRecord {
    /// The canonical all-absent shape: every nested container present but empty.
    pub fn fallback() -> Self {
        CanonicalRecord::empty().into()
    }
}

impl From<CanonicalRecord> for PartialRecord {
    fn from(record: CanonicalRecord) -> Self {
        Self {
            customer_name: record.customer_name,
            statement_date: record.statement_date,
            payment_due_date: record.payment_due_date,
            total_amount_due: record.total_amount_due,
            minimum_amount_due: record.minimum_amount_due,
            credit_limit: record.credit_limit,
            available_credit_limit: record.available_credit_limit,
            card_number: record.card_number,
            transactions: Some(record.transactions),
            reward_points_summary: Some(record.reward_points_summary),
            bank_name: record.bank_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_record_has_every_key() {
        let json = serde_json::to_value(CanonicalRecord::empty()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 11);
        for field in CanonicalRecord::FIELDS {
            assert!(obj.contains_key(field), "missing {field}");
        }
        assert!(obj["customer_name"].is_null());
        assert_eq!(obj["transactions"], serde_json::json!([]));

        let rewards = obj["reward_points_summary"].as_object().unwrap();
        assert_eq!(rewards.len(), 3);
        assert!(rewards.values().all(|v| v.is_null()));
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let record = CanonicalRecord {
            total_amount_due: Some(Decimal::from_str("12345.67").unwrap()),
            transactions: vec![Transaction {
                date: "01/02/2024".to_string(),
                description: "REFUND".to_string(),
                amount: Decimal::from_str("-250.50").unwrap(),
            }],
            ..CanonicalRecord::empty()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["total_amount_due"], serde_json::json!(12345.67));
        assert_eq!(json["transactions"][0]["amount"], serde_json::json!(-250.5));
    }

    #[test]
    fn test_coverage() {
        let record = CanonicalRecord {
            customer_name: Some("JOHN DOE".to_string()),
            bank_name: Some("HDFC Bank".to_string()),
            ..CanonicalRecord::empty()
        };
        assert_eq!(record.coverage(), (2, 9));
    }
}
