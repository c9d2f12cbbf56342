//! Completion of a merged record into the canonical shape.
//!
//! Only valid fields survive the overlay onto the all-absent record; then
//! the three derivations run in a fixed order: available credit, reward
//! closing balance, minimum amount due. Each derivation only fills an
//! absent field, so completing a completed record is a no-op.

use tracing::debug;

use crate::models::statement::{CanonicalRecord, PartialRecord};
use crate::statement::formulas;
use crate::statement::validity::{is_valid, Validity};

fn keep_valid<T: Validity>(value: Option<T>) -> Option<T> {
    value.filter(|v| is_valid(v))
}

/// Produce the canonical record from a merge result.
pub fn complete(merged: PartialRecord) -> CanonicalRecord {
    let mut record = CanonicalRecord {
        customer_name: keep_valid(merged.customer_name),
        statement_date: keep_valid(merged.statement_date),
        payment_due_date: keep_valid(merged.payment_due_date),
        total_amount_due: keep_valid(merged.total_amount_due),
        minimum_amount_due: keep_valid(merged.minimum_amount_due),
        credit_limit: keep_valid(merged.credit_limit),
        available_credit_limit: keep_valid(merged.available_credit_limit),
        card_number: keep_valid(merged.card_number),
        transactions: keep_valid(merged.transactions).unwrap_or_default(),
        reward_points_summary: keep_valid(merged.reward_points_summary).unwrap_or_default(),
        bank_name: keep_valid(merged.bank_name),
    };

    if record.available_credit_limit.is_none() {
        if let (Some(limit), Some(total)) = (record.credit_limit, record.total_amount_due) {
            record.available_credit_limit = formulas::available_credit(limit, total);
            debug!(available = ?record.available_credit_limit, "Derived available credit");
        }
    }

    let rewards = &mut record.reward_points_summary;
    if rewards.closing_balance.is_none() {
        if let (Some(opening), Some(earned)) = (rewards.opening_balance, rewards.earned) {
            rewards.closing_balance = formulas::closing_points(opening, earned);
            debug!(closing = ?rewards.closing_balance, "Derived reward closing balance");
        }
    }

    if record.minimum_amount_due.is_none() {
        if let Some(total) = record.total_amount_due {
            record.minimum_amount_due = formulas::minimum_due(total);
            debug!(minimum = ?record.minimum_amount_due, "Estimated minimum amount due");
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::{RewardPointsSummary, Transaction};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_input_gives_canonical_empty() {
        assert_eq!(complete(PartialRecord::default()), CanonicalRecord::empty());
        assert_eq!(complete(PartialRecord::fallback()), CanonicalRecord::empty());
    }

    #[test]
    fn test_placeholders_are_dropped() {
        let merged = PartialRecord {
            customer_name: Some("N/A".to_string()),
            bank_name: Some(" null ".to_string()),
            card_number: Some("4281****9388".to_string()),
            ..PartialRecord::default()
        };

        let record = complete(merged);
        assert_eq!(record.customer_name, None);
        assert_eq!(record.bank_name, None);
        assert_eq!(record.card_number.as_deref(), Some("4281****9388"));
    }

    #[test]
    fn test_available_credit_derivation() {
        let merged = PartialRecord {
            credit_limit: Some(dec("50000")),
            total_amount_due: Some(dec("12345.67")),
            ..PartialRecord::default()
        };

        let record = complete(merged);
        assert_eq!(record.available_credit_limit, Some(dec("37654.33")));
        assert_eq!(record.minimum_amount_due, Some(dec("617.28")));
    }

    #[test]
    fn test_reward_closing_derivation() {
        let merged = PartialRecord {
            reward_points_summary: Some(RewardPointsSummary {
                opening_balance: Some(1000),
                earned: Some(250),
                closing_balance: None,
            }),
            ..PartialRecord::default()
        };

        assert_eq!(complete(merged).reward_points_summary.closing_balance, Some(1250));
    }

    #[test]
    fn test_minimum_due_fallback() {
        let merged = PartialRecord {
            total_amount_due: Some(dec("2000")),
            ..PartialRecord::default()
        };

        let record = complete(merged);
        assert_eq!(record.minimum_amount_due, Some(dec("100.00")));
        assert_eq!(record.available_credit_limit, None);
    }

    #[test]
    fn test_printed_values_are_not_recomputed() {
        let merged = PartialRecord {
            credit_limit: Some(dec("50000")),
            total_amount_due: Some(dec("2000")),
            available_credit_limit: Some(dec("1")),
            minimum_amount_due: Some(Decimal::ZERO),
            ..PartialRecord::default()
        };

        let record = complete(merged);
        assert_eq!(record.available_credit_limit, Some(dec("1")));
        assert_eq!(record.minimum_amount_due, Some(Decimal::ZERO));
    }

    #[test]
    fn test_completion_is_idempotent() {
        let merged = PartialRecord {
            customer_name: Some("JOHN DOE".to_string()),
            credit_limit: Some(dec("50000")),
            total_amount_due: Some(dec("12345.67")),
            transactions: Some(vec![Transaction {
                date: "01/03/2024".to_string(),
                description: "AMAZON".to_string(),
                amount: dec("1499.00"),
            }]),
            reward_points_summary: Some(RewardPointsSummary {
                opening_balance: Some(1000),
                earned: Some(250),
                closing_balance: None,
            }),
            ..PartialRecord::default()
        };

        let once = complete(merged);
        let twice = complete(PartialRecord::from(once.clone()));
        assert_eq!(once, twice);
    }
}
