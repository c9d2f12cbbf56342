//! Field-priority merge of the model record with the pattern record.
//!
//! Identity fields and the card number come from the rules whenever they
//! found something valid. Amounts, dates and reward points come from the
//! model, with the rules only filling gaps.

use tracing::debug;

use crate::models::statement::{PartialRecord, RewardPointsSummary};
use crate::statement::validity::{is_valid, Validity};

/// Pattern value wins when valid.
fn prefer_pattern<T: Clone + Validity>(model: &mut Option<T>, pattern: &Option<T>) {
    if is_valid(pattern) {
        model.clone_from(pattern);
    }
}

/// Pattern value only fills a model gap.
fn fill<T: Clone + Validity>(model: &mut Option<T>, pattern: &Option<T>) {
    if !is_valid(model) && is_valid(pattern) {
        model.clone_from(pattern);
    }
}

/// Merge `pattern` into `model` and return the reconciled record.
pub fn merge(mut model: PartialRecord, pattern: &PartialRecord) -> PartialRecord {
    prefer_pattern(&mut model.customer_name, &pattern.customer_name);
    prefer_pattern(&mut model.card_number, &pattern.card_number);
    prefer_pattern(&mut model.bank_name, &pattern.bank_name);

    // Length is the only tie-break for transaction lists.
    if let Some(found) = pattern.transactions.as_ref().filter(|list| is_valid(*list)) {
        let model_len = model.transactions.as_ref().map_or(0, Vec::len);
        if found.len() > model_len {
            debug!(pattern = found.len(), model = model_len, "Using pattern transactions");
            model.transactions = Some(found.clone());
        }
    }

    fill(&mut model.total_amount_due, &pattern.total_amount_due);
    fill(&mut model.minimum_amount_due, &pattern.minimum_amount_due);
    fill(&mut model.credit_limit, &pattern.credit_limit);
    fill(&mut model.available_credit_limit, &pattern.available_credit_limit);

    fill(&mut model.statement_date, &pattern.statement_date);
    fill(&mut model.payment_due_date, &pattern.payment_due_date);

    if let Some(found) = pattern.reward_points_summary {
        let rewards = model
            .reward_points_summary
            .get_or_insert_with(RewardPointsSummary::default);
        fill(&mut rewards.opening_balance, &found.opening_balance);
        fill(&mut rewards.earned, &found.earned);
        fill(&mut rewards.closing_balance, &found.closing_balance);
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::Transaction;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn tx(description: &str) -> Transaction {
        Transaction {
            date: "01/03/2024".to_string(),
            description: description.to_string(),
            amount: Decimal::ONE_HUNDRED,
        }
    }

    #[test]
    fn test_pattern_card_number_overrides_model() {
        let model = PartialRecord {
            card_number: Some("1111222233334444".to_string()),
            ..PartialRecord::default()
        };
        let pattern = PartialRecord {
            card_number: Some("4281****9388".to_string()),
            ..PartialRecord::default()
        };

        let merged = merge(model, &pattern);
        assert_eq!(merged.card_number.as_deref(), Some("4281****9388"));
    }

    #[test]
    fn test_invalid_pattern_identity_keeps_model() {
        let model = PartialRecord {
            customer_name: Some("JOHN DOE".to_string()),
            ..PartialRecord::default()
        };
        let pattern = PartialRecord {
            customer_name: Some("N/A".to_string()),
            ..PartialRecord::default()
        };

        assert_eq!(merge(model, &pattern).customer_name.as_deref(), Some("JOHN DOE"));
    }

    #[test]
    fn test_amounts_are_fill_only() {
        let model = PartialRecord {
            total_amount_due: Some(Decimal::ZERO),
            credit_limit: None,
            ..PartialRecord::default()
        };
        let pattern = PartialRecord {
            total_amount_due: Some(Decimal::ONE_HUNDRED),
            credit_limit: Some(Decimal::ONE_THOUSAND),
            statement_date: Some("15/03/2024".to_string()),
            ..PartialRecord::default()
        };

        let merged = merge(model, &pattern);
        assert_eq!(merged.total_amount_due, Some(Decimal::ZERO));
        assert_eq!(merged.credit_limit, Some(Decimal::ONE_THOUSAND));
        assert_eq!(merged.statement_date.as_deref(), Some("15/03/2024"));
    }

    #[test]
    fn test_dates_replace_placeholder() {
        let model = PartialRecord {
            payment_due_date: Some("null".to_string()),
            ..PartialRecord::default()
        };
        let pattern = PartialRecord {
            payment_due_date: Some("04/04/2024".to_string()),
            ..PartialRecord::default()
        };

        assert_eq!(merge(model, &pattern).payment_due_date.as_deref(), Some("04/04/2024"));
    }

    #[test]
    fn test_transactions_need_strictly_longer_list() {
        let model = PartialRecord {
            transactions: Some(vec![tx("MODEL A"), tx("MODEL B")]),
            ..PartialRecord::default()
        };
        let same_len = PartialRecord {
            transactions: Some(vec![tx("RULE A"), tx("RULE B")]),
            ..PartialRecord::default()
        };
        let longer = PartialRecord {
            transactions: Some(vec![tx("RULE A"), tx("RULE B"), tx("RULE C")]),
            ..PartialRecord::default()
        };

        let kept = merge(model.clone(), &same_len);
        assert_eq!(kept.transactions.unwrap()[0].description, "MODEL A");

        let replaced = merge(model, &longer);
        assert_eq!(replaced.transactions.unwrap().len(), 3);
    }

    #[test]
    fn test_transactions_fill_missing_model_list() {
        let pattern = PartialRecord {
            transactions: Some(vec![tx("RULE A")]),
            ..PartialRecord::default()
        };
        assert_eq!(merge(PartialRecord::default(), &pattern).transactions.unwrap().len(), 1);
    }

    #[test]
    fn test_reward_sub_fields_fill_independently() {
        let model = PartialRecord {
            reward_points_summary: Some(RewardPointsSummary {
                opening_balance: Some(900),
                earned: None,
                closing_balance: None,
            }),
            ..PartialRecord::default()
        };
        let pattern = PartialRecord {
            reward_points_summary: Some(RewardPointsSummary {
                opening_balance: Some(1000),
                earned: Some(250),
                closing_balance: None,
            }),
            ..PartialRecord::default()
        };

        assert_eq!(
            merge(model, &pattern).reward_points_summary,
            Some(RewardPointsSummary {
                opening_balance: Some(900),
                earned: Some(250),
                closing_balance: None,
            })
        );
    }

    #[test]
    fn test_rewards_created_when_model_has_none() {
        let pattern = PartialRecord {
            reward_points_summary: Some(RewardPointsSummary {
                opening_balance: None,
                earned: Some(40),
                closing_balance: None,
            }),
            ..PartialRecord::default()
        };

        let merged = merge(PartialRecord::default(), &pattern);
        assert_eq!(merged.reward_points_summary.and_then(|r| r.earned), Some(40));
    }

    #[test]
    fn test_other_fields_untouched() {
        let model = PartialRecord {
            bank_name: Some("ICICI Bank".to_string()),
            ..PartialRecord::default()
        };
        let merged = merge(model.clone(), &PartialRecord::default());
        assert_eq!(merged, model);
    }
}
