//! Derivation formulas shared by the extractors and the completer.
//!
//! Each returns `None` when the arithmetic would overflow, so a derived field
//! stays absent instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

/// `credit_limit - total_amount_due`.
pub fn available_credit(credit_limit: Decimal, total_amount_due: Decimal) -> Option<Decimal> {
    credit_limit.checked_sub(total_amount_due)
}

/// `opening_balance + earned`.
pub fn closing_points(opening_balance: i64, earned: i64) -> Option<i64> {
    opening_balance.checked_add(earned)
}

/// Estimated minimum payment: 5% of the total due, rounded half-up to two places.
pub fn minimum_due(total_amount_due: Decimal) -> Option<Decimal> {
    total_amount_due
        .checked_mul(Decimal::new(5, 2))
        .map(|m| m.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_available_credit() {
        assert_eq!(
            available_credit(Decimal::from(50_000), Decimal::from_str("12345.67").unwrap()),
            Some(Decimal::from_str("37654.33").unwrap())
        );
    }

    #[test]
    fn test_closing_points() {
        assert_eq!(closing_points(1000, 250), Some(1250));
        assert_eq!(closing_points(i64::MAX, 1), None);
    }

    #[test]
    fn test_minimum_due() {
        assert_eq!(minimum_due(Decimal::from(2000)), Some(Decimal::from_str("100.00").unwrap()));
        assert_eq!(
            minimum_due(Decimal::from_str("12345.67").unwrap()),
            Some(Decimal::from_str("617.28").unwrap())
        );
    }

    #[test]
    fn test_minimum_due_rounds_half_up() {
        // 5% of 0.10 is exactly 0.005
        assert_eq!(minimum_due(Decimal::from_str("0.10").unwrap()), Some(Decimal::from_str("0.01").unwrap()));
        // 5% of 0.30 is exactly 0.015
        assert_eq!(minimum_due(Decimal::from_str("0.30").unwrap()), Some(Decimal::from_str("0.02").unwrap()));
    }
}
