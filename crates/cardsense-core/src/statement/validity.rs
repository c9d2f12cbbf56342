//! Presence test used by merging and completion.
//!
//! A value is valid unless it is absent, an empty list or mapping, or a
//! string that reads as a placeholder (`null`, `na`, `n/a`, empty; case and
//! surrounding whitespace ignored). Numeric zero is valid.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::statement::{RewardPointsSummary, Transaction};

const PLACEHOLDERS: [&str; 4] = ["null", "na", "n/a", ""];

/// Anything the validity oracle can judge.
pub trait Validity {
    /// Whether the value counts as present.
    fn is_valid(&self) -> bool;
}

/// Whether `value` counts as present for merge and back-fill purposes.
pub fn is_valid<V: Validity + ?Sized>(value: &V) -> bool {
    value.is_valid()
}

impl Validity for str {
    fn is_valid(&self) -> bool {
        let trimmed = self.trim();
        !PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p))
    }
}

impl Validity for String {
    fn is_valid(&self) -> bool {
        self.as_str().is_valid()
    }
}

impl Validity for Decimal {
    fn is_valid(&self) -> bool {
        true
    }
}

impl Validity for i64 {
    fn is_valid(&self) -> bool {
        true
    }
}

impl Validity for f64 {
    fn is_valid(&self) -> bool {
        true
    }
}

impl Validity for Transaction {
    fn is_valid(&self) -> bool {
        true
    }
}

/// A reward summary is a mapping; it only counts as empty when no sub-field is set.
impl Validity for RewardPointsSummary {
    fn is_valid(&self) -> bool {
        self.opening_balance.is_some() || self.earned.is_some() || self.closing_balance.is_some()
    }
}

impl<T: Validity> Validity for [T] {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Validity> Validity for Vec<T> {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Validity> Validity for Option<T> {
    fn is_valid(&self) -> bool {
        self.as_ref().is_some_and(Validity::is_valid)
    }
}

impl<T: Validity + ?Sized> Validity for &T {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
}

impl Validity for Value {
    fn is_valid(&self) -> bool {
        match self {
            Value::Null => false,
            Value::String(s) => s.is_valid(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_is_valid() {
        assert!(is_valid(&json!(0)));
        assert!(is_valid(&json!(0.0)));
        assert!(is_valid(&Decimal::ZERO));
        assert!(is_valid(&Some(0i64)));
    }

    #[test]
    fn test_placeholders_are_invalid() {
        for s in ["", "  ", "N/A", "n/a", "NA", "null", " NULL "] {
            assert!(!is_valid(s), "{s:?} should be invalid");
            assert!(!is_valid(&json!(s)));
        }
        assert!(is_valid("nan"));
        assert!(is_valid("HDFC Bank"));
    }

    #[test]
    fn test_empty_containers_are_invalid() {
        assert!(!is_valid(&json!([])));
        assert!(!is_valid(&json!({})));
        assert!(!is_valid(&Vec::<Transaction>::new()));
        assert!(!is_valid(&RewardPointsSummary::default()));
        assert!(is_valid(&json!([1])));
        assert!(is_valid(&json!({"earned": null})));
    }

    #[test]
    fn test_absence_is_invalid() {
        assert!(!is_valid(&Value::Null));
        assert!(!is_valid(&None::<String>));
        assert!(!is_valid(&Some(String::from("n/a"))));
        assert!(is_valid(&Some(String::from("4281****9388"))));
    }
}
