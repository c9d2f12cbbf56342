//! Date extraction for credit card statements.
//!
//! Dates are returned exactly as printed; no normalization happens here.

use super::patterns::{PAYMENT_DUE_DATE, STATEMENT_DATE};
use super::{capture, FieldExtractor};

/// Labeled statement dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDates {
    /// Statement generation date.
    pub statement_date: Option<String>,
    /// Payment deadline.
    pub payment_due_date: Option<String>,
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = StatementDates;

    fn extract(&self, text: &str) -> Self::Output {
        StatementDates {
            statement_date: capture(&STATEMENT_DATE, text),
            payment_due_date: capture(&PAYMENT_DUE_DATE, text),
        }
    }
}

/// Extract labeled dates from statement text.
pub fn extract_dates(text: &str) -> StatementDates {
    DateExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_labeled_dates() {
        let text = r#"
            Statement Date: 15/03/2024
            Payment Due Date: 04/04/2024
        "#;

        let dates = extract_dates(text);

        assert_eq!(dates.statement_date.as_deref(), Some("15/03/2024"));
        assert_eq!(dates.payment_due_date.as_deref(), Some("04/04/2024"));
    }

    #[test]
    fn test_due_date_short_label() {
        let dates = extract_dates("DUE DATE 01/05/2024");
        assert_eq!(dates.payment_due_date.as_deref(), Some("01/05/2024"));
    }

    #[test]
    fn test_unsupported_format_is_absent() {
        let dates = extract_dates("Statement Date 2024-03-15");
        assert_eq!(dates.statement_date, None);
    }

    #[test]
    fn test_missing_dates() {
        assert_eq!(extract_dates("no dates here"), StatementDates::default());
    }
}
