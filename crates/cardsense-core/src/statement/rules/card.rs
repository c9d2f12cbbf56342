//! Card number extraction.

use super::patterns::{
    CARD_MASKED_ANYWHERE, CARD_NO_MASKED, CARD_NUMBER_FULL, CARD_NUMBER_MASKED,
};
use super::{capture, first_match, Attempt, FieldExtractor};

/// Card number extractor.
///
/// Patterns are tried in strict order and the first hit wins:
/// 1. `Card Number` + masked number (`4281****9388`)
/// 2. `Card No` + first/last four split by mask or whitespace
/// 3. `Card Number` + full 16 digits, grouped by spaces or hyphens
/// 4. a bare masked number anywhere in the text
pub struct CardNumberExtractor;

const ATTEMPTS: [Attempt<String>; 4] = [
    |text| capture(&CARD_NUMBER_MASKED, text),
    |text| capture(&CARD_NO_MASKED, text).map(|n| strip_chars(&n, |c| c.is_whitespace())),
    |text| {
        capture(&CARD_NUMBER_FULL, text)
            .map(|n| strip_chars(&n, |c| c.is_whitespace() || c == '-'))
    },
    |text| CARD_MASKED_ANYWHERE.find(text).map(|m| m.as_str().to_string()),
];

impl CardNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CardNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CardNumberExtractor {
    type Output = Option<String>;

    fn extract(&self, text: &str) -> Self::Output {
        first_match(text, &ATTEMPTS)
    }
}

/// Extract the card number from statement text.
pub fn extract_card_number(text: &str) -> Option<String> {
    CardNumberExtractor::new().extract(text)
}

fn strip_chars(s: &str, drop: impl Fn(char) -> bool) -> String {
    s.chars().filter(|c| !drop(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_masked_number() {
        assert_eq!(
            extract_card_number("Card Number: 4281****9388"),
            Some("4281****9388".to_string())
        );
    }

    #[test]
    fn test_card_no_with_space_separator() {
        assert_eq!(
            extract_card_number("Card No: 1234 5678"),
            Some("12345678".to_string())
        );
        assert_eq!(
            extract_card_number("CARD NO 1234 **** 5678"),
            Some("1234****5678".to_string())
        );
    }

    #[test]
    fn test_full_number_separators_stripped() {
        assert_eq!(
            extract_card_number("Card Number: 1234-5678-9012-3456"),
            Some("1234567890123456".to_string())
        );
        assert_eq!(
            extract_card_number("card number 1234 5678 9012 3456"),
            Some("1234567890123456".to_string())
        );
    }

    #[test]
    fn test_masked_number_anywhere() {
        assert_eq!(
            extract_card_number("Your card 5522********0017 was billed"),
            Some("5522********0017".to_string())
        );
    }

    #[test]
    fn test_first_pattern_wins() {
        let text = "Card Number: 1111****2222\nOther card 3333****4444";
        assert_eq!(extract_card_number(text), Some("1111****2222".to_string()));
    }

    #[test]
    fn test_no_card_number() {
        assert_eq!(extract_card_number("Statement for March"), None);
    }
}
