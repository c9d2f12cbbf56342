//! Customer and bank identity extraction.

use super::patterns::{
    BANK_LIMITED, CARDHOLDER_LABELED, CARD_SERVICES, CUSTOMER_NAME_LABELED, KNOWN_BANKS,
    NAME_BEFORE_CARD_MENTION, NAME_LABELED,
};
use super::{capture, first_match, Attempt, FieldExtractor};

/// Customer and issuer names found in a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementIdentity {
    pub customer_name: Option<String>,
    pub bank_name: Option<String>,
}

/// Customer/bank identity extractor.
pub struct IdentityExtractor;

/// Name patterns, from explicit label down to "the line before a Credit Card mention".
const NAME_ATTEMPTS: [Attempt<String>; 4] = [
    |text| capture(&CUSTOMER_NAME_LABELED, text),
    |text| capture(&CARDHOLDER_LABELED, text),
    |text| capture(&NAME_LABELED, text),
    |text| capture(&NAME_BEFORE_CARD_MENTION, text),
];

/// Bank patterns: curated issuers, then "X Bank Limited", then "X Card Services".
const BANK_ATTEMPTS: [Attempt<String>; 3] = [
    |text| capture(&KNOWN_BANKS, text),
    |text| capture(&BANK_LIMITED, text),
    |text| capture(&CARD_SERVICES, text),
];

impl IdentityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdentityExtractor {
    type Output = StatementIdentity;

    fn extract(&self, text: &str) -> Self::Output {
        StatementIdentity {
            customer_name: first_match(text, &NAME_ATTEMPTS),
            bank_name: first_match(text, &BANK_ATTEMPTS),
        }
    }
}

/// Extract customer and bank names from statement text.
pub fn extract_identity(text: &str) -> StatementIdentity {
    IdentityExtractor::new().extract(text)
}
