//! Common regex patterns for credit card statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Card numbers, most specific first
    pub static ref CARD_NUMBER_MASKED: Regex = Regex::new(
        r"(?i)Card Number\s*:?\s*(\d{4}\*+\d{4})"
    ).unwrap();

    pub static ref CARD_NO_MASKED: Regex = Regex::new(
        r"(?i)Card No\s*:?\s*(\d{4}[\s*]+\d{4})"
    ).unwrap();

    pub static ref CARD_NUMBER_FULL: Regex = Regex::new(
        r"(?i)Card Number\s*:?\s*(\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4})"
    ).unwrap();

    pub static ref CARD_MASKED_ANYWHERE: Regex = Regex::new(
        r"\b\d{4}\*+\d{4}\b"
    ).unwrap();

    // Labeled amounts: optional currency glyph, thousands separators
    pub static ref TOTAL_AMOUNT_DUE: Regex = Regex::new(
        r"(?i)(?:Total Amount Due|Total Due|New Balance)[\s:]*(?:₹|\$|Rs\.?|INR)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref MINIMUM_AMOUNT_DUE: Regex = Regex::new(
        r"(?i)(?:Minimum Amount Due|Min Amount Due|Minimum Due|Min Due)[\s:]*(?:₹|\$|Rs\.?|INR)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref CREDIT_LIMIT: Regex = Regex::new(
        r"(?i)(?:Credit Limit|Limit)[\s:]*(?:₹|\$|Rs\.?|INR)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref AVAILABLE_CREDIT_LIMIT: Regex = Regex::new(
        r"(?i)(?:Available Credit Limit|Available Credit|Available Limit)[\s:]*(?:₹|\$|Rs\.?|INR)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref PREVIOUS_BALANCE: Regex = Regex::new(
        r"(?i)(?:Opening Balance|Previous Balance)[\s:]*(?:₹|\$|Rs\.?|INR)?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    // Reward points, most specific first
    pub static ref REWARDS_FULL_SUMMARY: Regex = Regex::new(
        r"(?is)REWARDS\s*SUMMARY\s*Opening Balance\s*(\d+)\s*Rewards Earned\s*(\d+)\s*Redeemed/Adjusted\s*(\d+)\s*Closing Balance\s*(\d+)"
    ).unwrap();

    pub static ref REWARDS_LABELED: Regex = Regex::new(
        r"(?is)Reward Points.*?Opening Balance\s*(\d+).*?Earned\s*(\d+).*?Closing Balance\s*(\d+)"
    ).unwrap();

    pub static ref REWARDS_SEQUENCE: Regex = Regex::new(
        r"(?is)Opening Balance\s*(\d+)\s*Rewards Earned\s*(\d+)\s*Closing Balance\s*(\d+)"
    ).unwrap();

    // Transactions
    pub static ref TRANSACTIONS_START: Regex = Regex::new(
        r"(?i)YOUR TRANSACTIONS"
    ).unwrap();

    pub static ref TRANSACTIONS_END: Regex = Regex::new(
        r"(?i)KEY OFFERS|Page \d+ of \d+"
    ).unwrap();

    pub static ref TRANSACTION_ROW: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})\s+([A-Za-z0-9\s.\-&]+?)\s+([0-9,]+\.?[0-9]*)\s*(CR)?"
    ).unwrap();

    // Customer name, most specific first
    pub static ref CUSTOMER_NAME_LABELED: Regex = Regex::new(
        r"(?imR)Customer Name[ \t]*:?[ \t]*([A-Za-z][A-Za-z \t.]*)$"
    ).unwrap();

    pub static ref CARDHOLDER_LABELED: Regex = Regex::new(
        r"(?imR)Cardholder[ \t]*:?[ \t]*([A-Za-z][A-Za-z \t.]*)$"
    ).unwrap();

    pub static ref NAME_LABELED: Regex = Regex::new(
        r"(?imR)Name[ \t]*:?[ \t]*([A-Za-z][A-Za-z \t.]*)$"
    ).unwrap();

    pub static ref NAME_BEFORE_CARD_MENTION: Regex = Regex::new(
        r"(?imR)^([A-Za-z][A-Za-z \t.]*)\r?\n.*?Credit Card"
    ).unwrap();

    // Bank names, most specific first
    pub static ref KNOWN_BANKS: Regex = Regex::new(
        r"(?i)(HDFC Bank|ICICI Bank|Axis Bank|IDFC FIRST Bank|RBL Bank|SBI Card|Kotak Bank|Standard Chartered)"
    ).unwrap();

    pub static ref BANK_LIMITED: Regex = Regex::new(
        r"(?i)([A-Za-z]+ Bank Limited)"
    ).unwrap();

    pub static ref CARD_SERVICES: Regex = Regex::new(
        r"(?i)([A-Za-z]+ Card Services)"
    ).unwrap();

    // Labeled dates
    pub static ref STATEMENT_DATE: Regex = Regex::new(
        r"(?i)(?:Statement Date|Date)[\s:]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref PAYMENT_DUE_DATE: Regex = Regex::new(
        r"(?i)(?:Payment Due Date|Due Date)[\s:]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();
}
