//! Reward points extraction.

use regex::Regex;

use super::patterns::{REWARDS_FULL_SUMMARY, REWARDS_LABELED, REWARDS_SEQUENCE};
use super::FieldExtractor;
use crate::models::statement::RewardPointsSummary;
use crate::statement::formulas;

/// Reward points extractor.
///
/// Three layouts are tried from most to least specific. The first match
/// supplies opening and earned from its first two groups and the closing
/// balance from its last group, whatever the layout.
pub struct RewardPointsExtractor;

impl RewardPointsExtractor {
    pub fn new() -> Self {
        Self
    }

    fn layouts() -> [&'static Regex; 3] {
        [&REWARDS_FULL_SUMMARY, &REWARDS_LABELED, &REWARDS_SEQUENCE]
    }
}

impl Default for RewardPointsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for RewardPointsExtractor {
    type Output = RewardPointsSummary;

    fn extract(&self, text: &str) -> Self::Output {
        let mut summary = Self::layouts()
            .into_iter()
            .find_map(|re| re.captures(text))
            .map(|caps| {
                let points = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i64>().ok());
                RewardPointsSummary {
                    opening_balance: points(1),
                    earned: points(2),
                    closing_balance: points(caps.len() - 1),
                }
            })
            .unwrap_or_default();

        if summary.closing_balance.is_none() {
            if let (Some(opening), Some(earned)) = (summary.opening_balance, summary.earned) {
                summary.closing_balance = formulas::closing_points(opening, earned);
            }
        }

        summary
    }
}

/// Extract the reward points summary from statement text.
pub fn extract_reward_points(text: &str) -> RewardPointsSummary {
    RewardPointsExtractor::new().extract(text)
}
