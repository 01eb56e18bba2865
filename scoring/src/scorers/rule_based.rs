use std::sync::Arc;

use crate::{
    model::{RiskAssessment, RiskFactor, TransactionAttributes},
    scorers::{
        card_pattern::CardPatternValidator,
        lists::{ScoringLists, DEFAULT_LISTS},
        merchant::MerchantSignals,
        Scorer,
    },
    timestamp,
};

const VERY_HIGH_AMOUNT: f64 = 10_000.0;
const HIGH_AMOUNT: f64 = 5_000.0;
const MODERATE_AMOUNT: f64 = 1_000.0;

const EARLIEST_USUAL_HOUR: u32 = 6;
const LATEST_USUAL_HOUR: u32 = 22;

/// Explainable heuristic scorer over amount, merchant, location, card and time.
#[derive(Debug, Clone)]
pub struct RuleScorer {
    lists: Arc<ScoringLists>,
    card_validator: CardPatternValidator,
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self::new(DEFAULT_LISTS.clone())
    }
}

impl RuleScorer {
    pub fn new(lists: Arc<ScoringLists>) -> Self {
        Self {
            card_validator: CardPatternValidator::new(lists.clone()),
            lists,
        }
    }

    fn score_amount(&self, amount: f64, assessment: &mut RiskAssessment) {
        if amount > VERY_HIGH_AMOUNT {
            assessment.add(30, RiskFactor::VeryHighAmount);
        } else if amount > HIGH_AMOUNT {
            assessment.add(20, RiskFactor::HighAmount);
        } else if amount > MODERATE_AMOUNT {
            assessment.add(10, RiskFactor::ModerateAmount);
        }
    }

    fn score_merchant(&self, merchant: &str, assessment: &mut RiskAssessment) {
        let signals = MerchantSignals::inspect(merchant, &self.lists);
        if signals.whitelisted {
            return;
        }

        if signals.suspicious_keyword {
            assessment.add(25, RiskFactor::SuspiciousMerchantName);
        }
        if signals.very_short {
            assessment.add(20, RiskFactor::ShortMerchantName);
        }
        match signals.business_pattern_count {
            0 => {}
            1 => assessment.add(15, RiskFactor::MerchantPattern),
            _ => assessment.add(30, RiskFactor::MultipleMerchantPatterns),
        }
        if signals.single_case_without_domain {
            assessment.add(10, RiskFactor::UnusualMerchantFormat);
        }
        if signals.repeated_characters {
            assessment.add(25, RiskFactor::RepeatedMerchantCharacters);
        }
        if signals.contains_digit {
            assessment.add(15, RiskFactor::DigitsInMerchantName);
        }
        if signals.short_generic_name {
            assessment.add(20, RiskFactor::GenericMerchantName);
        }
    }

    fn score_location(&self, location: &str, assessment: &mut RiskAssessment) {
        if self.lists.mentions_foreign(location) {
            assessment.add(20, RiskFactor::InternationalTransaction);
        }
    }

    fn score_card(&self, card_number: &str, assessment: &mut RiskAssessment) {
        let card = self.card_validator.validate(card_number);
        assessment.score += card.risk;
        assessment.factors.extend(card.reasons);
    }

    fn score_time(&self, raw_timestamp: &str, assessment: &mut RiskAssessment) {
        // An unparseable timestamp only means this rule cannot fire.
        match timestamp::hour_of_day(raw_timestamp) {
            Ok(hour) if !(EARLIEST_USUAL_HOUR..=LATEST_USUAL_HOUR).contains(&hour) => {
                assessment.add(10, RiskFactor::UnusualTime);
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(timestamp = raw_timestamp, error = %e, "skipping time-of-day rule"),
        }
    }
}

impl Scorer for RuleScorer {
    fn score(&self, transaction: &TransactionAttributes) -> RiskAssessment {
        let mut assessment = RiskAssessment::default();

        self.score_amount(transaction.amount, &mut assessment);
        self.score_merchant(&transaction.merchant, &mut assessment);
        self.score_location(&transaction.location, &mut assessment);
        self.score_card(&transaction.card_number, &mut assessment);
        self.score_time(&transaction.timestamp, &mut assessment);

        assessment
    }
}
