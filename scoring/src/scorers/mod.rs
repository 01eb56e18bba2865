pub mod card_pattern;
pub mod lists;
pub mod merchant;
pub mod rule_based;

pub use card_pattern::CardPatternValidator;
pub use lists::ScoringLists;
pub use merchant::MerchantSignals;
pub use rule_based::RuleScorer;

use crate::model::{RiskAssessment, TransactionAttributes};

pub trait Scorer: Send + Sync {
    fn score(&self, transaction: &TransactionAttributes) -> RiskAssessment;
}
