use common::config::ListsConfig;
use once_cell::sync::Lazy;
use std::{collections::HashSet, sync::Arc};

const LEGITIMATE_MERCHANTS: &[&str] = &[
    "netflix.com", "amazon.com", "spotify.com", "youtube.com", "google.com",
    "apple.com", "microsoft.com", "facebook.com", "twitter.com", "instagram.com",
    "linkedin.com", "github.com", "stackoverflow.com", "reddit.com", "discord.com",
    "zoom.us", "slack.com", "dropbox.com", "googleplay.com", "itunes.com",
    "steam.com", "origin.com", "battle.net", "playstation.com", "xbox.com",
    "nintendo.com", "hulu.com", "disneyplus.com", "hbo.com", "paramount.com",
    "peacock.com", "crunchyroll.com", "funimation.com", "vrv.com", "roku.com",
    "walmart.com", "target.com", "bestbuy.com", "homedepot.com", "lowes.com",
    "costco.com", "samsclub.com", "kroger.com", "safeway.com", "albertsons.com",
    "publix.com", "wegmans.com", "traderjoes.com", "wholefoods.com", "sprouts.com",
    "starbucks.com", "mcdonalds.com", "burgerking.com", "wendys.com", "tacobell.com",
    "dominos.com", "pizzahut.com", "subway.com", "chipotle.com", "panera.com",
    "chickfila.com", "kfc.com", "popeyes.com", "arbys.com", "sonic.com",
    "dunkindonuts.com", "krispykreme.com", "cinnabon.com", "baskinrobbins.com",
    "coldstone.com", "benjerry.com", "haagendazs.com", "talenti.com", "bluebell.com",
];

const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "unknown", "test", "suspicious", "fraud", "fake", "invalid", "dummy", "sample",
];

const BUSINESS_PATTERNS: &[&str] = &[
    "inc", "corp", "llc", "ltd", "co", "company", "business", "enterprise",
    "group", "associates", "partners", "services", "solutions", "tech",
    "digital", "online", "web", "net", "cyber", "virtual",
];

const GENERIC_NAMES: &[&str] = &["store", "shop", "market", "mart", "center", "place", "spot"];

const FOREIGN_INDICATORS: &[&str] = &["international", "foreign", "overseas", "abroad"];

const LOCAL_INDICATORS: &[&str] = &["local"];

const DENYLISTED_CARDS: &[&str] = &["1234567890123456", "1111111111111111", "0000000000000000"];

const SUSPICIOUS_STARTS: &[&str] = &[
    "0000", "1111", "2222", "3333", "4444", "5555", "6666", "7777", "8888", "9999",
];

const TEST_CARDS: &[&str] = &[
    "4111111111111111",
    "5555555555554444",
    "378282246310005",
    "6011111111111117",
    "4000000000000002",
    "5105105105105100",
];

/// Process-wide default tables, built once and shared read-only.
pub static DEFAULT_LISTS: Lazy<Arc<ScoringLists>> = Lazy::new(|| Arc::new(ScoringLists::default()));

/// Whitelists, denylists and keyword tables used by the scorers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringLists {
    pub legitimate_merchants: HashSet<String>,
    pub suspicious_keywords: Vec<String>,
    pub business_patterns: Vec<String>,
    pub generic_names: Vec<String>,
    pub foreign_indicators: Vec<String>,
    pub local_indicators: Vec<String>,
    pub denylisted_cards: HashSet<String>,
    pub suspicious_starts: HashSet<String>,
    pub test_cards: HashSet<String>,
}

impl Default for ScoringLists {
    fn default() -> Self {
        Self {
            legitimate_merchants: keywords(LEGITIMATE_MERCHANTS).collect(),
            suspicious_keywords: keywords(SUSPICIOUS_KEYWORDS).collect(),
            business_patterns: keywords(BUSINESS_PATTERNS).collect(),
            generic_names: keywords(GENERIC_NAMES).collect(),
            foreign_indicators: keywords(FOREIGN_INDICATORS).collect(),
            local_indicators: keywords(LOCAL_INDICATORS).collect(),
            denylisted_cards: cards(DENYLISTED_CARDS).collect(),
            suspicious_starts: cards(SUSPICIOUS_STARTS).collect(),
            test_cards: cards(TEST_CARDS).collect(),
        }
    }
}

impl ScoringLists {
    /// Built-in tables with any configured replacements applied.
    pub fn from_config(config: &ListsConfig) -> Self {
        let mut lists = Self::default();

        if let Some(values) = &config.legitimate_merchants {
            lists.legitimate_merchants = keywords(values).collect();
        }
        if let Some(values) = &config.suspicious_keywords {
            lists.suspicious_keywords = keywords(values).collect();
        }
        if let Some(values) = &config.business_patterns {
            lists.business_patterns = keywords(values).collect();
        }
        if let Some(values) = &config.generic_names {
            lists.generic_names = keywords(values).collect();
        }
        if let Some(values) = &config.foreign_indicators {
            lists.foreign_indicators = keywords(values).collect();
        }
        if let Some(values) = &config.local_indicators {
            lists.local_indicators = keywords(values).collect();
        }
        if let Some(values) = &config.denylisted_cards {
            lists.denylisted_cards = cards(values).collect();
        }
        if let Some(values) = &config.suspicious_starts {
            lists.suspicious_starts = cards(values).collect();
        }
        if let Some(values) = &config.test_cards {
            lists.test_cards = cards(values).collect();
        }

        lists
    }

    pub fn is_legitimate_merchant(&self, merchant_lower: &str) -> bool {
        self.legitimate_merchants.contains(merchant_lower)
    }

    pub fn mentions_foreign(&self, location: &str) -> bool {
        contains_any(&location.to_lowercase(), &self.foreign_indicators)
    }

    pub fn mentions_local(&self, location: &str) -> bool {
        contains_any(&location.to_lowercase(), &self.local_indicators)
    }
}

pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// Strips the separators people type into card numbers.
pub fn normalize_card_number(card_number: &str) -> String {
    card_number.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

fn keywords<S: AsRef<str>>(values: &[S]) -> impl Iterator<Item = String> + '_ {
    values.iter().map(|v| v.as_ref().trim().to_lowercase())
}

fn cards<S: AsRef<str>>(values: &[S]) -> impl Iterator<Item = String> + '_ {
    values.iter().map(|v| normalize_card_number(v.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_named_tables() {
        let config = ListsConfig {
            legitimate_merchants: Some(vec![" Example.COM ".to_string()]),
            test_cards: Some(vec!["4242-4242-4242-4242".to_string()]),
            ..Default::default()
        };

        let lists = ScoringLists::from_config(&config);

        assert!(lists.is_legitimate_merchant("example.com"));
        assert!(!lists.is_legitimate_merchant("netflix.com"));
        assert!(lists.test_cards.contains("4242424242424242"));
        assert_eq!(lists.suspicious_keywords, ScoringLists::default().suspicious_keywords);
    }

    #[test]
    fn test_location_keywords_ignore_case() {
        let lists = ScoringLists::default();
        assert!(lists.mentions_foreign("Overseas, FR"));
        assert!(lists.mentions_local("LOCAL market"));
        assert!(!lists.mentions_foreign("new york"));
    }
}
