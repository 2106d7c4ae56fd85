//! Declarative tables that drive every aggregator.
//!
//! [`SurveyConfig::default`] carries the column names, label sets and keyword
//! lists of the camp survey. A JSON file can override any subset of them:
//! ```json
//! {
//!   "fee_columns": ["Camp Fees", "Tent Fees"],
//!   "worked_well_limit": 5
//! }
//! ```
//! The value is built once at startup and borrowed by every call.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One ordinal rating label and the score it contributes to averages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLevel {
    pub label: String,
    pub score: u8,
}

/// A named text bucket and the keywords that put an item into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered keyword categories plus the name of the catch-all bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    pub categories: Vec<KeywordCategory>,
    pub fallback: String,
}

impl KeywordTable {
    pub fn new(categories: &[(&str, &[&str])], fallback: &str) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|(name, keywords)| KeywordCategory {
                    name: name.to_string(),
                    keywords: strings(keywords),
                })
                .collect(),
            fallback: fallback.to_string(),
        }
    }
}

/// Free-text and scalar column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub recommend: String,
    pub returning: String,
    pub shoutouts: String,
    pub worked_well: String,
    pub improvements: String,
    pub start_stop_continue: String,
    pub ideas: String,
    pub volunteer: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            recommend: "Recommend RA?".into(),
            returning: "Returning 2026?".into(),
            shoutouts: "Shout-outs & gratitude".into(),
            worked_well: "What worked particularly well?".into(),
            improvements: "Improve for 2026".into(),
            start_stop_continue: "Start / Stop / Continue".into(),
            ideas: "2026 Ideas?".into(),
            volunteer: "Let me help with:".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Columns removed from every record at load time.
    pub identifying_columns: Vec<String>,
    /// Rating vocabulary, best first. Order is the distribution order.
    pub rating_scale: Vec<RatingLevel>,
    pub rating_categories: Vec<String>,
    pub fee_columns: Vec<String>,
    pub returning_labels: Vec<String>,
    /// Subset of `returning_labels` counted as "likely to return".
    pub likely_return_labels: Vec<String>,
    pub columns: Columns,
    pub improvement_categories: KeywordTable,
    pub idea_categories: KeywordTable,
    /// Leading tokens for the start/stop/continue splitter.
    pub split_tokens: Vec<String>,
    pub volunteer_roles: Vec<String>,
    pub volunteer_fallback: String,
    /// Unmatched volunteer answers at or below this many characters are not
    /// counted under the fallback role.
    pub volunteer_fallback_min_len: usize,
    /// Alias groups searched for in shout-outs, e.g. `["Sean", "Shaun"]`.
    pub name_aliases: Vec<Vec<String>>,
    pub worked_well_limit: usize,
}

const RATING_SCALE: &[(&str, u8)] = &[
    ("Glorious", 5),
    ("Great", 4),
    ("Good", 3),
    ("Needs attention", 2),
    ("Rough", 1),
];

const RATING_CATEGORIES: &[&str] = &[
    "Camp Vibes & Comms",
    "Family Dinners",
    "Mezcal Bar",
    "Water & Showers",
    "Shade & Tents",
    "Bikes",
    "Art Car",
    "Radiance Hour",
    "RA Express",
    "MOOP & Recycling",
];

const IMPROVEMENT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Tents/AC",
        &["tent", "ac", "aircon", "air con", "shiftpod", "waterproof", "weather", "rain"],
    ),
    ("Food", &["food", "dinner", "meal", "cook", "eating", "portion", "hungry"]),
    (
        "Power",
        &["power", "electrical", "solar", "outlet", "socket", "battery", "inverter"],
    ),
    ("Water", &["water", "shower", "taste", "filter", "chlorinated"]),
    (
        "Communication",
        &["communication", "comms", "notice", "board", "schedule", "inform"],
    ),
    ("Art Car", &["art car", "artcar", "mezcal", "ss mezcal"]),
    ("Community", &["community", "vibes", "people", "connect", "silo", "group"]),
];

const IDEA_KEYWORDS: &[(&str, &[&str])] = &[
    ("Art & Creative", &["art", "artwork", "art car", "playa art"]),
    ("Food & Dining", &["food", "meal", "dinner", "bbq", "sausage", "sunrise food"]),
    (
        "Infrastructure",
        &["tent", "ac", "power", "solar", "shade", "water", "infrastructure"],
    ),
    ("Community & Events", &["party", "event", "community", "vibe", "gathering"]),
];

const VOLUNTEER_ROLES: &[&str] = &[
    "Build week",
    "Barbies",
    "Art-Car Drivers",
    "Cook Crews",
    "Planeteers",
    "Water team",
    "Power/solar team",
    "Shade & tents",
    "Bikes",
    "Logistics",
    "Comms/content",
    "DJ/performer",
    "Radiance Hour",
    "Strike/Packdown",
    "Finance/ops/admin",
    "Hen House",
];

const NAME_ALIASES: &[&[&str]] = &[
    &["Kimber", "Kimba", "Kymber"],
    &["Drew"],
    &["Benny"],
    &["Siona", "Si"],
    &["Gus", "Gussy"],
    &["Tim"],
    &["James", "Jimmy"],
    &["Dallas"],
    &["Adam"],
    &["Jacob"],
    &["Wes"],
    &["Sean", "Shaun"],
    &["Laura"],
    &["Ashley"],
    &["Jeff"],
    &["Jess"],
    &["Nat"],
];

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            identifying_columns: strings(&["Timestamp", "Name (real or playa)", "Email"]),
            rating_scale: RATING_SCALE
                .iter()
                .map(|(label, score)| RatingLevel {
                    label: label.to_string(),
                    score: *score,
                })
                .collect(),
            rating_categories: strings(RATING_CATEGORIES),
            fee_columns: strings(&["Camp Fees", "Tent Fees", "AC Fees", "Bike Fees"]),
            returning_labels: strings(&["Yes", "Probably", "Undecided", "Unlikely"]),
            likely_return_labels: strings(&["Yes", "Probably"]),
            columns: Columns::default(),
            improvement_categories: KeywordTable::new(IMPROVEMENT_KEYWORDS, "Other"),
            idea_categories: KeywordTable::new(IDEA_KEYWORDS, "Other"),
            split_tokens: strings(&["start", "stop", "continue"]),
            volunteer_roles: strings(VOLUNTEER_ROLES),
            volunteer_fallback: "Other".into(),
            volunteer_fallback_min_len: 10,
            name_aliases: NAME_ALIASES.iter().map(|group| strings(group)).collect(),
            worked_well_limit: 10,
        }
    }
}

impl SurveyConfig {
    /// Loads overrides from a JSON file at `path`. Fields missing from the
    /// file keep their default value.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read survey config '{path}'"))?;
        let config: SurveyConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid survey config '{path}'"))?;
        Ok(config)
    }

    /// Score for an exact rating label, `None` for anything outside the scale.
    pub fn rating_score(&self, label: &str) -> Option<u8> {
        self.rating_scale
            .iter()
            .find(|level| level.label == label)
            .map(|level| level.score)
    }

    /// Rating labels in scale order.
    pub fn rating_labels(&self) -> impl Iterator<Item = &str> {
        self.rating_scale.iter().map(|level| level.label.as_str())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_default_rating_scale() {
        let config = SurveyConfig::default();
        assert_eq!(config.rating_score("Glorious"), Some(5));
        assert_eq!(config.rating_score("Needs attention"), Some(2));
        assert_eq!(config.rating_score("Rough"), Some(1));
        assert_eq!(config.rating_score("rough"), None);
        assert_eq!(config.rating_score(""), None);
        assert_eq!(
            config.rating_labels().collect::<Vec<_>>(),
            vec!["Glorious", "Great", "Good", "Needs attention", "Rough"]
        );
    }

    #[test]
    fn test_default_has_ten_rating_categories() {
        let config = SurveyConfig::default();
        assert_eq!(config.rating_categories.len(), 10);
        assert_eq!(config.fee_columns.len(), 4);
    }

    #[test]
    fn test_load_partial_override_keeps_defaults() {
        let path = temp_path("survey_digest_test_config.json");
        fs::write(&path, r#"{ "fee_columns": ["Camp Fees"], "worked_well_limit": 3 }"#)
            .unwrap();

        let config = SurveyConfig::load(&path).unwrap();
        assert_eq!(config.fee_columns, vec!["Camp Fees".to_string()]);
        assert_eq!(config.worked_well_limit, 3);
        assert_eq!(config.rating_categories.len(), 10);
        assert_eq!(config.columns.recommend, "Recommend RA?");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = SurveyConfig::load("/definitely/not/here/survey.json");
        assert!(result.is_err());
    }
}
