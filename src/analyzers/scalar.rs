use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::analyzers::types::{RecommendScore, Tally};
use crate::analyzers::utility::mean;
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading number pattern is valid")
});

/// Parses the floating-point number at the start of `value`, ignoring any
/// trailing text: `"8/10"` reads as 8.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let number = LEADING_NUMBER.find(value)?;
    number
        .as_str()
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Average recommendation score over the answers that parse as numbers.
pub fn recommend_score(records: &RecordSet, config: &SurveyConfig) -> RecommendScore {
    let column = config.columns.recommend.as_str();
    let mut scores = Vec::new();
    let mut excluded = 0usize;

    for value in records.non_blank_values(column) {
        match parse_leading_number(value) {
            Some(score) => scores.push(score),
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        debug!(column, excluded, "Non-numeric scores excluded");
    }

    RecommendScore {
        average: mean(&scores),
        total: scores.len(),
        scores,
    }
}

/// Counts exact matches of the configured return-intent labels.
pub fn returning_tally(records: &RecordSet, config: &SurveyConfig) -> Tally {
    let column = config.columns.returning.as_str();
    let mut tally = Tally::with_labels(config.returning_labels.iter().map(String::as_str));
    let mut excluded = 0usize;

    for value in records.non_blank_values(column) {
        if !tally.increment(value) {
            excluded += 1;
        }
    }

    if excluded > 0 {
        debug!(column, excluded, "Unknown return-intent answers ignored");
    }

    tally
}

/// Respondents answering one of the "likely" labels (Yes/Probably by default).
pub fn likely_to_return(tally: &Tally, config: &SurveyConfig) -> usize {
    config
        .likely_return_labels
        .iter()
        .filter_map(|label| tally.get(label))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_records;

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("9"), Some(9.0));
        assert_eq!(parse_leading_number(" 7.5"), Some(7.5));
        assert_eq!(parse_leading_number("8/10"), Some(8.0));
        assert_eq!(parse_leading_number("10 - obviously"), Some(10.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("ten"), None);
        assert_eq!(parse_leading_number("about 9"), None);
    }

    #[test]
    fn test_recommend_score() {
        let records = test_records("Recommend RA?,Bikes\n10,a\n8,a\nmaybe,a\n,a\n9/10,a\n");
        let score = recommend_score(&records, &SurveyConfig::default());

        assert_eq!(score.total, 3);
        assert_eq!(score.scores, vec![10.0, 8.0, 9.0]);
        assert_eq!(score.average, 9.0);
    }

    #[test]
    fn test_recommend_score_empty_is_zero() {
        let records = test_records("Bikes\nGood\n");
        let score = recommend_score(&records, &SurveyConfig::default());

        assert_eq!(score.average, 0.0);
        assert_eq!(score.total, 0);
        assert!(score.scores.is_empty());
    }

    #[test]
    fn test_returning_tally_scenario() {
        let config = SurveyConfig::default();
        let records = test_records(
            "Returning 2026?,Bikes\nYes,a\nYes,a\nProbably,a\nUnlikely,a\n,a\nNo way,a\n",
        );
        let tally = returning_tally(&records, &config);

        assert_eq!(tally.get("Yes"), Some(2));
        assert_eq!(tally.get("Probably"), Some(1));
        assert_eq!(tally.get("Undecided"), Some(0));
        assert_eq!(tally.get("Unlikely"), Some(1));
        assert_eq!(tally.total(), 4);
        assert_eq!(likely_to_return(&tally, &config), 3);
    }
}
