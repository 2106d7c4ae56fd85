use tracing::debug;

use crate::analyzers::types::{CategoryReport, CategoryStats, Tally};
use crate::analyzers::utility::mean;
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

/// Builds [`CategoryStats`] for every configured rating category.
///
/// The report always holds one entry per category, in configured order,
/// even when nobody answered it.
pub fn category_stats(records: &RecordSet, config: &SurveyConfig) -> CategoryReport {
    let categories = config
        .rating_categories
        .iter()
        .map(|category| stats_for_category(records, category, config))
        .collect();

    CategoryReport { categories }
}

/// Distribution, recognized-response count and average score for one column.
///
/// Values outside the rating scale are left out of all three.
pub fn stats_for_category(
    records: &RecordSet,
    category: &str,
    config: &SurveyConfig,
) -> CategoryStats {
    let mut distribution = Tally::with_labels(config.rating_labels());
    let mut scores = Vec::new();
    let mut excluded = 0usize;

    for value in records.non_blank_values(category) {
        match config.rating_score(value) {
            Some(score) => {
                distribution.increment(value);
                scores.push(score as f64);
            }
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        debug!(category, excluded, "Unrecognized rating labels excluded");
    }

    CategoryStats {
        category: category.to_string(),
        total: scores.len(),
        average: mean(&scores),
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_records;

    #[test]
    fn test_three_ratings_scenario() {
        let records = test_records("Bikes\nGlorious\nGreat\nRough\n");
        let stats = stats_for_category(&records, "Bikes", &SurveyConfig::default());

        assert_eq!(stats.distribution.get("Glorious"), Some(1));
        assert_eq!(stats.distribution.get("Great"), Some(1));
        assert_eq!(stats.distribution.get("Good"), Some(0));
        assert_eq!(stats.distribution.get("Needs attention"), Some(0));
        assert_eq!(stats.distribution.get("Rough"), Some(1));
        assert_eq!(stats.total, 3);
        assert!((stats.average - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_labels_and_blanks_excluded() {
        let records = test_records("Bikes,Art Car\nGreat,x\nMeh,x\n,x\ngreat,x\n");
        let stats = stats_for_category(&records, "Bikes", &SurveyConfig::default());

        assert_eq!(stats.total, 1);
        assert_eq!(stats.average, 4.0);
        assert_eq!(stats.distribution.total(), stats.total);
    }

    #[test]
    fn test_every_category_present_with_all_labels() {
        let config = SurveyConfig::default();
        let records = test_records("Bikes,Mezcal Bar\nGood,Glorious\n");
        let report = category_stats(&records, &config);

        assert_eq!(report.len(), config.rating_categories.len());
        for (stats, category) in report.iter().zip(&config.rating_categories) {
            assert_eq!(&stats.category, category);
            assert_eq!(stats.distribution.iter().count(), 5);
            assert_eq!(stats.distribution.total(), stats.total);
        }

        let unanswered = report.get("RA Express").unwrap();
        assert_eq!(unanswered.total, 0);
        assert_eq!(unanswered.average, 0.0);
        assert_eq!(report.highest().unwrap().category, "Mezcal Bar");
    }

    #[test]
    fn test_category_stats_deterministic() {
        let config = SurveyConfig::default();
        let records = test_records("Bikes,Art Car\nGood,Rough\nGlorious,Great\n");

        assert_eq!(
            category_stats(&records, &config),
            category_stats(&records, &config)
        );
    }
}
