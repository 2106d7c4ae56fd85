use survey_digest::analyzers::{category_stats, fee_stats, improvements, returning_tally};
use survey_digest::config::SurveyConfig;
use survey_digest::error::LoadError;
use survey_digest::parser::{load_survey, parse_records};
use survey_digest::stats::SurveyReport;

const FIXTURE: &[u8] = include_bytes!("fixtures/sample_responses.csv");

#[test]
fn test_full_pipeline() {
    let config = SurveyConfig::default();
    let records = parse_records(FIXTURE, &config).expect("Failed to parse fixture");

    // the all-blank row is gone, the volunteer-only row stays
    assert_eq!(records.len(), 4);
    for record in &records {
        for column in &config.identifying_columns {
            assert!(record.get(column).is_none());
        }
    }

    let report = SurveyReport::from_records(&records, &config);
    assert_eq!(report.respondents, 4);

    let vibes = report.categories.get("Camp Vibes & Comms").unwrap();
    assert_eq!(vibes.total, 3);
    assert_eq!(vibes.distribution.get("Glorious"), Some(1));
    assert_eq!(vibes.distribution.get("Great"), Some(2));
    assert!((vibes.average - 13.0 / 3.0).abs() < 1e-9);

    // "Meh" is not a rating
    assert_eq!(report.categories.get("MOOP & Recycling").unwrap().total, 2);

    assert_eq!(report.recommend.total, 3);
    assert_eq!(report.recommend.average, 9.0);
    assert_eq!(report.likely_to_return, 2);
    assert_eq!(report.returning.get("Undecided"), Some(1));

    let camp = &report.fees[0];
    assert_eq!(camp.values, vec![1250.0, 900.0, 750.0]);
    assert_eq!(camp.min, 750.0);
    assert_eq!(camp.max, 1250.0);
    assert_eq!(report.fees[1].count, 2);
    assert_eq!(report.fees[2].average, 450.0);

    assert_eq!(
        report.start_stop_continue.get("start").unwrap(),
        &["earlier build week".to_string()]
    );
    assert_eq!(report.start_stop_continue.get("stop").unwrap().len(), 2);
    assert_eq!(report.start_stop_continue.get("continue").unwrap().len(), 2);

    assert_eq!(report.shoutouts.mentioned_names, vec!["Drew", "Gussy", "Kimber"]);
    assert_eq!(report.volunteers.volunteers, 3);
    assert_eq!(report.volunteers.roles.get("Bikes"), Some(1));
}

#[test]
fn test_improvements_multi_label_from_fixture() {
    let config = SurveyConfig::default();
    let records = parse_records(FIXTURE, &config).unwrap();
    let buckets = improvements(&records, &config);

    let solar = "More solar so the community fridge stays cold".to_string();
    assert!(buckets.get("Power").unwrap().contains(&solar));
    assert!(buckets.get("Community").unwrap().contains(&solar));
    assert_eq!(
        buckets.get("Other").unwrap(),
        &["Bring glitter".to_string()]
    );
}

#[test]
fn test_aggregators_are_deterministic() {
    let config = SurveyConfig::default();
    let records = parse_records(FIXTURE, &config).unwrap();

    assert_eq!(category_stats(&records, &config), category_stats(&records, &config));
    assert_eq!(fee_stats(&records, &config), fee_stats(&records, &config));
    assert_eq!(returning_tally(&records, &config), returning_tally(&records, &config));
    assert_eq!(improvements(&records, &config), improvements(&records, &config));
}

#[tokio::test]
async fn test_load_survey_missing_file() {
    let result = load_survey("tests/fixtures/missing.csv", &SurveyConfig::default()).await;
    assert!(matches!(result, Err(LoadError::Fetch { .. })));
}
