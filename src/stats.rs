//! Whole-survey report: every aggregate computed once from one record set.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::types::{
    CategoryReport, CategorySummary, FeeStats, RecommendScore, ShoutoutSummary, Tally,
    TextBuckets, VolunteerSummary,
};
use crate::analyzers::{
    category_stats, fee_stats, ideas, improvements, likely_to_return, recommend_score,
    returning_tally, shoutout_summary, start_stop_continue, volunteer_summary, worked_well,
};
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

#[derive(Debug, Clone, Serialize)]
pub struct SurveyReport {
    pub generated_at: DateTime<Utc>,
    pub respondents: usize,

    // ratings
    pub categories: CategoryReport,
    pub category_summary: CategorySummary,
    pub recommend: RecommendScore,
    pub returning: Tally,
    pub likely_to_return: usize,

    // money
    pub fees: Vec<FeeStats>,

    // free text
    pub worked_well: Vec<String>,
    pub improvements: TextBuckets,
    pub start_stop_continue: TextBuckets,
    pub ideas: TextBuckets,
    pub volunteers: VolunteerSummary,
    pub shoutouts: ShoutoutSummary,
}

impl SurveyReport {
    pub fn from_records(records: &RecordSet, config: &SurveyConfig) -> Self {
        let categories = category_stats(records, config);
        let category_summary = categories.summary();
        let returning = returning_tally(records, config);
        let likely_to_return = likely_to_return(&returning, config);

        SurveyReport {
            generated_at: Utc::now(),
            respondents: records.len(),
            categories,
            category_summary,
            recommend: recommend_score(records, config),
            returning,
            likely_to_return,
            fees: fee_stats(records, config),
            worked_well: worked_well(records, config),
            improvements: improvements(records, config),
            start_stop_continue: start_stop_continue(records, config),
            ideas: ideas(records, config),
            volunteers: volunteer_summary(records, config),
            shoutouts: shoutout_summary(records, config),
        }
    }
}
