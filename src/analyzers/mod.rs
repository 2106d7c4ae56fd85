//! Pure aggregations over a loaded [`RecordSet`](crate::parser::RecordSet).
//!
//! Every function here borrows the record set and the survey configuration,
//! never mutates either, and returns a freshly computed result. Values an
//! aggregator does not recognize are dropped from that aggregate only.

pub mod fees;
pub mod ratings;
pub mod scalar;
pub mod shoutouts;
pub mod split;
pub mod text;
pub mod types;
pub mod utility;
pub mod volunteers;

pub use fees::{extract_amount, fee_stats};
pub use ratings::category_stats;
pub use scalar::{likely_to_return, recommend_score, returning_tally};
pub use shoutouts::shoutout_summary;
pub use split::{split_structured, start_stop_continue};
pub use text::{Strategy, categorize, ideas, improvements, worked_well};
pub use volunteers::volunteer_summary;

#[cfg(test)]
pub(crate) fn test_records(csv: &str) -> crate::parser::RecordSet {
    crate::parser::parse_records(csv.as_bytes(), &crate::config::SurveyConfig::default())
        .expect("test CSV parses")
}
