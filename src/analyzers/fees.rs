use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::analyzers::types::FeeStats;
use crate::analyzers::utility::{mean, min_max};
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

/// First run of ASCII digits and thousands separators.
static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9,]+").expect("amount pattern is valid"));

/// Pulls the first numeric magnitude out of a free-form fee answer.
///
/// `"USD 1,250"` gives 1250 and `"750"` gives 750. Anything after the first
/// run is ignored, including decimals, and no currency or locale parsing is
/// attempted. Returns `None` when there is no run, or when the first run
/// holds no digits (`"paid, 450"` stops at the lone comma).
pub fn extract_amount(value: &str) -> Option<f64> {
    let run = AMOUNT.find(value)?;
    run.as_str()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// [`FeeStats`] for every configured fee column, in configured order.
pub fn fee_stats(records: &RecordSet, config: &SurveyConfig) -> Vec<FeeStats> {
    config
        .fee_columns
        .iter()
        .map(|fee_type| stats_for_fee(records, fee_type))
        .collect()
}

pub fn stats_for_fee(records: &RecordSet, fee_type: &str) -> FeeStats {
    let mut values = Vec::new();
    let mut excluded = 0usize;

    for raw in records.non_blank_values(fee_type) {
        match extract_amount(raw) {
            Some(amount) => values.push(amount),
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        debug!(fee_type, excluded, "Fee answers without an amount excluded");
    }

    let (min, max) = min_max(&values);

    FeeStats {
        fee_type: fee_type.to_string(),
        count: values.len(),
        average: mean(&values),
        min,
        max,
        values,
    }
}
