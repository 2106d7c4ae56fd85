use regex::Regex;
use tracing::{debug, warn};

use crate::analyzers::types::TextBuckets;
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

/// `- Start: foo`, `* stop foo`, `Continue:foo`, ... Case-insensitive, and
/// the token has to be a whole word, so `Starting` is not a start line.
fn leading_token_pattern(token: &str) -> Option<Regex> {
    let pattern = format!(r"(?i)^(?:[-*•]\s*)?{}\b:?\s*", regex::escape(token));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(token, error = %e, "Skipping split token that does not compile");
            None
        }
    }
}

/// Splits multi-line answers into one bucket per leading token.
///
/// Every line is trimmed; tokens are tried in order and the first match
/// files the rest of the line (marker, token and colon stripped) under that
/// token. Lines matching no token are dropped; a bare `Start:` files an
/// empty item.
pub fn split_structured<'a>(
    items: impl IntoIterator<Item = &'a str>,
    tokens: &[String],
) -> TextBuckets {
    let mut buckets = TextBuckets::with_categories(tokens.iter().map(String::as_str));
    let patterns: Vec<(usize, Regex)> = tokens
        .iter()
        .enumerate()
        .filter_map(|(bucket, token)| leading_token_pattern(token).map(|re| (bucket, re)))
        .collect();

    let mut discarded = 0usize;

    for line in items
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|line| !line.is_empty())
    {
        let hit = patterns
            .iter()
            .find_map(|(bucket, re)| re.find(line).map(|m| (*bucket, m.end())));

        match hit {
            Some((bucket, end)) => {
                buckets.buckets[bucket].items.push(line[end..].trim().to_string());
            }
            None => discarded += 1,
        }
    }

    if discarded > 0 {
        debug!(discarded, "Lines without a leading token discarded");
    }

    buckets
}

/// "Start / Stop / Continue" answers split by the configured tokens.
pub fn start_stop_continue(records: &RecordSet, config: &SurveyConfig) -> TextBuckets {
    split_structured(
        records.non_blank_values(&config.columns.start_stop_continue),
        &config.split_tokens,
    )
}
