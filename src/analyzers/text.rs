//! Keyword categorization of free-text answers.
//!
//! Matching is a case-insensitive substring test against each category's
//! keyword list. An item can land in several categories. Items matching none
//! of them go to the table's fallback bucket.

use crate::analyzers::types::TextBuckets;
use crate::config::{KeywordTable, SurveyConfig};
use crate::parser::RecordSet;

/// Bucketing policy. The two survey questions have always been grouped
/// slightly differently and are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Items are trimmed; a per-item flag raised by any match suppresses the
    /// fallback; buckets that end up empty are dropped from the result.
    Ideas,
    /// Items are kept verbatim; the fallback holds exactly the items that
    /// matched no category; every configured bucket is kept, empty or not.
    Improvements,
}

struct Matcher {
    bucket: usize,
    keywords: Vec<String>,
}

impl Matcher {
    fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
    }
}

/// Files `items` into the buckets described by `table`. Blank items are
/// skipped.
pub fn categorize<'a>(
    items: impl IntoIterator<Item = &'a str>,
    table: &KeywordTable,
    strategy: Strategy,
) -> TextBuckets {
    let categories: Vec<&str> = table
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .filter(|name| *name != table.fallback)
        .collect();

    let mut buckets =
        TextBuckets::with_categories(categories.iter().copied().chain([table.fallback.as_str()]));
    let fallback = categories.len();

    let matchers: Vec<Matcher> = table
        .categories
        .iter()
        .filter(|category| category.name != table.fallback)
        .enumerate()
        .map(|(bucket, category)| Matcher {
            bucket,
            keywords: category
                .keywords
                .iter()
                .filter(|keyword| !keyword.is_empty())
                .map(|keyword| keyword.to_lowercase())
                .collect(),
        })
        .collect();

    for item in items {
        if item.trim().is_empty() {
            continue;
        }

        match strategy {
            Strategy::Ideas => {
                let item = item.trim();
                let lower = item.to_lowercase();
                let mut categorized = false;

                for matcher in &matchers {
                    if matcher.matches(&lower) {
                        buckets.buckets[matcher.bucket].items.push(item.to_string());
                        categorized = true;
                    }
                }

                if !categorized {
                    buckets.buckets[fallback].items.push(item.to_string());
                }
            }
            Strategy::Improvements => {
                let lower = item.to_lowercase();
                let matched: Vec<usize> = matchers
                    .iter()
                    .filter(|matcher| matcher.matches(&lower))
                    .map(|matcher| matcher.bucket)
                    .collect();

                for bucket in &matched {
                    buckets.buckets[*bucket].items.push(item.to_string());
                }

                if matched.is_empty() {
                    buckets.buckets[fallback].items.push(item.to_string());
                }
            }
        }
    }

    if strategy == Strategy::Ideas {
        buckets.buckets.retain(|bucket| !bucket.items.is_empty());
    }

    buckets
}

/// "Improve for 2026" answers grouped with [`Strategy::Improvements`].
pub fn improvements(records: &RecordSet, config: &SurveyConfig) -> TextBuckets {
    categorize(
        records.non_blank_values(&config.columns.improvements),
        &config.improvement_categories,
        Strategy::Improvements,
    )
}

/// "2026 Ideas?" answers grouped with [`Strategy::Ideas`].
pub fn ideas(records: &RecordSet, config: &SurveyConfig) -> TextBuckets {
    categorize(
        records.non_blank_values(&config.columns.ideas),
        &config.idea_categories,
        Strategy::Ideas,
    )
}

/// The first `worked_well_limit` non-blank "What worked well" answers.
pub fn worked_well(records: &RecordSet, config: &SurveyConfig) -> Vec<String> {
    records
        .non_blank_values(&config.columns.worked_well)
        .take(config.worked_well_limit)
        .map(str::to_string)
        .collect()
}
