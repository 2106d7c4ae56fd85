//! Result types produced by the aggregators.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered label → count mapping.
///
/// Every configured label is present from the start, so a label nobody chose
/// still reports 0. Serializes as a JSON object in label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn with_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        for label in labels {
            if !entries.iter().any(|(existing, _)| existing == label) {
                entries.push((label.to_string(), 0));
            }
        }
        Self { entries }
    }

    /// Adds one to `label`. Returns `false`, leaving the tally untouched, when
    /// the label is not part of it.
    pub fn increment(&mut self, label: &str) -> bool {
        match self.entries.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, count)) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Non-zero labels, highest count first. Ties keep label order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().filter(|(_, count)| *count > 0).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Rating summary for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub distribution: Tally,
    /// Recognized responses; always the sum of `distribution`.
    pub total: usize,
    pub average: f64,
}

/// A category name paired with its average rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub average: f64,
}

/// Cross-category highlights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub highest: Option<CategoryScore>,
    pub lowest: Option<CategoryScore>,
    pub overall_average: f64,
}

/// Stats for every configured rating category, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryReport {
    pub(crate) categories: Vec<CategoryStats>,
}

impl CategoryReport {
    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.categories.iter().find(|stats| stats.category == category)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryStats> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category with the best average. The first one wins a tie.
    pub fn highest(&self) -> Option<&CategoryStats> {
        self.categories.iter().fold(None, |best, stats| match best {
            Some(b) if b.average >= stats.average => Some(b),
            _ => Some(stats),
        })
    }

    /// Category with the worst average. The first one wins a tie.
    pub fn lowest(&self) -> Option<&CategoryStats> {
        self.categories.iter().fold(None, |worst, stats| match worst {
            Some(w) if w.average <= stats.average => Some(w),
            _ => Some(stats),
        })
    }

    /// Mean of the category averages (categories without responses count as 0).
    pub fn overall_average(&self) -> f64 {
        let averages: Vec<f64> = self.categories.iter().map(|stats| stats.average).collect();
        super::utility::mean(&averages)
    }

    pub fn summary(&self) -> CategorySummary {
        let score = |stats: &CategoryStats| CategoryScore {
            category: stats.category.clone(),
            average: stats.average,
        };
        CategorySummary {
            highest: self.highest().map(score),
            lowest: self.lowest().map(score),
            overall_average: self.overall_average(),
        }
    }
}

/// Range and average of the amounts found for one fee column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeStats {
    pub fee_type: String,
    pub values: Vec<f64>,
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Average of the numeric recommendation scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendScore {
    pub average: f64,
    pub total: usize,
    pub scores: Vec<f64>,
}

/// Items filed under one named bucket, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBucket {
    pub category: String,
    pub items: Vec<String>,
}

/// Ordered named buckets of free-text items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextBuckets {
    pub(crate) buckets: Vec<TextBucket>,
}

impl TextBuckets {
    pub(crate) fn with_categories<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            buckets: names
                .into_iter()
                .map(|name| TextBucket {
                    category: name.to_string(),
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    /// Items in `category`, `None` when the bucket is not present.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|bucket| bucket.category == category)
            .map(|bucket| bucket.items.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextBucket> {
        self.buckets.iter()
    }

    /// Number of buckets present, empty ones included.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Non-empty buckets with their sizes, largest first. Ties keep bucket order.
    pub fn counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<_> = self
            .buckets
            .iter()
            .filter(|bucket| !bucket.items.is_empty())
            .map(|bucket| (bucket.category.as_str(), bucket.items.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Volunteer role interest across respondents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolunteerSummary {
    pub roles: Tally,
    /// Respondents who wrote anything in the volunteer column.
    pub volunteers: usize,
    pub respondents: usize,
    pub volunteer_pct: f64,
}

/// Shout-out texts and the names they mention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoutoutSummary {
    pub shoutouts: Vec<String>,
    pub mentioned_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_keeps_all_labels() {
        let mut tally = Tally::with_labels(["Yes", "Probably", "Undecided"]);
        assert!(tally.increment("Yes"));
        assert!(!tally.increment("Maybe"));

        assert_eq!(tally.get("Yes"), Some(1));
        assert_eq!(tally.get("Undecided"), Some(0));
        assert_eq!(tally.get("Maybe"), None);
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn test_tally_ignores_duplicate_labels() {
        let tally = Tally::with_labels(["Yes", "Yes", "No"]);
        assert_eq!(tally.iter().count(), 2);
    }

    #[test]
    fn test_tally_ranked_drops_zero_and_is_stable() {
        let mut tally = Tally::with_labels(["a", "b", "c", "d"]);
        tally.increment("b");
        tally.increment("c");
        tally.increment("d");
        tally.increment("d");

        assert_eq!(tally.ranked(), vec![("d", 2), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn test_tally_serializes_in_label_order() {
        let mut tally = Tally::with_labels(["Yes", "Probably", "Undecided", "Unlikely"]);
        tally.increment("Unlikely");

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(
            json,
            r#"{"Yes":0,"Probably":0,"Undecided":0,"Unlikely":1}"#
        );
    }

    fn stats(category: &str, average: f64) -> CategoryStats {
        CategoryStats {
            category: category.to_string(),
            distribution: Tally::default(),
            total: 0,
            average,
        }
    }

    #[test]
    fn test_category_report_highest_lowest_first_wins() {
        let report = CategoryReport {
            categories: vec![
                stats("Bikes", 3.0),
                stats("Art Car", 4.5),
                stats("Mezcal Bar", 4.5),
                stats("RA Express", 2.0),
                stats("Family Dinners", 2.0),
            ],
        };

        assert_eq!(report.highest().unwrap().category, "Art Car");
        assert_eq!(report.lowest().unwrap().category, "RA Express");
        assert_eq!(report.overall_average(), 16.0 / 5.0);
    }

    #[test]
    fn test_empty_category_report_summary() {
        let summary = CategoryReport::default().summary();
        assert!(summary.highest.is_none());
        assert!(summary.lowest.is_none());
        assert_eq!(summary.overall_average, 0.0);
    }

    #[test]
    fn test_text_bucket_counts_skip_empty() {
        let mut buckets = TextBuckets::with_categories(["Food", "Power", "Other"]);
        buckets.buckets[1].items.push("more solar".into());
        buckets.buckets[2].items.push("x".into());
        buckets.buckets[2].items.push("y".into());

        assert_eq!(buckets.counts(), vec![("Other", 2), ("Power", 1)]);
        assert_eq!(buckets.get("Food"), Some(&[] as &[String]));
        assert_eq!(buckets.get("Water"), None);
    }
}
