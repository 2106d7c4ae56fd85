use std::collections::BTreeSet;

use regex::Regex;
use tracing::warn;

use crate::analyzers::types::ShoutoutSummary;
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

/// One case-insensitive whole-word pattern per alias group.
fn name_patterns(groups: &[Vec<String>]) -> Vec<Regex> {
    groups
        .iter()
        .filter_map(|group| {
            let aliases: Vec<String> = group
                .iter()
                .filter(|alias| !alias.trim().is_empty())
                .map(|alias| regex::escape(alias.trim()))
                .collect();
            if aliases.is_empty() {
                return None;
            }

            let pattern = format!(r"(?i)\b(?:{})\b", aliases.join("|"));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(?group, error = %e, "Skipping name alias group");
                    None
                }
            }
        })
        .collect()
}

/// `"kIMBER"` → `"Kimber"`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Trimmed shout-outs plus every configured name they mention, sorted and
/// de-duplicated.
pub fn shoutout_summary(records: &RecordSet, config: &SurveyConfig) -> ShoutoutSummary {
    let shoutouts: Vec<String> = records
        .non_blank_values(&config.columns.shoutouts)
        .map(|text| text.trim().to_string())
        .collect();

    let patterns = name_patterns(&config.name_aliases);
    let mut names = BTreeSet::new();

    for text in &shoutouts {
        for re in &patterns {
            for m in re.find_iter(text) {
                names.insert(capitalize(m.as_str()));
            }
        }
    }

    ShoutoutSummary {
        shoutouts,
        mentioned_names: names.into_iter().collect(),
    }
}
