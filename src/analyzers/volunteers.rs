use crate::analyzers::types::{Tally, VolunteerSummary};
use crate::analyzers::utility::pct;
use crate::config::SurveyConfig;
use crate::parser::RecordSet;

/// Lower-cased spellings accepted for `role`: as written, with its first `/`
/// turned into a space, and with its first ` & ` turned into a space.
pub fn role_variations(role: &str) -> Vec<String> {
    let mut variations = vec![
        role.to_lowercase(),
        role.replacen('/', " ", 1).to_lowercase(),
        role.replacen(" & ", " ", 1).to_lowercase(),
    ];
    variations.sort();
    variations.dedup();
    variations
}

/// Tallies interest per volunteer role from the free-text "help with" column.
///
/// An answer counts toward every role it mentions. Answers mentioning none
/// count toward the fallback role once they are longer than
/// `volunteer_fallback_min_len` characters.
pub fn volunteer_summary(records: &RecordSet, config: &SurveyConfig) -> VolunteerSummary {
    let fallback = config.volunteer_fallback.as_str();
    let roles: Vec<(&str, Vec<String>)> = config
        .volunteer_roles
        .iter()
        .map(String::as_str)
        .filter(|role| *role != fallback)
        .map(|role| (role, role_variations(role)))
        .collect();

    let mut tally = Tally::with_labels(roles.iter().map(|(role, _)| *role).chain([fallback]));
    let mut volunteers = 0usize;

    for answer in records.non_blank_values(&config.columns.volunteer) {
        volunteers += 1;
        let lower = answer.to_lowercase();
        let mut matched = false;

        for (role, variations) in &roles {
            if variations.iter().any(|v| lower.contains(v.as_str())) {
                tally.increment(role);
                matched = true;
            }
        }

        if !matched && answer.chars().count() > config.volunteer_fallback_min_len {
            tally.increment(fallback);
        }
    }

    VolunteerSummary {
        roles: tally,
        volunteers,
        respondents: records.len(),
        volunteer_pct: pct(volunteers, records.len()),
    }
}
