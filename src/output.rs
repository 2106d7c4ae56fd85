//! Output formatting and persistence for survey reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV append of the
//! per-category rating snapshot.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::CategoryReport;
use crate::stats::SurveyReport;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &SurveyReport) {
    debug!("{:#?}", report);
}

/// Logs any serializable aggregate as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes any serializable aggregate to `path` as pretty-printed JSON,
/// replacing the file.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write '{path}'"))?;
    debug!(path, "JSON written");
    Ok(())
}

/// Appends one CSV row per rating category, stamped with `generated_at`.
///
/// Creates the file with headers if it does not already exist. Columns are
/// `generated_at,category,total,average` followed by one count column per
/// rating label, in scale order.
pub fn append_category_rows(
    path: &str,
    report: &CategoryReport,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending category rows");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open '{path}'"))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    if !file_exists {
        let mut header = vec![
            "generated_at".to_string(),
            "category".to_string(),
            "total".to_string(),
            "average".to_string(),
        ];
        if let Some(first) = report.iter().next() {
            header.extend(first.distribution.iter().map(|(label, _)| label.to_string()));
        }
        writer.write_record(&header)?;
    }

    let stamp = generated_at.to_rfc3339();
    for stats in report.iter() {
        let mut row = vec![
            stamp.clone(),
            stats.category.clone(),
            stats.total.to_string(),
            format!("{:.3}", stats.average),
        ];
        row.extend(stats.distribution.iter().map(|(_, count)| count.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{category_stats, test_records};
    use crate::config::SurveyConfig;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_report() -> SurveyReport {
        let records = test_records("Bikes,Art Car\nGlorious,Rough\nGreat,\n");
        SurveyReport::from_records(&records, &SurveyConfig::default())
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_report()).unwrap();
    }

    #[test]
    fn test_write_json_round_trips_through_serde_json() {
        let path = temp_path("survey_digest_test_report.json");
        write_json(&path, &sample_report()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["respondents"], 2);
        assert_eq!(value["categories"][5]["category"], "Bikes");
        assert_eq!(value["categories"][5]["distribution"]["Glorious"], 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_category_rows_header_once() {
        let path = temp_path("survey_digest_test_categories.csv");
        let _ = fs::remove_file(&path);

        let records = test_records("Bikes\nGlorious\nGreat\n");
        let report = category_stats(&records, &SurveyConfig::default());
        append_category_rows(&path, &report, Utc::now()).unwrap();
        append_category_rows(&path, &report, Utc::now()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 10 categories per snapshot
        assert_eq!(lines.len(), 21);
        assert_eq!(
            lines[0],
            "generated_at,category,total,average,Glorious,Great,Good,Needs attention,Rough"
        );
        assert_eq!(
            content.lines().filter(|l| l.starts_with("generated_at")).count(),
            1
        );
        let bikes = lines.iter().find(|l| l.contains(",Bikes,")).unwrap();
        assert!(bikes.ends_with(",2,4.500,1,1,0,0,0"));

        fs::remove_file(&path).unwrap();
    }
}
