//! CLI entry point for the survey digest tool.
//!
//! Loads a survey export from a file or URL and prints or writes the
//! aggregates the dashboard is built from.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use survey_digest::analyzers::types::TextBuckets;
use survey_digest::analyzers::{ideas, improvements, start_stop_continue};
use survey_digest::{
    config::SurveyConfig,
    output::{append_category_rows, print_json, print_pretty, write_json},
    parser::{RecordSet, load_survey},
    stats::SurveyReport,
};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "survey_digest")]
#[command(about = "Aggregate a camp survey export into dashboard statistics", long_about = None)]
struct Cli {
    /// JSON file overriding the built-in column names and keyword tables
    #[arg(short, long, global = true, env = "SURVEY_CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every aggregate and emit the full report as JSON
    Report {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Write the JSON report here instead of logging it
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Append a per-category rating snapshot to a CSV file
    Categories {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append rows to
        #[arg(short, long, default_value = "categories.csv")]
        output: String,
    },
    /// Show improvement, idea, and start/stop/continue groupings
    Text {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
}

#[derive(Serialize)]
struct TextDigest {
    improvements: TextBuckets,
    ideas: TextBuckets,
    start_stop_continue: TextBuckets,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/survey_digest.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("survey_digest.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info")?);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug")?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!(path = %path, "Loading survey config");
            SurveyConfig::load(path)?
        }
        None => SurveyConfig::default(),
    };

    match cli.command {
        Commands::Report { source, output } => {
            let records = load(&source, &config).await?;
            let report = SurveyReport::from_records(&records, &config);
            print_pretty(&report);

            match output {
                Some(path) => {
                    write_json(&path, &report)?;
                    info!(path = %path, "Report written");
                }
                None => print_json(&report)?,
            }
        }
        Commands::Categories { source, output } => {
            let records = load(&source, &config).await?;
            let report = SurveyReport::from_records(&records, &config);

            append_category_rows(&output, &report.categories, report.generated_at)?;
            info!(
                path = %output,
                categories = report.categories.len(),
                "Category snapshot appended"
            );
        }
        Commands::Text { source } => {
            let records = load(&source, &config).await?;
            let digest = TextDigest {
                improvements: improvements(&records, &config),
                ideas: ideas(&records, &config),
                start_stop_continue: start_stop_continue(&records, &config),
            };

            for (category, count) in digest.improvements.counts() {
                info!(category, count, "Improvement suggestions");
            }
            print_json(&digest)?;
        }
    }

    Ok(())
}

fn env_filter(var: &str, default_directive: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::from_env(var).add_directive(default_directive.parse()?))
}

/// Loads the record set, logging the failure kind before handing it back.
async fn load(source: &str, config: &SurveyConfig) -> Result<RecordSet> {
    match load_survey(source, config).await {
        Ok(records) => {
            info!(records = records.len(), "Survey loaded");
            Ok(records)
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Survey load failed");
            Err(e.into())
        }
    }
}
