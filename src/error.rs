//! Error taxonomy for loading a survey export.
//!
//! Only the load step can fail. Values an aggregator does not recognize are
//! dropped from that aggregate and never surface here.

use thiserror::Error;

/// Terminal failure of [`crate::parser::load_survey`]. No partial record set
/// is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source text could not be retrieved at all.
    #[error("failed to fetch survey export from '{source_name}': {reason}")]
    Fetch { source_name: String, reason: String },

    /// The text was retrieved but could not be tokenized into rows.
    #[error("failed to parse survey export: {reason}")]
    Parse { reason: String },
}

impl LoadError {
    pub fn fetch(source_name: &str, reason: impl ToString) -> Self {
        LoadError::Fetch {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(reason: impl ToString) -> Self {
        LoadError::Parse {
            reason: reason.to_string(),
        }
    }

    /// Short machine-readable tag, handy for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Fetch { .. } => "fetch_error",
            LoadError::Parse { .. } => "parse_error",
        }
    }
}
