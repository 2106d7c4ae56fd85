//! Record loader for delimited survey exports.
//!
//! Turns the raw export into a [`RecordSet`]: header-driven rows, fully blank
//! rows dropped, identifying columns stripped. Everything downstream only
//! ever sees sanitized records.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SurveyConfig;
use crate::error::LoadError;
use crate::fetch::{BasicClient, HttpClient, read_source};

/// One respondent's sanitized answers, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Raw value of `column`, `None` when the row had no such field.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column` unless it is absent, empty or whitespace-only.
    pub fn non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.trim().is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Valid survey submissions in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Non-blank values of `column`, one per record that has one, in order.
    pub fn non_blank_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records
            .iter()
            .filter_map(move |record| record.non_blank(column))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parses a delimited export into a [`RecordSet`].
///
/// Rows shorter than the header simply lack the trailing columns; fields past
/// the header width are dropped. A row is kept when at least one of its
/// fields is non-blank, judged before the identifying columns are removed.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] when there is no header row, when any row
/// cannot be tokenized (for example invalid UTF-8) or when a quoted field is
/// never closed. No partial set is returned.
pub fn parse_records(bytes: &[u8], config: &SurveyConfig) -> Result<RecordSet, LoadError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::parse(format!("failed to read header row: {e}")))?
        .clone();

    if headers.is_empty() {
        return Err(LoadError::parse("missing header row"));
    }

    let mut records = Vec::new();
    let mut blank_rows = 0usize;

    for (index, result) in reader.records().enumerate() {
        // header is line 1
        let row = result.map_err(|e| LoadError::parse(format!("row {}: {e}", index + 2)))?;

        match to_record(&headers, &row, &config.identifying_columns) {
            Some(record) => records.push(record),
            None => blank_rows += 1,
        }
    }

    // csv reads an unclosed quote to EOF as a single field
    if let Some(line) = unterminated_quote_line(bytes) {
        return Err(LoadError::parse(format!(
            "unterminated quoted field opened on line {line}"
        )));
    }

    debug!(blank_rows, "Dropped fully blank rows");
    info!(
        records = records.len(),
        columns = headers.len(),
        "Survey export parsed"
    );

    Ok(RecordSet { records })
}

/// Line on which a quoted field opens without a closing quote, if any.
///
/// A quote only opens a field at the start of that field; inside one, `""`
/// is an escaped quote.
fn unterminated_quote_line(bytes: &[u8]) -> Option<usize> {
    let mut line = 1;
    let mut opened_on = None;
    let mut field_start = true;
    let mut iter = bytes.iter().peekable();

    while let Some(&byte) = iter.next() {
        if byte == b'\n' {
            line += 1;
        }

        if opened_on.is_some() {
            if byte == b'"' {
                if iter.peek() == Some(&&b'"') {
                    iter.next();
                } else {
                    opened_on = None;
                }
            }
            continue;
        }

        match byte {
            b'"' if field_start => {
                opened_on = Some(line);
                field_start = false;
            }
            b',' | b'\n' | b'\r' => field_start = true,
            _ => field_start = false,
        }
    }

    opened_on
}

fn to_record(headers: &StringRecord, row: &StringRecord, identifying: &[String]) -> Option<Record> {
    let pairs: Vec<(&str, &str)> = headers.iter().zip(row.iter()).collect();

    if pairs.iter().all(|(_, value)| value.trim().is_empty()) {
        return None;
    }

    let fields = pairs
        .into_iter()
        .filter(|(column, _)| !identifying.iter().any(|id| id == column))
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect();

    Some(Record { fields })
}

/// Fetches `source` (URL or local path) and parses it. One shot: a failure
/// at either step is returned as is, without retry.
#[tracing::instrument(skip(config))]
pub async fn load_survey(source: &str, config: &SurveyConfig) -> Result<RecordSet, LoadError> {
    load_survey_with(&BasicClient::new(), source, config).await
}

/// [`load_survey`] with a caller-supplied HTTP client.
pub async fn load_survey_with<C: HttpClient>(
    client: &C,
    source: &str,
    config: &SurveyConfig,
) -> Result<RecordSet, LoadError> {
    let bytes = read_source(client, source).await?;
    parse_records(&bytes, config)
}
