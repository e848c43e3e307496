//! Event table loading.
//!
//! Reads the tabular event log from a local file or a remote spreadsheet
//! export, validates the schema, and filters to the requested subject group.
//! Uses the `csv` crate for robust parsing.

use serde::Deserialize;

use crate::constants::columns;
use crate::error::{Error, Result};

use super::source::{EventSource, SheetRef};

/// Internal record for CSV deserialization.
#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(rename = "groupId")]
    group_id: String,
    #[serde(rename = "startTime")]
    start_time: String,
    #[serde(rename = "stopTime")]
    stop_time: String,
    #[serde(rename = "subjectId")]
    subject_id: String,
    #[serde(rename = "included", default)]
    included: Option<String>,
}

/// One logged occurrence, as read from the event table.
///
/// Timestamps stay raw here; they are parsed when plans are built so a
/// malformed table is rejected wholesale with row context.
#[derive(Debug, Clone)]
pub struct RawEvent {
    /// Recording/session this row belongs to.
    pub group_id: String,
    /// Raw start timestamp text.
    pub start_raw: String,
    /// Raw stop timestamp text.
    pub stop_raw: String,
    /// Subject the row belongs to.
    pub subject_id: String,
    /// Inclusion flag; blank or absent means included.
    pub included: bool,
    /// 1-based line number in the table, counting the header.
    pub line: u64,
}

/// Load events for one subject group.
///
/// Requires the columns `groupId, startTime, stopTime, subjectId`; an
/// optional `included` column defaults every row to included when absent or
/// blank. Returns only rows whose `groupId` exactly (case-sensitively)
/// matches `group_id` and whose `included` is not explicitly false. Extra
/// columns such as free-text notes are ignored.
///
/// Remote sources cost one network call; local sources none.
///
/// # Errors
///
/// Returns an error if the table cannot be read or fetched, a required
/// column is missing, or a row cannot be decoded.
pub fn load_events(source: &EventSource, group_id: &str) -> Result<Vec<RawEvent>> {
    let origin = source.to_string();
    let rows = match source {
        EventSource::Local(path) => {
            let reader = csv_reader_builder()
                .from_path(path)
                .map_err(|e| Error::EventRead {
                    path: origin.clone(),
                    source: Box::new(e),
                })?;
            decode_events(reader, &origin)?
        }
        EventSource::Sheet(sheet) => {
            let body = fetch_sheet_csv(sheet)?;
            let reader = csv_reader_builder().from_reader(body.as_bytes());
            decode_events(reader, &origin)?
        }
    };

    Ok(filter_rows(rows, group_id))
}

fn csv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

/// Decode every row of the table, validating the header first.
fn decode_events<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    origin: &str,
) -> Result<Vec<RawEvent>> {
    let headers = reader
        .headers()
        .map_err(|e| Error::EventRead {
            path: origin.to_string(),
            source: Box::new(e),
        })?
        .clone();

    // Check headers explicitly so a missing column surfaces as a schema
    // error rather than a per-row deserialization failure.
    for column in columns::REQUIRED {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }

    let mut events = Vec::new();
    for (idx, row) in reader.deserialize::<EventRecord>().enumerate() {
        let line = idx as u64 + 2;
        let record = row.map_err(|e| Error::EventRow {
            line,
            message: e.to_string(),
        })?;
        events.push(RawEvent {
            group_id: record.group_id,
            start_raw: record.start_time,
            stop_raw: record.stop_time,
            subject_id: record.subject_id,
            included: parse_included(record.included.as_deref()),
            line,
        });
    }

    Ok(events)
}

/// Keep rows for the requested group that are not explicitly excluded.
fn filter_rows(rows: Vec<RawEvent>, group_id: &str) -> Vec<RawEvent> {
    rows.into_iter()
        .filter(|row| row.group_id == group_id && row.included)
        .collect()
}

/// Interpret the inclusion flag. Only an explicit false excludes a row.
fn parse_included(raw: Option<&str>) -> bool {
    raw.is_none_or(|text| {
        let lowered = text.trim().to_ascii_lowercase();
        !matches!(lowered.as_str(), "false" | "0" | "no")
    })
}

/// Fetch the CSV export of a remote sheet, blocking until complete.
fn fetch_sheet_csv(sheet: &SheetRef) -> Result<String> {
    let url = sheet.export_url();

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("failed to create async runtime: {e}"),
    })?;

    runtime.block_on(async {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Internal {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::SheetFetch {
                url: url.clone(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SheetStatus {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| Error::SheetFetch {
            url: url.clone(),
            source: Box::new(e),
        })
    })
}
