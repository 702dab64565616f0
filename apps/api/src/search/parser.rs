//! CSV parsing of the cleaned provider reply into `CandidateRecord`s.
//!
//! This is the only place that interprets model output as structured data.
//! The header must match `CSV_HEADERS` exactly and every row must carry
//! exactly six fields. Row order is preserved.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::AppError;
use crate::search::models::{CandidateRecord, CSV_HEADERS};

pub fn parse_candidates(csv_text: &str) -> Result<Vec<CandidateRecord>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseFailure(format!("unreadable header row: {e}")))?
        .clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CandidateRecord>().enumerate() {
        // Row 1 is the first data row after the header.
        let record = row.map_err(|e| AppError::ParseFailure(format!("row {}: {e}", index + 1)))?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(AppError::ParseFailure(
            "response contained no candidate rows".to_string(),
        ));
    }

    Ok(records)
}

fn check_headers(headers: &StringRecord) -> Result<(), AppError> {
    if headers.len() != CSV_HEADERS.len() {
        return Err(AppError::ParseFailure(format!(
            "expected {} columns, found {}",
            CSV_HEADERS.len(),
            headers.len()
        )));
    }
    for (found, expected) in headers.iter().zip(CSV_HEADERS) {
        if found != expected {
            return Err(AppError::ParseFailure(format!(
                "unexpected column '{found}', expected '{expected}'"
            )));
        }
    }
    Ok(())
}
