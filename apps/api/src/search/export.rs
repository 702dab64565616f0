//! CSV artifact writing.
//!
//! Files are named `candidate_search_<YYYYMMDD_HHMMSS>.csv` from local wall-clock
//! time. Two searches in the same second share a name and the later write wins.
//! Bytes go to a hidden temp file in the same directory first and are renamed
//! into place, so a failed write never leaves a partial artifact behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::errors::AppError;
use crate::search::models::{CandidateRecord, CSV_HEADERS};

const FILE_PREFIX: &str = "candidate_search_";
const FILE_SUFFIX: &str = ".csv";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TEMP_PREFIX: &str = ".candidate_search_";
const TEMP_SUFFIX: &str = ".partial";

pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("{FILE_PREFIX}{}{FILE_SUFFIX}", now.format(TIMESTAMP_FORMAT))
}

/// True only for names this module could have produced. Guards the download route
/// against path traversal.
pub fn is_export_file_name(name: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
    else {
        return false;
    };
    let bytes = stamp.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit())
}

/// Serializes records with every field quoted, header row first.
pub fn to_csv_bytes(records: &[CandidateRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.write_record(record.fields())?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// Writes the artifact into `dir` and returns its full path.
pub async fn write_export(
    dir: &Path,
    records: &[CandidateRecord],
    now: DateTime<Local>,
) -> Result<PathBuf, AppError> {
    let bytes = to_csv_bytes(records).map_err(|e| AppError::Export(e.to_string()))?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Export(format!("creating {}: {e}", dir.display())))?;

    let path = dir.join(export_file_name(now));
    let (temp_dir, target) = (dir.to_path_buf(), path.clone());
    tokio::task::spawn_blocking(move || write_atomically(&temp_dir, &target, &bytes))
        .await
        .map_err(|e| AppError::Export(format!("export task failed: {e}")))?
        .map_err(|e| AppError::Export(format!("writing {}: {e}", path.display())))?;

    info!("Wrote {} candidates to {}", records.len(), path.display());
    Ok(path)
}

/// Temp file in `dir`, then rename onto `target`. The temp file is removed on
/// any error before the rename.
fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}
