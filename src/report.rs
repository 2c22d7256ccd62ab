//! Generation report: an aggregate snapshot of the catalog written as JSON.
//!
//! The report is derived data. It is rebuilt on every run and written over
//! any previous file; the catalog under `catalog/` stays the source of truth.

use crate::catalog::{Topic, TopicCatalog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unable to write report at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("report JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    fn io(path: &Path, source: io::Error) -> Self {
        ReportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Catalog snapshot plus aggregate statistics.
///
/// Serialized field order: `generated_at`, `total_topics`,
/// `estimated_total_search_volume`, `topics`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generated_at: DateTime<Utc>,
    pub total_topics: usize,
    pub estimated_total_search_volume: u128,
    pub topics: Vec<Topic>,
}

/// Aggregate the catalog at `generated_at`. Topic order is preserved.
pub fn build_report(catalog: &TopicCatalog, generated_at: DateTime<Utc>) -> GenerationReport {
    GenerationReport {
        generated_at,
        total_topics: catalog.len(),
        estimated_total_search_volume: catalog.total_search_volume(),
        topics: catalog.topics().to_vec(),
    }
}

/// Encode a report as two-space indented JSON with a trailing newline.
pub fn render_report(report: &GenerationReport) -> Result<String, ReportError> {
    let mut text = serde_json::to_string_pretty(report)?;
    text.push('\n');
    Ok(text)
}

/// Write `report` to `path`, creating parent directories and replacing any
/// existing file.
///
/// The JSON is staged in a temp file next to the destination and renamed into
/// place, so readers never observe a half-written report.
pub fn write_report(report: &GenerationReport, path: &Path) -> Result<(), ReportError> {
    let text = render_report(report)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| ReportError::io(parent, err))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(|err| ReportError::io(path, err))?;
    staged
        .write_all(text.as_bytes())
        .and_then(|()| staged.flush())
        .map_err(|err| ReportError::io(path, err))?;
    staged
        .persist(path)
        .map_err(|err| ReportError::io(path, err.error))?;

    info!(
        path = %path.display(),
        topics = report.total_topics,
        "wrote generation report"
    );
    Ok(())
}

/// Read a report previously written by `write_report`.
pub fn read_report(path: &Path) -> Result<GenerationReport, ReportError> {
    let data = fs::read_to_string(path).map_err(|err| ReportError::io(path, err))?;
    Ok(serde_json::from_str(&data)?)
}
