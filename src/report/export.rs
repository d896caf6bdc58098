//! JSON export and import of the response collection.
//!
//! The export document is a pretty-printed JSON array (two-space indent) of
//! responses in collection order; importing it yields the same sequence.

use crate::models::SurveyResponse;
use crate::validation::check_records;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "survey-responses.json";

/// Serialize responses as the export document.
pub fn export_json(responses: &[SurveyResponse]) -> Result<String> {
    serde_json::to_string_pretty(responses).map_err(Into::into)
}

/// Write the export document to `path`.
pub fn write_export(responses: &[SurveyResponse], path: &Path) -> Result<()> {
    let content = export_json(responses)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    info!("Exported {} responses to {}", responses.len(), path.display());
    Ok(())
}

/// Parse an export document.
///
/// Every record must pass the same text limits as the form, and ids must be
/// unique across the document.
pub fn import_json(content: &str) -> Result<Vec<SurveyResponse>> {
    let responses: Vec<SurveyResponse> = serde_json::from_str(content)
        .context("Export document is not a valid list of responses")?;
    check_records(&responses).context("Export document contains an invalid response")?;
    Ok(responses)
}

/// Read and parse an export document from `path`.
pub fn read_import(path: &Path) -> Result<Vec<SurveyResponse>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let responses = import_json(&content)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    info!("Read {} responses from {}", responses.len(), path.display());
    Ok(responses)
}
