pub mod json;
pub mod md;
pub mod sarif;

use crate::error::GuardError;
use crate::types::report::AnalysisResult;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Sarif,
}

/// The contract a result describes.
#[derive(Debug, Clone)]
pub struct Subject {
    pub path: String,
    /// Hex SHA-256 of the source bytes, absent when the source was unreadable.
    pub sha256: Option<String>,
}

impl Subject {
    pub fn new(path: impl Into<String>, source: Option<&[u8]>) -> Self {
        Self {
            path: path.into(),
            sha256: source.map(sha256_hex),
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

pub fn render(
    result: &AnalysisResult,
    subject: &Subject,
    format: OutputFormat,
) -> Result<String, GuardError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(GuardError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result, subject)),
        OutputFormat::Sarif => sarif::to_sarif(result, subject).map_err(GuardError::Json),
    }
}
