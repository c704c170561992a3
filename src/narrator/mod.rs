//! Optional free-text vulnerability narration.
//!
//! A narrator turns contract source into descriptive text. The scoring engine
//! only reads it line by line, and any failure (error, timeout, blank reply)
//! is treated as "no narration" so scoring falls back to pattern detection.

pub mod http;

pub use http::HttpNarrator;

use thiserror::Error;
use tracing::{debug, warn};

pub const SYSTEM_PROMPT: &str = "You are a smart contract security analyzer. Analyze the following contract for vulnerabilities and security issues.";

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("missing API key: {0} not set")]
    MissingApiKey(String),

    #[error("narrator request failed: {0}")]
    Request(String),

    #[error("narrator timed out")]
    Timeout,

    #[error("narrator API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse narrator response: {0}")]
    Parse(String),

    #[error("narrator returned an empty response")]
    EmptyResponse,
}

/// Produces narration text for a prompt. Implementations own whatever
/// expensive resource they need (model handle, HTTP pool) and release it on
/// drop.
pub trait Narrator: Send + Sync {
    fn narrate(&self, prompt: &str) -> Result<String, NarratorError>;
}

pub fn user_prompt(source: &str) -> String {
    format!("Contract to analyze:\n{source}")
}

/// Narration for `source`, or `None` when the narrator fails or says nothing.
pub fn narration_for(narrator: &dyn Narrator, source: &str) -> Option<String> {
    match narrator.narrate(&user_prompt(source)) {
        Ok(text) if text.trim().is_empty() => {
            warn!(error = %NarratorError::EmptyResponse, "falling back to pattern-only vulnerability scoring");
            None
        }
        Ok(text) => {
            debug!(bytes = text.len(), "received narration");
            Some(text)
        }
        Err(error) => {
            warn!(%error, "falling back to pattern-only vulnerability scoring");
            None
        }
    }
}
