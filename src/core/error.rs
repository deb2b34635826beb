// src/core/error.rs

use thiserror::Error;

/// Failures that reach the caller of an analysis.
///
/// Expected degradation (unreachable host, failed handshake, missing WHOIS record)
/// never shows up here: analyzers turn it into sentinel data. Only input rejected at
/// the boundary and analyzer defects do.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL must start with http:// or https:// (got '{0}://')")]
    UnsupportedScheme(String),

    #[error("URL '{0}' has no host")]
    MissingHost(String),

    #[error("Analysis failed: {stage} analyzer aborted: {cause}")]
    Analyzer { stage: &'static str, cause: String },
}

impl AnalysisError {
    /// True for errors raised while validating input, before any analysis ran.
    pub fn is_validation(&self) -> bool {
        !matches!(self, AnalysisError::Analyzer { .. })
    }
}
