// src/core/target.rs

use crate::core::error::AnalysisError;
use url::Url;

/// Validates a user-supplied target before it reaches the analyzer.
///
/// The URL must parse as an absolute URL, use the `http` or `https` scheme and
/// carry a non-empty host.
pub fn validate_target(input: &str) -> Result<Url, AnalysisError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| AnalysisError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(AnalysisError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AnalysisError::MissingHost(trimmed.to_string()));
    }

    Ok(url)
}

/// Prefixes `https://` when the input carries no scheme, the way the target box
/// of the interactive front end accepts bare domains.
pub fn with_default_scheme(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
