// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use strum::Display;

// --- Sentinel Values ---
// Fixed substitutes emitted when an analyzer's input is unavailable.

pub const UNABLE_TO_FETCH: &str = "Unable to fetch";
pub const UNKNOWN_DOMAIN: &str = "Unknown";
pub const UNKNOWN_SERVER: &str = "Unknown";
pub const BLOCKED_TITLE: &str = "Unable to fetch - Content blocked/restricted";
pub const BLOCKED_DESCRIPTION: &str = "Content could not be analyzed due to access restrictions";
pub const BLOCKED_SERVER: &str = "Unable to fetch - Content blocked";

// Severity of a finding derived from a report, used to order and color findings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

// --- Fetch Models ---

/// The captured result of the single fetch attempt of an analysis run.
///
/// Exactly one variant is populated per run. The orchestrator owns it and every
/// analyzer borrows it.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Fetched(FetchedPage),
    FetchFailed { reason: String },
}

impl FetchOutcome {
    /// Returns the captured page, or `None` when the fetch failed.
    pub fn page(&self) -> Option<&FetchedPage> {
        match self {
            FetchOutcome::Fetched(page) => Some(page),
            FetchOutcome::FetchFailed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::FetchFailed { .. })
    }
}

// A response as seen by the analyzers: lower-cased header names, raw body bytes and
// the time it took to receive them.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl FetchedPage {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Decodes the body as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// --- Security Models ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityReport {
    pub ssl_enabled: bool,
    pub ssl_valid: bool,
    pub https_redirect: bool,
    pub suspicious_patterns: Vec<String>,
    pub safety_score: u8,
}

// --- Performance Models ---

/// Latency class of the primary fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum LoadSpeed {
    Fast,
    Medium,
    Slow,
    Unreachable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceReport {
    pub response_time: f64,
    pub page_size: usize,
    pub status_code: u16,
    pub load_speed: LoadSpeed,
}

// --- Content Models ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentReport {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub word_count: usize,
    pub has_forms: bool,
    pub external_links: usize,
}

impl ContentReport {
    /// The fixed record emitted when no document could be parsed.
    pub fn blocked() -> Self {
        Self {
            title: Some(BLOCKED_TITLE.to_string()),
            description: Some(BLOCKED_DESCRIPTION.to_string()),
            keywords: None,
            word_count: 0,
            has_forms: false,
            external_links: 0,
        }
    }
}

// --- Technology Models ---

// `technologies` and `frameworks` are insertion-ordered sets: detection order is kept
// and duplicates are never pushed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechnologyReport {
    pub server: Option<String>,
    pub technologies: Vec<String>,
    pub cms_detected: Option<String>,
    pub frameworks: Vec<String>,
}

impl TechnologyReport {
    /// The minimal record emitted when the fetch produced no response.
    pub fn blocked() -> Self {
        Self {
            server: Some(BLOCKED_SERVER.to_string()),
            technologies: Vec::new(),
            cms_detected: None,
            frameworks: Vec::new(),
        }
    }
}

// --- Domain Models ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: String,
    pub registrar: String,
    pub creation_date: String,
    pub expiration_date: String,
    pub country: String,
}

impl DomainReport {
    /// A report for `domain` where every registration field is unavailable.
    pub fn unavailable(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            registrar: UNABLE_TO_FETCH.to_string(),
            creation_date: UNABLE_TO_FETCH.to_string(),
            expiration_date: UNABLE_TO_FETCH.to_string(),
            country: UNABLE_TO_FETCH.to_string(),
        }
    }
}

// --- Main Report ---

/// The aggregate of one analysis run. Built once by the orchestrator, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub url: String,
    /// Total wall-clock seconds of the run, rounded to centiseconds.
    pub analysis_time: f64,
    pub security: SecurityReport,
    pub performance: PerformanceReport,
    pub content: ContentReport,
    pub technology: TechnologyReport,
    pub domain: DomainReport,
}

// --- Connectivity Probe Models ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectivityError {
    Timeout,
    ConnectionFailed,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub url: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ConnectivityError>,
    pub message: String,
}
