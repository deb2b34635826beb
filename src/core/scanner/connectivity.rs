// src/core/scanner/connectivity.rs

use crate::config::{AnalyzerConfig, PROBE_USER_AGENT};
use crate::core::models::{ConnectivityError, ConnectivityReport};
use crate::core::scanner::fetcher::{collect_headers, describe_error};
use reqwest::redirect::Policy;
use tracing::{info, warn};
use url::Url;

pub const MSG_REACHABLE: &str = "URL is accessible";
pub const MSG_TIMEOUT: &str = "Request timed out - server may be slow or blocking requests";
pub const MSG_CONNECTION_FAILED: &str =
    "Connection failed - URL may be blocked by ISP/firewall or server is down";

/// Checks whether the target answers at all, without running an analysis.
///
/// Sends a single HEAD request without following redirects. Any HTTP answer, error
/// statuses included, counts as reachable.
///
/// # Arguments
/// * `url` - The validated target.
/// * `config` - Supplies `connectivity_timeout`.
pub async fn probe_connectivity(url: &Url, config: &AnalyzerConfig) -> ConnectivityReport {
    info!(%url, "Starting connectivity probe.");

    let unreachable_report = |error: ConnectivityError, message: String| ConnectivityReport {
        url: url.to_string(),
        reachable: false,
        status_code: None,
        headers: None,
        error: Some(error),
        message,
    };

    let client = match reqwest::Client::builder()
        .user_agent(PROBE_USER_AGENT)
        .redirect(Policy::none())
        .timeout(config.connectivity_timeout)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to build HTTP client for connectivity probe.");
            return unreachable_report(ConnectivityError::Unknown, format!("Error: {}", e));
        }
    };

    match client.head(url.clone()).send().await {
        Ok(res) => {
            info!(%url, status = %res.status(), "Target is reachable.");
            ConnectivityReport {
                url: url.to_string(),
                reachable: true,
                status_code: Some(res.status().as_u16()),
                headers: Some(collect_headers(res.headers())),
                error: None,
                message: MSG_REACHABLE.to_string(),
            }
        }
        Err(e) if e.is_timeout() => {
            warn!(%url, "Connectivity probe timed out.");
            unreachable_report(ConnectivityError::Timeout, MSG_TIMEOUT.to_string())
        }
        Err(e) if e.is_connect() => {
            warn!(%url, error = %describe_error(&e), "Connectivity probe could not connect.");
            unreachable_report(
                ConnectivityError::ConnectionFailed,
                MSG_CONNECTION_FAILED.to_string(),
            )
        }
        Err(e) => {
            let cause = describe_error(&e);
            warn!(%url, error = %cause, "Connectivity probe failed.");
            unreachable_report(ConnectivityError::Unknown, format!("Error: {}", cause))
        }
    }
}
