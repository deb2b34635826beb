// src/core/scanner/fetcher.rs

use crate::config::AnalyzerConfig;
use crate::core::models::{FetchOutcome, FetchedPage};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::redirect::Policy;
use std::collections::BTreeMap;
use std::error::Error as _;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

/// The fixed header set that makes the fetch look like a desktop browser.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Performs the single GET of an analysis run.
///
/// Redirects are followed up to `config.max_redirects`, and the whole exchange,
/// body included, is bounded by `config.fetch_timeout`. Every failure (DNS, connect,
/// TLS, protocol, body read) is captured as `FetchOutcome::FetchFailed`; nothing is
/// retried and nothing is propagated.
///
/// # Arguments
/// * `url` - The validated target.
/// * `config` - Timeouts and user agent for the run.
pub async fn fetch(url: &Url, config: &AnalyzerConfig) -> FetchOutcome {
    info!(%url, timeout = ?config.fetch_timeout, "Starting primary fetch.");

    let client = match reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(browser_headers())
        .redirect(Policy::limited(config.max_redirects))
        .timeout(config.fetch_timeout)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client for primary fetch.");
            return FetchOutcome::FetchFailed {
                reason: format!("Failed to build HTTP client: {}", e),
            };
        }
    };

    let started = Instant::now();
    let response = match client.get(url.clone()).send().await {
        Ok(res) => res,
        Err(e) => {
            let reason = describe_error(&e);
            warn!(
                %url,
                reason = %reason,
                "Content fetch failed, continuing with partial analysis."
            );
            return FetchOutcome::FetchFailed { reason };
        }
    };

    let status_code = response.status().as_u16();
    let final_url = response.url().clone();
    let headers = collect_headers(response.headers());

    let body = match response.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            let reason = describe_error(&e);
            warn!(%url, reason = %reason, "Failed to read response body.");
            return FetchOutcome::FetchFailed { reason };
        }
    };
    let elapsed = started.elapsed();

    if final_url != *url {
        debug!(from = %url, to = %final_url, "Fetch followed redirects.");
    }
    info!(status = status_code, bytes = body.len(), ?elapsed, "Primary fetch finished.");

    FetchOutcome::Fetched(FetchedPage {
        status_code,
        headers,
        body,
        elapsed,
    })
}

/// Flattens a `HeaderMap` into lower-cased names. Repeated headers are joined with
/// `", "` and values that are not valid UTF-8 are decoded lossily.
pub(crate) fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = match value.to_str() {
            Ok(s) => s.to_string(),
            Err(_) => {
                warn!(header_name = %name, "Header contained invalid UTF-8.");
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            }
        };
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// Renders a reqwest error together with its innermost cause, which is where the
/// useful detail (refused connection, DNS failure, certificate problem) lives.
pub(crate) fn describe_error(e: &reqwest::Error) -> String {
    let mut root: Option<&dyn std::error::Error> = e.source();
    while let Some(next) = root.and_then(|r| r.source()) {
        root = Some(next);
    }
    match root {
        Some(cause) => format!("{}: {}", e, cause),
        None => e.to_string(),
    }
}
