// src/core/scanner/domain_scanner.rs

use crate::core::models::{DomainReport, UNABLE_TO_FETCH, UNKNOWN_DOMAIN};
use crate::core::whois::{parse::normalize_date, WhoisLookup, WhoisValue};
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::time::Duration;
use tldextract::{TldExtractor, TldOption};
use tracing::{debug, info, warn};
use url::Url;

// ICANN section of the Public Suffix List, from the snapshot bundled with tldextract.
static EXTRACTOR: Lazy<TldExtractor> = Lazy::new(|| TldExtractor::new(TldOption::default()));

/// Looks up registration metadata for the target's host.
///
/// The fetch outcome plays no part here. The report's `domain` is the URL host as
/// given; the WHOIS query uses its registrable part. A failed or timed-out lookup
/// keeps `domain` and marks all four fields unavailable; a partial record marks
/// only the missing fields.
///
/// # Arguments
/// * `url` - The validated target.
/// * `whois` - The lookup backend.
/// * `timeout` - Bound for the whole lookup.
pub async fn run_domain_scan<W: WhoisLookup>(
    url: &Url,
    whois: &W,
    timeout: Duration,
) -> DomainReport {
    let host = url.host_str().unwrap_or_default();
    if host.is_empty() {
        warn!(%url, "URL has no host, skipping WHOIS.");
        return DomainReport::unavailable(UNKNOWN_DOMAIN);
    }

    let query = registrable_domain(host);
    info!(host, query = %query, "Starting domain scan.");

    let record = match tokio::time::timeout(timeout, whois.lookup(&query)).await {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => {
            warn!(domain = %query, error = %e, "WHOIS lookup failed.");
            return DomainReport::unavailable(host);
        }
        Err(_) => {
            warn!(domain = %query, ?timeout, "WHOIS lookup timed out.");
            return DomainReport::unavailable(host);
        }
    };

    let report = DomainReport {
        domain: host.to_string(),
        registrar: field_or_sentinel(record.registrar.as_ref(), str::to_string),
        creation_date: field_or_sentinel(record.creation_date.as_ref(), normalize_date),
        expiration_date: field_or_sentinel(record.expiration_date.as_ref(), normalize_date),
        country: field_or_sentinel(record.country.as_ref(), str::to_string),
    };
    debug!(?report, "Domain scan finished.");
    report
}

fn field_or_sentinel(value: Option<&WhoisValue>, render: impl Fn(&str) -> String) -> String {
    value
        .and_then(WhoisValue::first)
        .map(render)
        .unwrap_or_else(|| UNABLE_TO_FETCH.to_string())
}

/// Reduces a host name to the part a registry holds a record for.
///
/// IP literals are kept whole. Names are split against the Public Suffix List, so
/// `shop.example.ltd.uk` becomes `example.ltd.uk`. A name the list cannot split is
/// returned lower-cased as given.
pub fn registrable_domain(host: &str) -> String {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if bare.parse::<IpAddr>().is_ok() {
        return bare.to_string();
    }

    let name = bare.trim_end_matches('.').to_ascii_lowercase();
    match EXTRACTOR.extract(&format!("http://{}/", name)) {
        Ok(parts) => match (parts.domain, parts.suffix) {
            (Some(domain), Some(suffix)) => format!("{}.{}", domain, suffix),
            (Some(domain), None) => domain,
            _ => name,
        },
        Err(e) => {
            debug!(host = %name, error = %e, "Public suffix split failed, using host as is.");
            name
        }
    }
}
