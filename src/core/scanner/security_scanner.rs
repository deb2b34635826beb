// src/core/scanner/security_scanner.rs

use tracing::{debug, info, warn};

use crate::config::{AnalyzerConfig, PROBE_USER_AGENT};
use crate::core::models::{FetchOutcome, SecurityReport};
use crate::core::scanner::ssl_scanner::run_ssl_probe;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use url::Url;

/// Phrases typical of credential-phishing pages, matched case-insensitively.
const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "verify account",
    "update payment",
    "suspended account",
    "click here now",
];

// Literal, case-sensitive marker: tags with attributes are not counted.
const SCRIPT_TAG: &str = "<script>";
const EXCESSIVE_SCRIPT_THRESHOLD: usize = 10;
const LONG_HOST_THRESHOLD: usize = 50;

const PLAINTEXT_PENALTY: i64 = 25;
const INVALID_TLS_PENALTY: i64 = 15;
const PATTERN_PENALTY: i64 = 10;

pub const FLAG_IP_ADDRESS: &str = "IP address in URL";
pub const FLAG_LONG_DOMAIN: &str = "Unusually long domain name";
pub const FLAG_KEYWORD_PREFIX: &str = "Suspicious keyword: ";
pub const FLAG_EXCESSIVE_JS: &str = "Excessive JavaScript";
pub const FLAG_UNREACHABLE: &str = "Content blocked or unreachable";

static RE_DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}").unwrap());

/// Runs the security analysis for one target.
///
/// Encrypted targets get a TLS handshake probe; plaintext targets get a probe of
/// their `https` variant instead. Both probes degrade to `false` on any failure.
/// The suspicious-pattern scan and the score are computed from the URL and whatever
/// body the fetch produced.
pub async fn run_security_scan(
    url: &Url,
    outcome: &FetchOutcome,
    config: &AnalyzerConfig,
) -> SecurityReport {
    info!(%url, "Starting security scan.");
    let host = url.host_str().unwrap_or_default();
    let ssl_enabled = url.scheme() == "https";

    let (ssl_valid, https_redirect) = if ssl_enabled {
        (run_ssl_probe(host, config.tls_probe_timeout).await, false)
    } else {
        (false, probe_https_variant(url, config).await)
    };

    let report = assemble_security_report(url, outcome, ssl_valid, https_redirect);
    info!(
        ssl_enabled,
        ssl_valid = report.ssl_valid,
        https_redirect = report.https_redirect,
        flags = report.suspicious_patterns.len(),
        safety_score = report.safety_score,
        "Security scan finished."
    );
    report
}

/// Builds the report from the probe results, the URL and the fetched body.
///
/// Probe results that cannot apply to the URL's scheme are forced to `false`: a
/// plaintext target never has a valid handshake and an encrypted one never needs
/// an HTTPS variant.
fn assemble_security_report(
    url: &Url,
    outcome: &FetchOutcome,
    ssl_valid: bool,
    https_redirect: bool,
) -> SecurityReport {
    let ssl_enabled = url.scheme() == "https";
    let ssl_valid = ssl_enabled && ssl_valid;
    let https_redirect = !ssl_enabled && https_redirect;

    let body = outcome.page().map(|page| page.body_text()).unwrap_or_default();
    let suspicious_patterns = detect_suspicious_patterns(url, &body, outcome.is_failed());
    let safety_score = calculate_safety_score(ssl_enabled, ssl_valid, suspicious_patterns.len());

    SecurityReport {
        ssl_enabled,
        ssl_valid,
        https_redirect,
        suspicious_patterns,
        safety_score,
    }
}

/// Whether an answer from the `https` variant shows the site is served over HTTPS.
/// Only a direct 2xx counts; redirects and errors do not.
fn https_variant_served(status: StatusCode) -> bool {
    status.is_success()
}

/// Sends one GET to the `https` variant of a plaintext URL.
///
/// Redirects are not followed: only a direct 2xx answer counts as the site being
/// served over HTTPS.
async fn probe_https_variant(url: &Url, config: &AnalyzerConfig) -> bool {
    let mut https_url = url.clone();
    if https_url.set_scheme("https").is_err() {
        debug!(%url, "URL cannot be switched to https.");
        return false;
    }

    let client = match reqwest::Client::builder()
        .user_agent(PROBE_USER_AGENT)
        .redirect(Policy::none())
        .timeout(config.redirect_probe_timeout)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to build HTTP client for HTTPS probe.");
            return false;
        }
    };

    match client.get(https_url.clone()).send().await {
        Ok(res) => {
            debug!(url = %https_url, status = %res.status(), "HTTPS variant answered.");
            https_variant_served(res.status())
        }
        Err(e) => {
            debug!(url = %https_url, error = %e, "HTTPS redirect check failed.");
            false
        }
    }
}

/// Scans the URL and body for weak phishing signals.
///
/// Flags are emitted in a fixed order: IP literal, long host, each keyword in list
/// order, script count, and finally the unreachable marker.
pub fn detect_suspicious_patterns(url: &Url, body: &str, fetch_failed: bool) -> Vec<String> {
    let mut patterns = Vec::new();

    if RE_DOTTED_QUAD.is_match(url.as_str()) {
        debug!("Dotted-quad address found in URL.");
        patterns.push(FLAG_IP_ADDRESS.to_string());
    }

    if url.host_str().unwrap_or_default().len() > LONG_HOST_THRESHOLD {
        patterns.push(FLAG_LONG_DOMAIN.to_string());
    }

    let lowered = body.to_lowercase();
    for keyword in SUSPICIOUS_KEYWORDS {
        if lowered.contains(keyword) {
            debug!(keyword, "Suspicious keyword found in body.");
            patterns.push(format!("{}{}", FLAG_KEYWORD_PREFIX, keyword));
        }
    }

    let scripts = body.matches(SCRIPT_TAG).count();
    if scripts > EXCESSIVE_SCRIPT_THRESHOLD {
        debug!(scripts, "Script tag count above threshold.");
        patterns.push(FLAG_EXCESSIVE_JS.to_string());
    }

    if fetch_failed {
        patterns.push(FLAG_UNREACHABLE.to_string());
    }

    patterns
}

/// Computes the 0-100 safety score.
///
/// Starts at 100, loses 25 for plaintext transport or 15 for a failed handshake,
/// then 10 per suspicious pattern, and is clamped to the range.
pub fn calculate_safety_score(ssl_enabled: bool, ssl_valid: bool, pattern_count: usize) -> u8 {
    let mut score: i64 = 100;

    if !ssl_enabled {
        score -= PLAINTEXT_PENALTY;
    } else if !ssl_valid {
        score -= INVALID_TLS_PENALTY;
    }

    let patterns = i64::try_from(pattern_count).unwrap_or(i64::MAX);
    score = score.saturating_sub(patterns.saturating_mul(PATTERN_PENALTY));

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::FetchedPage;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn many_scripts_on_valid_https_scores_ninety() {
        let body = "<script></script>".repeat(11);
        let patterns = detect_suspicious_patterns(&url("https://example.com/"), &body, false);
        assert_eq!(patterns, vec![FLAG_EXCESSIVE_JS.to_string()]);
        assert_eq!(calculate_safety_score(true, true, patterns.len()), 90);
    }

    #[test]
    fn exactly_ten_scripts_is_not_excessive() {
        let body = "<script></script>".repeat(10);
        assert!(detect_suspicious_patterns(&url("https://example.com/"), &body, false).is_empty());
    }

    #[test]
    fn script_count_is_literal() {
        let body = "<SCRIPT></SCRIPT><script src=\"a.js\"></script>".repeat(20);
        assert!(detect_suspicious_patterns(&url("https://example.com/"), &body, false).is_empty());
    }

    #[test]
    fn phishing_phrase_over_plain_http_scores_sixty_five() {
        let body = "<p>Please VERIFY ACCOUNT details</p>";
        let patterns = detect_suspicious_patterns(&url("http://example.com/"), body, false);
        assert_eq!(patterns, vec!["Suspicious keyword: verify account".to_string()]);
        assert_eq!(calculate_safety_score(false, false, patterns.len()), 65);
    }

    #[test]
    fn keywords_follow_list_order() {
        let body = "click here now to update payment or verify account";
        let patterns = detect_suspicious_patterns(&url("https://example.com/"), body, false);
        assert_eq!(
            patterns,
            vec![
                "Suspicious keyword: verify account",
                "Suspicious keyword: update payment",
                "Suspicious keyword: click here now",
            ]
        );
    }

    #[test]
    fn ip_host_is_flagged_even_when_unreachable() {
        let patterns = detect_suspicious_patterns(&url("http://10.0.0.1/login"), "", true);
        assert_eq!(
            patterns,
            vec![FLAG_IP_ADDRESS.to_string(), FLAG_UNREACHABLE.to_string()]
        );
    }

    #[test]
    fn long_host_is_flagged() {
        let host = format!("{}.example.com", "a".repeat(45));
        let patterns = detect_suspicious_patterns(&url(&format!("https://{}/", host)), "", false);
        assert_eq!(patterns, vec![FLAG_LONG_DOMAIN.to_string()]);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(calculate_safety_score(false, false, 50), 0);
        assert_eq!(calculate_safety_score(true, true, usize::MAX), 0);
        assert_eq!(calculate_safety_score(true, true, 0), 100);
        assert_eq!(calculate_safety_score(true, false, 0), 85);
    }

    fn fetched(body: &str) -> FetchOutcome {
        FetchOutcome::Fetched(FetchedPage {
            status_code: 200,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
            elapsed: Duration::from_millis(3),
        })
    }

    #[test]
    fn only_direct_success_counts_as_https() {
        assert!(https_variant_served(StatusCode::OK));
        assert!(https_variant_served(StatusCode::NO_CONTENT));
        assert!(!https_variant_served(StatusCode::MOVED_PERMANENTLY));
        assert!(!https_variant_served(StatusCode::FOUND));
        assert!(!https_variant_served(StatusCode::NOT_FOUND));
        assert!(!https_variant_served(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn valid_handshake_with_many_scripts_reports_ninety() {
        let body = format!("<html>{}</html>", "<script>var a = 1;</script>".repeat(11));
        let report = assemble_security_report(
            &url("https://example.com/"),
            &fetched(&body),
            true,
            false,
        );
        assert!(report.ssl_enabled);
        assert!(report.ssl_valid);
        assert!(!report.https_redirect);
        assert_eq!(report.suspicious_patterns, vec![FLAG_EXCESSIVE_JS.to_string()]);
        assert_eq!(report.safety_score, 90);
    }

    #[test]
    fn plaintext_site_with_https_variant_reports_redirect() {
        let target = url("http://example.com/");
        let report = assemble_security_report(&target, &fetched("<p>hi</p>"), true, true);
        assert!(!report.ssl_enabled);
        assert!(!report.ssl_valid);
        assert!(report.https_redirect);
        assert_eq!(report.safety_score, 75);
    }

    #[test]
    fn failed_handshake_costs_fifteen() {
        let report =
            assemble_security_report(&url("https://example.com/"), &fetched(""), false, true);
        assert!(!report.https_redirect);
        assert_eq!(report.safety_score, 85);
    }

    #[tokio::test]
    async fn plaintext_target_never_reports_valid_tls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("verify account now"))
            .mount(&server)
            .await;

        let target = url(&server.uri());
        let outcome = fetched("verify account now");
        let report = run_security_scan(&target, &outcome, &AnalyzerConfig::default()).await;

        assert!(!report.ssl_enabled);
        assert!(!report.ssl_valid);
        // The mock speaks plain HTTP, so its https variant cannot answer.
        assert!(!report.https_redirect);
        assert_eq!(
            report.suspicious_patterns,
            vec![FLAG_IP_ADDRESS, "Suspicious keyword: verify account"]
        );
        assert_eq!(report.safety_score, 55);
    }

    #[tokio::test]
    async fn failed_fetch_adds_unreachable_flag() {
        let outcome = FetchOutcome::FetchFailed { reason: "refused".into() };
        let report =
            run_security_scan(&url("http://127.0.0.1:1/"), &outcome, &AnalyzerConfig::default())
                .await;
        assert_eq!(report.suspicious_patterns.last().map(String::as_str), Some(FLAG_UNREACHABLE));
        assert!(report.safety_score <= 100);
    }
}
