// src/core/scanner/mod.rs

// Public interface of the `scanner` module: the individual analyzers and the
// orchestrator that runs them over a single fetch.
pub mod connectivity;
pub mod content_scanner;
pub mod dns_scanner;
pub mod domain_scanner;
pub mod fetcher;
pub mod fingerprint_scanner;
pub mod performance_scanner;
pub mod security_scanner;
pub mod ssl_scanner;

use std::sync::Arc;
use std::time::Instant;

use tokio::task::{spawn_blocking, JoinError};
use tracing::{error, info};
use url::Url;

use crate::config::AnalyzerConfig;
use crate::core::document::Document;
use crate::core::error::AnalysisError;
use crate::core::models::AnalysisReport;
use crate::core::target::validate_target;
use crate::core::whois::{ServiceWhoisClient, WhoisLookup};
use self::content_scanner::run_content_scan;
use self::domain_scanner::run_domain_scan;
use self::fetcher::fetch;
use self::fingerprint_scanner::run_technology_scan;
use self::performance_scanner::run_performance_scan;
use self::security_scanner::run_security_scan;

// Content and technology share one parsed document, so they fail together.
const DOCUMENT_STAGE: &str = "content/technology";

/// Runs the full analysis pipeline for one URL at a time.
///
/// Holds no per-request state: every call to [`Analyzer::analyze`] fetches once,
/// feeds that single outcome to all analyzers and assembles a fresh report. Cheap
/// to clone and safe to share between concurrent requests.
pub struct Analyzer<W = ServiceWhoisClient> {
    config: Arc<AnalyzerConfig>,
    whois: Arc<W>,
}

impl<W> Clone for Analyzer<W> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            whois: Arc::clone(&self.whois),
        }
    }
}

impl Analyzer<ServiceWhoisClient> {
    /// Builds an analyzer that queries WHOIS over the network.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_whois(config, ServiceWhoisClient::new())
    }
}

impl<W: WhoisLookup + 'static> Analyzer<W> {
    pub fn with_whois(config: AnalyzerConfig, whois: W) -> Self {
        Self {
            config: Arc::new(config),
            whois: Arc::new(whois),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Validates `target` and analyzes it.
    ///
    /// # Returns
    /// A complete report, with sentinels for every facet that could not be observed,
    /// or an error when the input is rejected or an analyzer aborts.
    pub async fn analyze(&self, target: &str) -> Result<AnalysisReport, AnalysisError> {
        let url = validate_target(target)?;
        self.analyze_url(url).await
    }

    /// Analyzes an already validated URL.
    ///
    /// The domain lookup starts immediately since it only needs the URL. The fetch
    /// runs next; performance is measured right after it, then security and the
    /// document-based analyzers (content, technology) run concurrently with the
    /// lookup. A panicking analyzer aborts the whole request.
    pub async fn analyze_url(&self, url: Url) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();
        info!(%url, "Starting analysis.");

        let domain_task = {
            let url = url.clone();
            let whois = Arc::clone(&self.whois);
            let timeout = self.config.whois_timeout;
            tokio::spawn(async move { run_domain_scan(&url, whois.as_ref(), timeout).await })
        };

        let outcome = Arc::new(fetch(&url, &self.config).await);
        let performance = run_performance_scan(&outcome, started.elapsed());

        let security_task = {
            let url = url.clone();
            let outcome = Arc::clone(&outcome);
            let config = Arc::clone(&self.config);
            tokio::spawn(async move { run_security_scan(&url, &outcome, &config).await })
        };

        // The parsed tree is not `Send`, so it is built and consumed on one thread.
        let document_task = {
            let outcome = Arc::clone(&outcome);
            spawn_blocking(move || {
                let document = Document::from_outcome(&outcome);
                let content = run_content_scan(document.as_ref());
                let technology = run_technology_scan(&outcome, document.as_ref());
                (content, technology)
            })
        };

        let (security, document_results, domain) =
            tokio::join!(security_task, document_task, domain_task);

        let security = security.map_err(|e| aborted("security", e))?;
        let (content, technology) = document_results.map_err(|e| aborted(DOCUMENT_STAGE, e))?;
        let domain = domain.map_err(|e| aborted("domain", e))?;

        let analysis_time = round_centis(started.elapsed().as_secs_f64());
        info!(
            %url,
            analysis_time,
            safety_score = security.safety_score,
            "Analysis finished."
        );

        Ok(AnalysisReport {
            url: url.to_string(),
            analysis_time,
            security,
            performance,
            content,
            technology,
            domain,
        })
    }
}

fn aborted(stage: &'static str, e: JoinError) -> AnalysisError {
    error!(stage, error = %e, "Analyzer task aborted!");
    AnalysisError::Analyzer {
        stage,
        cause: e.to_string(),
    }
}

fn round_centis(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        ContentReport, DomainReport, LoadSpeed, BLOCKED_SERVER, UNABLE_TO_FETCH,
    };
    use crate::core::scanner::security_scanner::{FLAG_IP_ADDRESS, FLAG_UNREACHABLE};
    use crate::core::whois::{WhoisError, WhoisRecord, WhoisValue};
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedWhois;

    impl WhoisLookup for FixedWhois {
        async fn lookup(&self, _domain: &str) -> Result<WhoisRecord, WhoisError> {
            Ok(WhoisRecord {
                registrar: Some(WhoisValue::Single("Loopback Registrar".into())),
                ..Default::default()
            })
        }
    }

    struct FailingWhois;

    impl WhoisLookup for FailingWhois {
        async fn lookup(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
            Err(WhoisError::Lookup {
                domain: domain.to_string(),
                reason: "no match".into(),
            })
        }
    }

    struct PanickingWhois;

    impl WhoisLookup for PanickingWhois {
        async fn lookup(&self, _domain: &str) -> Result<WhoisRecord, WhoisError> {
            panic!("registry parser bug")
        }
    }

    fn test_config() -> AnalyzerConfig {
        AnalyzerConfig {
            fetch_timeout: Duration::from_secs(5),
            redirect_probe_timeout: Duration::from_secs(2),
            tls_probe_timeout: Duration::from_secs(2),
            whois_timeout: Duration::from_secs(2),
            ..AnalyzerConfig::default()
        }
    }

    const PAGE: &str = r#"<html><head><title>Shop</title>
        <meta name="description" content="A test shop">
        <script src="/static/react.production.min.js"></script>
        </head><body><p>Please verify account details</p>
        <a href="https://cdn.example/">cdn</a></body></html>"#;

    async fn page_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("server", "test-server")
                    .set_body_string(PAGE),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn unreachable_target_still_yields_report() {
        let analyzer = Analyzer::with_whois(test_config(), FixedWhois);
        let report = analyzer.analyze("http://127.0.0.1:1/").await.unwrap();

        assert_eq!(report.performance.load_speed, LoadSpeed::Unreachable);
        assert_eq!(report.performance.status_code, 0);
        assert_eq!(report.performance.page_size, 0);
        assert_eq!(
            report.security.suspicious_patterns,
            vec![FLAG_IP_ADDRESS, FLAG_UNREACHABLE]
        );
        assert!(!report.security.ssl_enabled);
        assert!(!report.security.https_redirect);
        assert_eq!(report.security.safety_score, 55);
        assert_eq!(report.content, ContentReport::blocked());
        assert_eq!(report.technology.server.as_deref(), Some(BLOCKED_SERVER));
        assert_eq!(report.domain.domain, "127.0.0.1");
        assert_eq!(report.domain.registrar, "Loopback Registrar");
        assert_eq!(report.domain.country, UNABLE_TO_FETCH);
    }

    #[tokio::test]
    async fn reachable_target_is_fully_analyzed() {
        let server = page_server().await;
        let analyzer = Analyzer::with_whois(test_config(), FailingWhois);
        let report = analyzer.analyze(&server.uri()).await.unwrap();

        assert_eq!(report.performance.status_code, 200);
        assert_eq!(report.performance.page_size, PAGE.len());
        assert_ne!(report.performance.load_speed, LoadSpeed::Unreachable);

        assert_eq!(
            report.security.suspicious_patterns,
            vec![FLAG_IP_ADDRESS, "Suspicious keyword: verify account"]
        );
        assert_eq!(report.security.safety_score, 55);

        assert_eq!(report.content.title.as_deref(), Some("Shop"));
        assert_eq!(report.content.description.as_deref(), Some("A test shop"));
        assert_eq!(report.content.external_links, 1);

        assert_eq!(report.technology.server.as_deref(), Some("test-server"));
        assert_eq!(report.technology.frameworks, vec!["React"]);

        assert_eq!(report.domain, DomainReport::unavailable("127.0.0.1"));
        assert!(report.analysis_time >= 0.0);
    }

    #[tokio::test]
    async fn repeated_analysis_is_stable() {
        let server = page_server().await;
        let analyzer = Analyzer::with_whois(test_config(), FixedWhois);

        let first = analyzer.analyze(&server.uri()).await.unwrap();
        let second = analyzer.clone().analyze(&server.uri()).await.unwrap();

        assert_eq!(first.security, second.security);
        assert_eq!(first.content, second.content);
        assert_eq!(first.technology, second.technology);
        assert_eq!(first.domain, second.domain);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_analysis() {
        let analyzer = Analyzer::with_whois(test_config(), FixedWhois);
        let err = analyzer.analyze("ftp://example.com").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn panicking_analyzer_aborts_request() {
        let analyzer = Analyzer::with_whois(test_config(), PanickingWhois);
        let err = analyzer.analyze("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Analyzer { stage: "domain", .. }));
        assert!(err.to_string().starts_with("Analysis failed:"));
    }

    #[tokio::test]
    async fn document_task_failure_names_both_analyzers() {
        let join_error = spawn_blocking::<_, ()>(|| panic!("fingerprint rule bug"))
            .await
            .unwrap_err();
        let err = aborted(DOCUMENT_STAGE, join_error);
        assert!(matches!(
            err,
            AnalysisError::Analyzer { stage: "content/technology", .. }
        ));
    }

    #[test]
    fn analysis_time_has_two_decimals() {
        assert_eq!(round_centis(1.23456), 1.23);
        assert_eq!(round_centis(0.005), 0.01);
    }
}
