// src/config.rs

use std::time::Duration;

/// Browser-like user agent sent with the primary fetch.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Shorter user agent used by the side probes (HTTPS variant, connectivity).
pub const PROBE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Every tunable of an analysis run.
///
/// Each blocking operation carries its own bound so that one slow probe cannot
/// hold the whole request indefinitely.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub fetch_timeout: Duration,
    pub redirect_probe_timeout: Duration,
    pub tls_probe_timeout: Duration,
    pub whois_timeout: Duration,
    pub connectivity_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(15),
            redirect_probe_timeout: Duration::from_secs(5),
            tls_probe_timeout: Duration::from_secs(5),
            whois_timeout: Duration::from_secs(10),
            connectivity_timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_fetch_timeout(mut self, secs: u64) -> Self {
        self.fetch_timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_whois_timeout(mut self, secs: u64) -> Self {
        self.whois_timeout = Duration::from_secs(secs);
        self
    }
}
