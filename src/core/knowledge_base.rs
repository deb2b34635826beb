//! Static catalogue of everything an analysis report can tell a user about a target.
//! Each report signal maps to one entry with a severity, an explanation and what a
//! visitor or site owner can do about it.

use crate::core::models::{AnalysisReport, LoadSpeed, Severity, UNABLE_TO_FETCH};
use crate::core::scanner::security_scanner::{
    FLAG_EXCESSIVE_JS, FLAG_IP_ADDRESS, FLAG_KEYWORD_PREFIX, FLAG_LONG_DOMAIN, FLAG_UNREACHABLE,
};
use std::fmt;

/// Groups related findings in the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    /// Encryption of the connection to the target.
    Transport,
    /// Weak phishing signals found in the URL or page.
    Reputation,
    Performance,
    Content,
    /// Registration metadata.
    Domain,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Transport => write!(f, "Transport Security"),
            FindingCategory::Reputation => write!(f, "Suspicious Patterns"),
            FindingCategory::Performance => write!(f, "Performance"),
            FindingCategory::Content => write!(f, "Page Content"),
            FindingCategory::Domain => write!(f, "Domain Registration"),
        }
    }
}

/// Human-readable information about one kind of finding.
pub struct FindingDetail {
    /// A unique, machine-readable identifier (e.g., "TRANSPORT_PLAINTEXT").
    pub code: &'static str,
    pub title: &'static str,
    pub category: FindingCategory,
    pub severity: Severity,
    /// What the finding means for someone about to visit the target.
    pub description: &'static str,
    /// What to do about it.
    pub remediation: &'static str,
}

/// A finding raised for a concrete report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub code: &'static str,
    /// The report value that triggered the finding, when there is one worth showing.
    pub evidence: Option<String>,
}

impl Finding {
    fn new(code: &'static str) -> Self {
        Self { code, evidence: None }
    }

    fn with_evidence(code: &'static str, evidence: impl Into<String>) -> Self {
        Self {
            code,
            evidence: Some(evidence.into()),
        }
    }

    pub fn detail(&self) -> Option<&'static FindingDetail> {
        get_finding_detail(self.code)
    }
}

static FINDINGS: &[FindingDetail] = &[
    // --- Transport ---
    FindingDetail {
        code: "TRANSPORT_PLAINTEXT",
        title: "Unencrypted Connection",
        category: FindingCategory::Transport,
        severity: Severity::Critical,
        description: "The URL uses plain HTTP. Anything sent to or received from the site, including passwords and form data, can be read or altered by anyone on the network path.",
        remediation: "Do not enter credentials or personal data on this page. Site owners should serve all pages over HTTPS and redirect HTTP requests to it.",
    },
    FindingDetail {
        code: "TRANSPORT_HTTPS_AVAILABLE",
        title: "HTTPS Version Available",
        category: FindingCategory::Transport,
        severity: Severity::Info,
        description: "The same address answers over HTTPS, but the analyzed link points to the unencrypted version.",
        remediation: "Prefer the https:// form of the link. Site owners should redirect HTTP to HTTPS and enable HSTS.",
    },
    FindingDetail {
        code: "TRANSPORT_NO_HTTPS_VARIANT",
        title: "No HTTPS Version",
        category: FindingCategory::Transport,
        severity: Severity::Warning,
        description: "The site did not answer an HTTPS request for the same address, so there is no encrypted alternative to this link.",
        remediation: "Treat any data exchanged with this site as public. Site owners should install a certificate and serve the site over HTTPS.",
    },
    FindingDetail {
        code: "TLS_HANDSHAKE_FAILED",
        title: "TLS Handshake Failed",
        category: FindingCategory::Transport,
        severity: Severity::Critical,
        description: "A secure connection to port 443 could not be established or verified. The certificate may be expired, self-signed, issued for another name, or the server may not speak TLS at all.",
        remediation: "Browsers will show a certificate warning; do not bypass it. Site owners should install a valid certificate for this host name.",
    },
    // --- Reputation ---
    FindingDetail {
        code: "PATTERN_IP_ADDRESS",
        title: "IP Address in URL",
        category: FindingCategory::Reputation,
        severity: Severity::Warning,
        description: "The URL contains a raw IP address instead of a domain name. Legitimate services rarely link this way; phishing kits often do to avoid domain takedowns.",
        remediation: "Verify where the link came from before visiting it, and navigate to the organisation's site by name instead.",
    },
    FindingDetail {
        code: "PATTERN_LONG_DOMAIN",
        title: "Unusually Long Domain Name",
        category: FindingCategory::Reputation,
        severity: Severity::Warning,
        description: "The host name is longer than fifty characters. Long names are used to push the real domain out of view in narrow address bars.",
        remediation: "Read the host name from the right: the last two labels are the domain that actually controls the page.",
    },
    FindingDetail {
        code: "PATTERN_PHISHING_KEYWORD",
        title: "Phishing Phrase on Page",
        category: FindingCategory::Reputation,
        severity: Severity::Critical,
        description: "The page contains wording typical of credential-phishing lures, such as requests to verify an account or update payment details.",
        remediation: "Do not follow the page's instructions. Contact the organisation through a channel you already trust.",
    },
    FindingDetail {
        code: "PATTERN_EXCESSIVE_JS",
        title: "Excessive JavaScript",
        category: FindingCategory::Reputation,
        severity: Severity::Info,
        description: "The page embeds more than ten inline script blocks. This is common on heavy sites but also on pages that obfuscate their behaviour.",
        remediation: "No action is required on its own. Weigh it together with the other findings.",
    },
    FindingDetail {
        code: "PATTERN_UNREACHABLE",
        title: "Content Blocked or Unreachable",
        category: FindingCategory::Reputation,
        severity: Severity::Warning,
        description: "The page could not be retrieved. The server may be down, or it may be filtering automated clients. Content, technology and performance results are placeholders.",
        remediation: "Retry later or from another network. A site that only blocks automated clients can still be visited in a browser.",
    },
    // --- Performance ---
    FindingDetail {
        code: "PERFORMANCE_SLOW",
        title: "Slow Response",
        category: FindingCategory::Performance,
        severity: Severity::Info,
        description: "The page took three seconds or more to arrive.",
        remediation: "Site owners should look at server response time, page weight and caching.",
    },
    // --- Content ---
    FindingDetail {
        code: "CONTENT_FORM_OVER_PLAINTEXT",
        title: "Form on Unencrypted Page",
        category: FindingCategory::Content,
        severity: Severity::Warning,
        description: "The page contains a form but was served over plain HTTP, so whatever is typed into it travels unencrypted.",
        remediation: "Do not submit sensitive information through this form.",
    },
    // --- Domain ---
    FindingDetail {
        code: "DOMAIN_WHOIS_UNAVAILABLE",
        title: "Registration Data Unavailable",
        category: FindingCategory::Domain,
        severity: Severity::Info,
        description: "No WHOIS registration data could be retrieved for this domain. The registry may restrict queries, or the lookup timed out.",
        remediation: "Check the registry's web lookup manually if the age or owner of the domain matters.",
    },
];

/// Retrieves the full detail for a given finding code.
///
/// # Arguments
///
/// * `code` - The machine-readable code for the finding.
///
/// # Returns
///
/// The matching `FindingDetail`, or `None` if the code does not exist.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    FINDINGS.iter().find(|f| f.code == code)
}

/// Derives the findings a report warrants, most severe first.
pub fn findings_for(report: &AnalysisReport) -> Vec<Finding> {
    let security = &report.security;
    let mut findings = Vec::new();

    if !security.ssl_enabled {
        findings.push(Finding::new("TRANSPORT_PLAINTEXT"));
        findings.push(Finding::new(if security.https_redirect {
            "TRANSPORT_HTTPS_AVAILABLE"
        } else {
            "TRANSPORT_NO_HTTPS_VARIANT"
        }));
    } else if !security.ssl_valid {
        findings.push(Finding::new("TLS_HANDSHAKE_FAILED"));
    }

    for pattern in &security.suspicious_patterns {
        let finding = match pattern.as_str() {
            FLAG_IP_ADDRESS => Finding::new("PATTERN_IP_ADDRESS"),
            FLAG_LONG_DOMAIN => Finding::with_evidence("PATTERN_LONG_DOMAIN", report.domain.domain.clone()),
            FLAG_EXCESSIVE_JS => Finding::new("PATTERN_EXCESSIVE_JS"),
            FLAG_UNREACHABLE => Finding::new("PATTERN_UNREACHABLE"),
            other => match other.strip_prefix(FLAG_KEYWORD_PREFIX) {
                Some(keyword) => Finding::with_evidence("PATTERN_PHISHING_KEYWORD", keyword),
                None => continue,
            },
        };
        findings.push(finding);
    }

    if report.performance.load_speed == LoadSpeed::Slow {
        findings.push(Finding::with_evidence(
            "PERFORMANCE_SLOW",
            format!("{:.2}s", report.performance.response_time),
        ));
    }

    if report.content.has_forms && !security.ssl_enabled {
        findings.push(Finding::new("CONTENT_FORM_OVER_PLAINTEXT"));
    }

    let domain = &report.domain;
    if [&domain.registrar, &domain.creation_date, &domain.expiration_date, &domain.country]
        .iter()
        .all(|field| field.as_str() == UNABLE_TO_FETCH)
    {
        findings.push(Finding::new("DOMAIN_WHOIS_UNAVAILABLE"));
    }

    // Stable: equal severities keep detection order.
    findings.sort_by_key(|f| f.detail().map(|d| d.severity).unwrap_or(Severity::Info));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        ContentReport, DomainReport, PerformanceReport, SecurityReport, TechnologyReport,
    };

    fn report(security: SecurityReport) -> AnalysisReport {
        AnalysisReport {
            url: "http://10.0.0.1/".into(),
            analysis_time: 1.0,
            security,
            performance: PerformanceReport {
                response_time: 0.2,
                page_size: 10,
                status_code: 200,
                load_speed: LoadSpeed::Fast,
            },
            content: ContentReport {
                title: None,
                description: None,
                keywords: None,
                word_count: 0,
                has_forms: true,
                external_links: 0,
            },
            technology: TechnologyReport::blocked(),
            domain: DomainReport::unavailable("10.0.0.1"),
        }
    }

    #[test]
    fn every_raised_code_has_a_detail() {
        let r = report(SecurityReport {
            ssl_enabled: false,
            ssl_valid: false,
            https_redirect: false,
            suspicious_patterns: vec![
                FLAG_IP_ADDRESS.into(),
                FLAG_LONG_DOMAIN.into(),
                format!("{}verify account", FLAG_KEYWORD_PREFIX),
                FLAG_EXCESSIVE_JS.into(),
                FLAG_UNREACHABLE.into(),
            ],
            safety_score: 0,
        });
        let findings = findings_for(&r);
        assert!(findings.iter().all(|f| f.detail().is_some()));
        assert!(findings.iter().any(|f| f.code == "CONTENT_FORM_OVER_PLAINTEXT"));
        assert!(findings.iter().any(|f| f.code == "DOMAIN_WHOIS_UNAVAILABLE"));
    }

    #[test]
    fn critical_findings_come_first() {
        let r = report(SecurityReport {
            ssl_enabled: false,
            ssl_valid: false,
            https_redirect: true,
            suspicious_patterns: vec![
                FLAG_IP_ADDRESS.into(),
                format!("{}update payment", FLAG_KEYWORD_PREFIX),
            ],
            safety_score: 55,
        });
        let findings = findings_for(&r);
        let codes: Vec<&str> = findings.iter().map(|f| f.code).collect();
        assert_eq!(
            &codes[..3],
            &["TRANSPORT_PLAINTEXT", "PATTERN_PHISHING_KEYWORD", "PATTERN_IP_ADDRESS"]
        );
        let keyword = findings.iter().find(|f| f.code == "PATTERN_PHISHING_KEYWORD");
        assert_eq!(keyword.and_then(|f| f.evidence.as_deref()), Some("update payment"));
        assert!(codes.contains(&"TRANSPORT_HTTPS_AVAILABLE"));
    }

    #[test]
    fn clean_https_report_has_no_transport_findings() {
        let mut r = report(SecurityReport {
            ssl_enabled: true,
            ssl_valid: true,
            https_redirect: false,
            suspicious_patterns: vec![],
            safety_score: 100,
        });
        r.domain.registrar = "Registrar".into();
        assert!(findings_for(&r).is_empty());
    }
}
