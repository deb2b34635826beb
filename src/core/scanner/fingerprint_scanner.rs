// src/core/scanner/fingerprint_scanner.rs

use tracing::{debug, info};
use crate::core::document::Document;
use crate::core::models::{FetchOutcome, TechnologyReport, UNKNOWN_SERVER};

/// Where a detected marker is recorded in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Framework,
    Technology,
}

/// A rule mapping a lower-case markup substring to a named technology.
struct FingerprintRule<'a> {
    /// The substring searched for in the lower-cased markup.
    marker: &'a str,
    /// The name reported when the marker is present (e.g., "React").
    tech_name: &'a str,
    slot: Slot,
}

/// A CMS signature; any one of its markers identifies it.
struct CmsRule<'a> {
    markers: &'a [&'a str],
    cms_name: &'a str,
}

/// Library and framework markers, applied in this order.
static RULES: &[FingerprintRule] = &[
    FingerprintRule { marker: "react", tech_name: "React", slot: Slot::Framework },
    FingerprintRule { marker: "vue", tech_name: "Vue.js", slot: Slot::Framework },
    FingerprintRule { marker: "angular", tech_name: "Angular", slot: Slot::Framework },
    FingerprintRule { marker: "jquery", tech_name: "jQuery", slot: Slot::Technology },
    FingerprintRule { marker: "bootstrap", tech_name: "Bootstrap", slot: Slot::Technology },
];

/// CMS signatures. Mutually exclusive: the first matching entry wins.
static CMS_RULES: &[CmsRule] = &[
    CmsRule { markers: &["wp-content", "wordpress"], cms_name: "WordPress" },
    CmsRule { markers: &["drupal"], cms_name: "Drupal" },
    CmsRule { markers: &["joomla"], cms_name: "Joomla" },
];

/// Fingerprints the server software, client-side libraries and CMS of the target.
///
/// Header-derived fields come from the fetched response; library and CMS markers
/// are searched case-insensitively in the serialized document.
///
/// # Arguments
/// * `outcome` - The fetch outcome of the current run.
/// * `document` - The parsed body, if one exists.
///
/// # Returns
/// A `TechnologyReport`, or the minimal blocked record when there was no response.
pub fn run_technology_scan(
    outcome: &FetchOutcome,
    document: Option<&Document>,
) -> TechnologyReport {
    let Some(page) = outcome.page() else {
        info!("Fetch failed, emitting blocked technology record.");
        return TechnologyReport::blocked();
    };

    let mut report = TechnologyReport {
        server: Some(page.header("server").unwrap_or(UNKNOWN_SERVER).to_string()),
        technologies: Vec::new(),
        cms_detected: None,
        frameworks: Vec::new(),
    };

    if let Some(powered_by) = page.header("x-powered-by") {
        debug!(powered_by, "Found x-powered-by header.");
        push_unique(&mut report.technologies, powered_by);
    }

    if let Some(document) = document {
        let markup = document.markup().to_lowercase();
        apply_rules(&markup, &mut report);
        report.cms_detected = detect_cms(&markup);
    }

    info!(
        server = ?report.server,
        technologies = report.technologies.len(),
        frameworks = report.frameworks.len(),
        cms = ?report.cms_detected,
        "Technology scan finished."
    );
    report
}

fn apply_rules(markup: &str, report: &mut TechnologyReport) {
    debug!(total_rules = %RULES.len(), "Applying fingerprinting rules.");
    for rule in RULES {
        if !markup.contains(rule.marker) {
            continue;
        }
        debug!(tech = %rule.tech_name, "Rule matched.");
        let target = match rule.slot {
            Slot::Framework => &mut report.frameworks,
            Slot::Technology => &mut report.technologies,
        };
        push_unique(target, rule.tech_name);
    }
}

fn detect_cms(markup: &str) -> Option<String> {
    CMS_RULES
        .iter()
        .find(|rule| rule.markers.iter().any(|m| markup.contains(m)))
        .map(|rule| rule.cms_name.to_string())
}

fn push_unique(set: &mut Vec<String>, value: &str) {
    if !set.iter().any(|existing| existing == value) {
        set.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{FetchedPage, BLOCKED_SERVER};
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn fetched(headers: &[(&str, &str)], body: &str) -> FetchOutcome {
        FetchOutcome::Fetched(FetchedPage {
            status_code: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            body: body.as_bytes().to_vec(),
            elapsed: Duration::from_millis(1),
        })
    }

    #[test]
    fn failed_fetch_yields_blocked_record() {
        let outcome = FetchOutcome::FetchFailed { reason: "dns".into() };
        let report = run_technology_scan(&outcome, None);
        assert_eq!(report.server.as_deref(), Some(BLOCKED_SERVER));
        assert!(report.technologies.is_empty());
        assert!(report.frameworks.is_empty());
        assert!(report.cms_detected.is_none());
    }

    #[test]
    fn missing_server_header_is_unknown() {
        let outcome = fetched(&[], "<p>plain</p>");
        let document = Document::from_outcome(&outcome);
        let report = run_technology_scan(&outcome, document.as_ref());
        assert_eq!(report.server.as_deref(), Some("Unknown"));
        assert!(report.technologies.is_empty());
    }

    #[test]
    fn detects_headers_libraries_and_cms() {
        let body = r#"<html><head>
            <link rel="stylesheet" href="/wp-content/themes/x/Bootstrap.min.css">
            <script src="/js/jQuery.min.js"></script>
            <script src="/js/react-dom.js"></script>
            </head><body><div id="app">Drupal powered</div></body></html>"#;
        let outcome = fetched(&[("server", "nginx"), ("x-powered-by", "PHP/8.2")], body);
        let document = Document::from_outcome(&outcome);
        let report = run_technology_scan(&outcome, document.as_ref());

        assert_eq!(report.server.as_deref(), Some("nginx"));
        assert_eq!(report.technologies, vec!["PHP/8.2", "jQuery", "Bootstrap"]);
        assert_eq!(report.frameworks, vec!["React"]);
        // wp-content precedes drupal in priority.
        assert_eq!(report.cms_detected.as_deref(), Some("WordPress"));
    }

    #[test]
    fn cms_falls_through_in_order() {
        let outcome = fetched(&[], "<p>Built with Joomla and drupal</p>");
        let document = Document::from_outcome(&outcome);
        let report = run_technology_scan(&outcome, document.as_ref());
        assert_eq!(report.cms_detected.as_deref(), Some("Drupal"));
    }

    #[test]
    fn no_document_skips_markup_rules() {
        let outcome = fetched(&[("server", "Apache")], "<script>react vue</script>");
        let report = run_technology_scan(&outcome, None);
        assert_eq!(report.server.as_deref(), Some("Apache"));
        assert!(report.frameworks.is_empty());
        assert!(report.cms_detected.is_none());
    }

    #[test]
    fn powered_by_matching_a_rule_is_not_duplicated() {
        let outcome = fetched(&[("x-powered-by", "jQuery")], "<script src=\"jquery.js\"></script>");
        let document = Document::from_outcome(&outcome);
        let report = run_technology_scan(&outcome, document.as_ref());
        assert_eq!(report.technologies, vec!["jQuery"]);
    }
}
