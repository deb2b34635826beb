// src/core/scanner/content_scanner.rs

use crate::core::document::Document;
use crate::core::models::ContentReport;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='description']").unwrap());
static META_KEYWORDS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='keywords']").unwrap());
static FORM: Lazy<Selector> = Lazy::new(|| Selector::parse("form").unwrap());
static ANCHOR_WITH_HREF: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

const LOCAL_HREF_PREFIXES: &[&str] = &["#", "/", "mailto:"];

/// Extracts page metadata and simple content metrics.
///
/// Without a document the fixed "blocked" record is returned.
pub fn run_content_scan(document: Option<&Document>) -> ContentReport {
    let Some(document) = document else {
        info!("No document available, emitting blocked content record.");
        return ContentReport::blocked();
    };
    let tree = document.tree();

    let report = ContentReport {
        title: extract_title(tree),
        description: extract_meta_content(tree, &META_DESCRIPTION),
        keywords: extract_meta_content(tree, &META_KEYWORDS),
        word_count: document.visible_word_count(),
        has_forms: tree.select(&FORM).next().is_some(),
        external_links: count_external_links(tree),
    };
    info!(
        words = report.word_count,
        links = report.external_links,
        forms = report.has_forms,
        "Content scan finished."
    );
    report
}

fn extract_title(tree: &Html) -> Option<String> {
    let title = tree
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string());
    debug!(title = ?title, "Extracted title.");
    title
}

fn extract_meta_content(tree: &Html, selector: &Selector) -> Option<String> {
    tree.select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

// An anchor is external when its href uses an HTTP(S) scheme. The local-prefix
// check never fires for such hrefs but keeps the rule explicit.
fn count_external_links(tree: &Html) -> usize {
    tree.select(&ANCHOR_WITH_HREF)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| {
            href.starts_with("http")
                && !LOCAL_HREF_PREFIXES.iter().any(|prefix| href.starts_with(prefix))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{BLOCKED_DESCRIPTION, BLOCKED_TITLE};

    const PAGE: &str = r##"<!doctype html>
<html>
  <head>
    <title>
      Example Domain
    </title>
    <meta name="description" content="An example page">
    <meta name="keywords" content="example, test">
  </head>
  <body>
    <h1>Hello there</h1>
    <form action="/login"><input name="user"></form>
    <a href="https://other.example/">one</a>
    <a href="http://plain.example/">two</a>
    <a href="/local">three</a>
    <a href="#top">four</a>
    <a href="mailto:someone@example.com">five</a>
    <a>six</a>
  </body>
</html>"##;

    #[test]
    fn missing_document_yields_blocked_record() {
        let report = run_content_scan(None);
        assert_eq!(report, ContentReport::blocked());
        assert_eq!(report.title.as_deref(), Some(BLOCKED_TITLE));
        assert_eq!(report.description.as_deref(), Some(BLOCKED_DESCRIPTION));
    }

    #[test]
    fn extracts_metadata_and_counts() {
        let document = Document::new(PAGE);
        let report = run_content_scan(Some(&document));

        assert_eq!(report.title.as_deref(), Some("Example Domain"));
        assert_eq!(report.description.as_deref(), Some("An example page"));
        assert_eq!(report.keywords.as_deref(), Some("example, test"));
        assert!(report.has_forms);
        assert_eq!(report.external_links, 2);
        // Example Domain, Hello there, one..six
        assert_eq!(report.word_count, 10);
    }

    #[test]
    fn absent_fields_are_none() {
        let document = Document::new("<html><body><p>just text</p></body></html>");
        let report = run_content_scan(Some(&document));
        assert!(report.title.is_none());
        assert!(report.description.is_none());
        assert!(report.keywords.is_none());
        assert!(!report.has_forms);
        assert_eq!(report.external_links, 0);
        assert_eq!(report.word_count, 2);
    }
}
