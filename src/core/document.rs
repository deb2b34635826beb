// src/core/document.rs

use crate::core::models::FetchOutcome;
use once_cell::unsync::OnceCell;
use scraper::Html;

/// Elements whose text content is never rendered.
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A queryable HTML tree over the fetched body.
///
/// The tree is built on first use, so a run whose analyzers only need the raw
/// markup never pays for parsing. `Html` is not `Send`; a `Document` lives inside a
/// synchronous scope and is dropped before the orchestrator awaits anything.
pub struct Document {
    source: String,
    tree: OnceCell<Html>,
}

impl Document {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            tree: OnceCell::new(),
        }
    }

    /// Builds a document from the fetch outcome. A failed fetch has no document,
    /// which is an expected state rather than an error.
    pub fn from_outcome(outcome: &FetchOutcome) -> Option<Self> {
        outcome.page().map(|page| Self::new(page.body_text()))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Html {
        self.tree.get_or_init(|| Html::parse_document(&self.source))
    }

    pub fn is_parsed(&self) -> bool {
        self.tree.get().is_some()
    }

    /// The document re-serialized from the parsed tree.
    pub fn markup(&self) -> String {
        self.tree().html()
    }

    /// Counts whitespace-delimited tokens across all rendered text nodes.
    pub fn visible_word_count(&self) -> usize {
        self.tree()
            .root_element()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|el| HIDDEN_TEXT_PARENTS.contains(&el.name()));
                (!hidden).then(|| text.split_whitespace().count())
            })
            .sum()
    }
}
