use scraper::{ElementRef, Html};
use tracing::debug;

use crate::extractor::strategy::{element_text, parse_selector};

/// Elements that never carry article prose.
const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "nav",
    "header",
    "footer",
    "aside",
    ".advertisement",
    ".ads",
    ".comments",
];

/// Main-content containers, most specific first.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[data-testid='article-body']",
    ".article-content",
    ".entry-content",
    ".post-content",
    ".content",
    "main",
];

/// A candidate container must hold more text than this to be trusted.
const MIN_CANDIDATE_CHARS: usize = 200;

/// How the main content block was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selector(&'static str),
    LargestParagraphBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainContent {
    /// Inner HTML of the chosen container.
    pub html: String,
    pub selection: Selection,
}

/// Detach every noise element from the document tree. Returns how many
/// subtrees were removed.
pub fn remove_noise(document: &mut Html) -> usize {
    let mut ids = Vec::new();
    for selector in NOISE_SELECTORS.iter().filter_map(|s| parse_selector(s)) {
        ids.extend(document.select(&selector).map(|element| element.id()));
    }

    for id in &ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    ids.len()
}

/// Pick the article body: the first candidate selector whose first match
/// holds enough text, otherwise the parent of paragraphs with the most text.
pub fn select_main_content(document: &Html) -> Option<MainContent> {
    for &selector_str in CONTENT_SELECTORS {
        let Some(selector) = parse_selector(selector_str) else {
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };
        let text_len = element_text(element).trim().chars().count();
        if text_len > MIN_CANDIDATE_CHARS {
            debug!(selector = selector_str, text_len, "Selected content container");
            return Some(MainContent {
                html: element.inner_html(),
                selection: Selection::Selector(selector_str),
            });
        }
    }

    largest_paragraph_block(document).map(|html| MainContent {
        html,
        selection: Selection::LargestParagraphBlock,
    })
}

/// Scan every `<p>` and keep the parent element whose text is the longest
/// seen. May include boilerplate on unusual markup.
fn largest_paragraph_block(document: &Html) -> Option<String> {
    let paragraphs = parse_selector("p")?;
    let mut best: Option<(usize, ElementRef<'_>)> = None;

    for paragraph in document.select(&paragraphs) {
        let Some(parent) = paragraph.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let text_len = element_text(parent).trim().chars().count();
        if best.is_none_or(|(max, _)| text_len > max) {
            best = Some((text_len, parent));
        }
    }

    let (text_len, parent) = best?;
    debug!(
        tag = parent.value().name(),
        text_len, "Fell back to largest paragraph block"
    );
    Some(parent.inner_html())
}
