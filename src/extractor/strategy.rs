//! Ordered selector strategies.
//!
//! Each extracted field is described by a static list of [`Strategy`]
//! values tried in priority order. A strategy looks at the first element
//! matching its selector and reads one value from it; the field's
//! acceptance function decides whether that value is good enough. The
//! first accepted value wins. Adding or reordering a strategy is a data
//! change, the control flow lives here once.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Where a strategy reads its candidate value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// Concatenated descendant text of the element.
    Text,
    /// The value of a single attribute.
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub selector: &'static str,
    pub read: Read,
}

impl Strategy {
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            read: Read::Text,
        }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            read: Read::Attr(name),
        }
    }

    /// Trimmed, non-empty value of the first element matching the selector.
    pub fn read(&self, document: &Html) -> Option<String> {
        let selector = parse_selector(self.selector)?;
        let element = document.select(&selector).next()?;
        read_element(element, self.read)
    }
}

/// Run `strategies` in order and return the first value `accept` maps to
/// `Some`. Rejected candidates fall through to the next strategy.
pub fn first_accepted<T>(
    document: &Html,
    strategies: &[Strategy],
    mut accept: impl FnMut(&str) -> Option<T>,
) -> Option<T> {
    strategies.iter().find_map(|strategy| {
        let candidate = strategy.read(document)?;
        let accepted = accept(&candidate);
        if accepted.is_none() {
            debug!(selector = strategy.selector, "Candidate rejected");
        }
        accepted
    })
}

pub(crate) fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!(selector, error = %e, "Skipping unparsable selector");
            None
        }
    }
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn read_element(element: ElementRef<'_>, read: Read) -> Option<String> {
    let value = match read {
        Read::Text => element_text(element).trim().to_string(),
        Read::Attr(name) => element.value().attr(name)?.trim().to_string(),
    };
    (!value.is_empty()).then_some(value)
}
