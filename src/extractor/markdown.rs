use htmd::{
    Element, HtmlToMarkdown,
    options::{CodeBlockStyle, HeadingStyle, Options},
};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::warn;

static TRAILING_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Converter with ATX headings, fenced code, and plain-text markers for
/// scientific notation: `H<sub>2</sub>O` becomes `H_2_O`, `E<sup>2</sup>`
/// becomes `E^2^`.
fn converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            ..Default::default()
        })
        .skip_tags(vec!["script", "style", "noscript"])
        .add_handler(vec!["sub"], |element: Element| {
            Some(format!("_{}_", element.content))
        })
        .add_handler(vec!["sup"], |element: Element| {
            Some(format!("^{}^", element.content))
        })
        .build()
}

/// Convert an HTML fragment to normalized markdown.
pub fn to_markdown(html: &str) -> String {
    let markdown = match converter().convert(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            warn!(error = %e, "Markdown conversion failed, using plain text");
            Html::parse_fragment(html)
                .root_element()
                .text()
                .collect::<String>()
        }
    };
    normalize_markdown(&markdown)
}

/// Strip trailing spaces on lines and collapse runs of blank lines.
pub fn normalize_markdown(markdown: &str) -> String {
    let markdown = markdown.replace("\r\n", "\n");
    let markdown = TRAILING_SPACES.replace_all(&markdown, "\n");
    BLANK_RUNS
        .replace_all(&markdown, "\n\n")
        .trim()
        .to_string()
}
