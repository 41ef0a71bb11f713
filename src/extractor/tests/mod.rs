use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fs;
use url::Url;

use crate::extractor::{ExtractError, UNTITLED_ARTICLE, extract, extract_html};
use crate::fetcher::types::{Charset, PageResponse};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body_raw: Bytes::from(html.clone()),
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    }
}

#[test]
fn test_extract_article() {
    let url = Url::parse("https://www.sciencewire.example/chemistry/catalyst").unwrap();
    let response = create_test_response(fixture("article.html"), url.as_str());

    let article = extract(&response, &url).unwrap();
    let metadata = &article.metadata;

    assert_eq!(
        metadata.title,
        "Water splitting catalyst breaks efficiency record"
    );
    assert_eq!(metadata.author_name.as_deref(), Some("Dr. Maria Okafor"));
    assert_eq!(metadata.source_name.as_deref(), Some("Science Daily Wire"));
    assert_eq!(metadata.publication_date, NaiveDate::from_ymd_opt(2024, 2, 14));
    assert_eq!(
        metadata.image_url.as_ref().map(Url::as_str),
        Some("https://www.sciencewire.example/images/catalyst.jpg")
    );

    assert!(article.markdown.contains("## A cheaper route to hydrogen"));
    assert!(article.markdown.contains("H_2_O"));
    assert!(article.markdown.contains("A^2^"));
    assert!(article.markdown.contains("```"));
    assert!(!article.markdown.contains("Subscribe now"));
    assert!(!article.markdown.contains("window.analytics"));
    assert!(!article.markdown.contains("ten facts about hydrogen"));
    assert!(!article.markdown.contains("Great article"));
    assert_eq!(article.language.as_deref(), Some("en"));
}

#[test]
fn test_extract_blog_without_article_markup() {
    let url = Url::parse("https://field-notes.example.org/2023/glacier").unwrap();
    let response = create_test_response(fixture("blog.html"), url.as_str());

    let article = extract(&response, &url).unwrap();
    let metadata = &article.metadata;

    assert_eq!(metadata.title, "What the glacier cores told us this season");
    assert_eq!(metadata.author_name, None);
    assert_eq!(
        metadata.source_name.as_deref(),
        Some("Field-notes.example.org")
    );
    assert_eq!(metadata.publication_date, NaiveDate::from_ymd_opt(2023, 6, 3));
    assert_eq!(
        metadata.image_url.as_ref().map(Url::as_str),
        Some("https://cdn.example.org/field.png")
    );
    assert!(article.markdown.contains("volcanic ash"));
    assert!(!article.markdown.contains("About me"));
}

#[test]
fn test_reject_empty_page() {
    let url = Url::parse("https://example.com/empty").unwrap();
    let response = create_test_response(fixture("empty.html"), url.as_str());

    let result = extract(&response, &url);

    assert!(matches!(
        result,
        Err(ExtractError::InsufficientContent { length }) if length < 100
    ));
}

#[test]
fn test_insufficient_content_even_with_good_metadata() {
    let html = r#"<html><head>
        <meta property="og:site_name" content="Journal of Things">
        <title>A perfectly reasonable article title</title></head>
        <body><article><p>Too short.</p></article></body></html>"#;
    let url = Url::parse("https://example.com/short").unwrap();

    let err = extract_html(html, &url, &url).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not extract sufficient content from the article"
    );
}

#[test]
fn test_minimal_valid_content_without_title() {
    let html = format!(
        "<html><head><title>Short</title></head><body><article><p>{}</p></article></body></html>",
        "Plankton blooms follow the spring thaw in a predictable way. ".repeat(5)
    );
    let url = Url::parse("https://example.com/valid").unwrap();

    let article = extract_html(&html, &url, &url).unwrap();
    assert_eq!(article.metadata.title, UNTITLED_ARTICLE);
    assert!(article.markdown.trim().chars().count() >= 100);
}

#[test]
fn test_redirected_page_resolves_images_against_final_url() {
    let html = format!(
        r#"<html><head><meta property="og:image" content="hero.png"></head>
        <body><article><p>{}</p></article></body></html>"#,
        "Bees navigate using the polarisation of sunlight. ".repeat(6)
    );
    let requested = Url::parse("https://www.old-host.example/a").unwrap();
    let response = create_test_response(html, "https://new-host.example/articles/a");

    let article = extract(&response, &requested).unwrap();
    assert_eq!(
        article.metadata.source_name.as_deref(),
        Some("Old-host.example")
    );
    assert_eq!(
        article.metadata.image_url.as_ref().map(Url::as_str),
        Some("https://new-host.example/articles/hero.png")
    );
}

#[test]
fn test_malformed_html() {
    let html = format!(
        "<html><head><title>Broken</title><body><p>Unclosed tags<div>{}",
        "More content that keeps going without closing anything at all. ".repeat(4)
    );
    let url = Url::parse("https://example.com/broken").unwrap();

    // html5ever recovers; the only requirement is no panic
    if let Ok(article) = extract_html(&html, &url, &url) {
        assert!(article.markdown.contains("More content"));
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            path in "[a-z/]*"
        ) {
            let url = Url::parse(&format!("https://example.com/{path}")).unwrap();
            let _ = extract_html(&html, &url, &url);
        }

        #[test]
        fn test_extracted_content_meets_minimum(
            body in "[a-zA-Z ]{0,400}",
        ) {
            let html = format!("<article><p>{body}</p></article>");
            let url = Url::parse("https://example.com").unwrap();
            if let Ok(article) = extract_html(&html, &url, &url) {
                prop_assert!(article.markdown.trim().chars().count() >= 100);
            }
        }
    }
}
