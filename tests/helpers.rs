use axum::{Router, extract::connect_info::MockConnectInfo};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use curator::{
    app_state::AppState,
    curation::CurationService,
    fetcher::Fetcher,
    middleware::RateLimit,
    router::build_router,
    summarizer::{GeminiClient, Summarizer},
};

pub const GEMINI_PATH: &str = "/models/gemini-pro:generateContent";

pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Coral reefs recover faster than expected | Ocean Science Weekly</title>
  <meta property="og:site_name" content="Ocean Science Weekly">
  <meta property="og:image" content="/img/reef.jpg">
  <meta property="article:published_time" content="2024-03-01T10:30:00Z">
  <script>console.log("tracking");</script>
</head>
<body>
  <nav><a href="/">Home</a></nav>
  <h1>Coral reefs recover faster than expected</h1>
  <span class="author-name">Jonas Lindqvist</span>
  <article>
    <p>Marine biologists surveying the northern reef have found that coral cover rebounded within
    four years of the last bleaching event, far sooner than the decade most models predicted.</p>
    <p>The survey team attributes the recovery to cooler currents and to herbivorous fish that keep
    competing algae in check, giving young coral colonies room to settle and grow.</p>
  </article>
  <footer>All rights reserved.</footer>
</body>
</html>"#;

pub const STUB_HTML: &str =
    "<html><head><title>Stub</title></head><body><article><p>Too short.</p></article></body></html>";

/// An app wired to a single mock server that plays both the article host
/// and the Gemini API.
pub struct TestApp {
    pub server: MockServer,
    pub router: Router,
}

impl TestApp {
    pub fn article_url(&self, route: &str) -> String {
        format!("{}{}", self.server.uri(), route)
    }
}

pub async fn test_app(max_requests: u32) -> TestApp {
    let server = MockServer::start().await;

    let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
    let gemini = GeminiClient::new(
        Some("test-key".to_string()),
        "gemini-pro",
        server.uri(),
        Duration::from_secs(5),
    )
    .unwrap();
    let service = CurationService::new(fetcher, Summarizer::new(Arc::new(gemini)));
    let state = AppState::new(service, "gemini-pro", true);

    let router = build_router(state, RateLimit::new(max_requests, 60))
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

    TestApp { server, router }
}

pub async fn mount_page(server: &MockServer, route: &str, status: u16, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_bytes(html.as_bytes().to_vec())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Serve `body` with 200 and an arbitrary content type.
pub async fn mount_body(server: &MockServer, route: &str, content_type: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", content_type),
        )
        .mount(server)
        .await;
}

pub async fn mount_analysis(server: &MockServer, complexity: serde_json::Value) {
    let analysis = json!({
        "tldrSummary": "Reefs bounced back in four years.",
        "eli5Summary": "The coral got better quickly, like a scraped knee healing.",
        "technicalSummary": "Coral cover recovered within four years post-bleaching.",
        "suggestedTags": ["coral", "oceans", "ecology", "climate", "reefs"],
        "complexityScore": complexity
    });
    let completion = format!("```json\n{}\n```", analysis);

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": completion }] } }]
        })))
        .mount(server)
        .await;
}

pub async fn mount_analysis_failure(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(server)
        .await;
}
