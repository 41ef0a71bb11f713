use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tracing::warn;

use crate::curation::CurationResponse;

/// Past this many tracked clients, expired windows are pruned on insert.
const PRUNE_THRESHOLD: usize = 10_000;

/// Fixed-window request counter per client IP. Clones share the counters.
#[derive(Clone)]
pub struct RateLimit {
    windows: Arc<DashMap<IpAddr, Window>>,
    max_requests: u32,
    window: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    requests: u32,
}

impl Window {
    fn open(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            requests: 0,
        }
    }

    fn expired(&self, now: DateTime<Utc>, length: Duration) -> bool {
        now.signed_duration_since(self.started_at) >= length
    }
}

impl RateLimit {
    /// Windows too long for `chrono` are clamped to the longest it can hold.
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window: Duration::try_seconds(window_seconds).unwrap_or(Duration::MAX),
        }
    }

    /// Count a request from `client` at `now`. False once the client is
    /// over its budget for the current window.
    pub fn allow(&self, client: IpAddr, now: DateTime<Utc>) -> bool {
        if self.windows.len() > PRUNE_THRESHOLD {
            self.windows
                .retain(|_, window| !window.expired(now, self.window));
        }

        let mut window = self
            .windows
            .entry(client)
            .or_insert_with(|| Window::open(now));
        if window.expired(now, self.window) {
            *window = Window::open(now);
        }

        window.requests = window.requests.saturating_add(1);
        window.requests <= self.max_requests
    }
}

/// Rejects clients over their budget with 429 and the failure envelope.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let client = addr.ip();

    if !rate_limit.allow(client, Utc::now()) {
        warn!(%client, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(CurationResponse::failure("Rate limit exceeded")),
        )
            .into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[test]
    fn allows_up_to_the_limit() {
        let limit = RateLimit::new(2, 60);
        let now = Utc::now();

        assert!(limit.allow(ip(1), now));
        assert!(limit.allow(ip(1), now));
        assert!(!limit.allow(ip(1), now));
        // other clients have their own window
        assert!(limit.allow(ip(2), now));
    }

    #[test]
    fn window_resets() {
        let limit = RateLimit::new(1, 60);
        let start = Utc::now();

        assert!(limit.allow(ip(1), start));
        assert!(!limit.allow(ip(1), start + Duration::seconds(30)));
        assert!(limit.allow(ip(1), start + Duration::seconds(60)));
    }

    #[test]
    fn clones_share_counters() {
        let limit = RateLimit::new(1, 60);
        let other = limit.clone();
        let now = Utc::now();

        assert!(limit.allow(ip(1), now));
        assert!(!other.allow(ip(1), now));
    }

    #[test]
    fn oversized_window_is_clamped() {
        let limit = RateLimit::new(1, i64::MAX);
        let now = Utc::now();

        assert!(limit.allow(ip(1), now));
        assert!(!limit.allow(ip(1), now + Duration::days(365)));
    }

    #[test]
    fn counter_saturates_instead_of_overflowing() {
        let limit = RateLimit::new(u32::MAX, 60);
        let now = Utc::now();
        limit.windows.insert(
            ip(1),
            Window {
                started_at: now,
                requests: u32::MAX,
            },
        );

        assert!(limit.allow(ip(1), now));
        assert_eq!(limit.windows.get(&ip(1)).unwrap().requests, u32::MAX);
    }
}
