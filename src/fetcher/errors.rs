use reqwest::StatusCode;
use thiserror::Error;

/// Why an article page could not be retrieved.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx answer. Displays as the bare status code so callers can
    /// embed it in their own message.
    #[error("{}", status.as_u16())]
    Http { status: StatusCode, retriable: bool },

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("timed out connecting")]
    ConnectTimeout,

    #[error("timed out waiting for response")]
    RequestTimeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("page exceeds size limit ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("failed reading response body: {0}")]
    Body(String),

    #[error("http client setup failed: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Whether a caller that retries would have a chance of succeeding.
    /// The curation pipeline attempts every fetch exactly once and only
    /// reports this in logs.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Http { retriable, .. } => *retriable,
            Self::BodyTooLarge(_) | Self::UnsupportedScheme(_) | Self::Client(_) => false,
            Self::Connect(_)
            | Self::ConnectTimeout
            | Self::RequestTimeout
            | Self::TooManyRedirects
            | Self::Body(_)
            | Self::Other(_) => true,
        }
    }

    /// HTTP status for `Http` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            };
        }
        if err.is_redirect() {
            return Self::TooManyRedirects;
        }
        if let Some(status) = err.status() {
            return Self::Http {
                status,
                retriable: status.is_server_error(),
            };
        }

        if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}
