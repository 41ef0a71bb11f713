use bytes::Bytes;
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use reqwest::{StatusCode, header::HeaderMap};
use serde::{Deserialize, Serialize};
use url::Url;

/// Character encoding the page body was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gbk,
    Big5,
    Other(String),
}

impl Charset {
    /// Map an `encoding_rs` encoding onto the charsets we name explicitly.
    /// GB18030 is folded into GBK, its subset.
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        match encoding.name() {
            "UTF-8" => Self::Utf8,
            "windows-1252" => Self::Windows1252,
            "Shift_JIS" => Self::ShiftJis,
            "GBK" | "gb18030" => Self::Gbk,
            "Big5" => Self::Big5,
            other => Self::Other(other.to_string()),
        }
    }

    /// The decoder for this charset. Unknown labels decode as UTF-8.
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::Gbk => encoding_rs::GBK,
            Self::Big5 => encoding_rs::BIG5,
            Self::Other(label) => {
                Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::UTF_8)
            }
        }
    }
}

/// A fetched article page, decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    /// Where the request ended up after redirects. Relative links in the
    /// page resolve against this.
    pub url_final: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}
