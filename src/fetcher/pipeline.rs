use crate::fetcher::{
    errors::FetchError,
    types::{Charset, PageResponse},
};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

/// How many leading bytes of the body are searched for charset hints.
const SNIFF_WINDOW: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

/// `<meta charset>` first, then `<meta http-equiv="Content-Type">`.
static META_REGEXES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap(),
        Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap(),
    ]
});

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset);

    Ok(PageResponse {
        url_final,
        status,
        headers,
        body_raw: body_bytes,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    })
}

fn encoding_from_captures(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(encoding) = encoding_from_captures(&CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    let sniff = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    let sniff_str = String::from_utf8_lossy(sniff);
    for regex in META_REGEXES.iter() {
        if let Some(encoding) = encoding_from_captures(regex, &sniff_str) {
            return Charset::from_encoding(encoding);
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(sniff, body_bytes.len() <= SNIFF_WINDOW);
    Charset::from_encoding(detector.guess(None, true))
}

/// Lossy for every charset: malformed sequences become U+FFFD.
fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(
            charset = encoding.name(),
            "Page contained byte sequences invalid for its charset; replaced"
        );
    }

    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_charset_from_content_type() {
        let content_type = "text/html; charset=utf-8";
        let body = b"<html><head><title>Test</title></head></html>";

        assert_eq!(detect_charset(content_type, body), Charset::Utf8);
    }

    #[test]
    fn test_detect_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";

        // encoding_rs maps ISO-8859-1 to its superset windows-1252
        assert_eq!(detect_charset("text/html", body), Charset::Windows1252);
    }

    #[test]
    fn test_detect_charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=shift_jis\"><title>Test</title></head></html>";

        assert_eq!(detect_charset("text/html", body), Charset::ShiftJis);
    }

    #[test]
    fn test_decode_utf8() {
        let body = "H\u{2082}O und Gr\u{fc}\u{df}e".as_bytes();

        let decoded = decode_to_utf8(body, &Charset::Utf8);
        assert_eq!(decoded, "H\u{2082}O und Gr\u{fc}\u{df}e");
    }

    #[test]
    fn test_decode_windows_1252() {
        let body = b"caf\xe9";

        let decoded = decode_to_utf8(body, &Charset::Windows1252);
        assert_eq!(decoded, "caf\u{e9}");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let body = b"valid \xff tail";

        let decoded = decode_to_utf8(body, &Charset::Utf8);
        assert!(decoded.starts_with("valid "));
        assert!(decoded.ends_with(" tail"));
    }

    #[test]
    fn test_invalid_shift_jis_is_replaced() {
        // 0x82 opens a two-byte sequence; a space cannot complete it.
        let body = b"\x82\xa0 ok \x82 broken";

        let decoded = decode_to_utf8(body, &Charset::ShiftJis);
        assert!(decoded.starts_with("\u{3042} ok "));
        assert!(decoded.contains('\u{fffd}'));
        assert!(decoded.ends_with("broken"));
    }

    #[test]
    fn test_process_response_keeps_malformed_legacy_pages() {
        let body = Bytes::from_static(b"<html><body>\x82\xa0 \x82 end</body></html>");

        let page = process_response(
            Url::parse("https://example.com/").unwrap(),
            StatusCode::OK,
            HeaderMap::new(),
            body,
            "text/html; charset=shift_jis",
        )
        .unwrap();

        assert_eq!(page.charset, Charset::ShiftJis);
        assert!(page.body_utf8.contains("\u{3042} \u{fffd} end"));
    }
}
