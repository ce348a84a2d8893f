//! Page body decoding
//!
//! Bodies are decoded from raw bytes rather than trusting the header alone,
//! since many sites declare their charset only in a `<meta>` tag.
//! Lookup order: byte order mark, `Content-Type` charset, `<meta>` charset,
//! then statistical detection.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the body a `<meta>` charset declaration is looked for
const META_SCAN_LIMIT: usize = 1024;

/// Decodes an HTML body to a `String`
///
/// Malformed sequences are replaced with U+FFFD rather than failing the page.
///
/// # Example
///
/// ```
/// use site_scribe::crawler::decode_html;
///
/// let bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body>\xe9t\xe9</body></html>";
/// assert!(decode_html(bytes, "text/html").contains("été"));
/// ```
pub fn decode_html(bytes: &[u8], content_type: &str) -> String {
    let encoding = detect_encoding(bytes, content_type);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("Replaced malformed {} sequences", encoding.name());
    }
    text.into_owned()
}

/// Picks the encoding for a body
pub fn detect_encoding(bytes: &[u8], content_type: &str) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(encoding) = charset_param(content_type).and_then(lookup) {
        return encoding;
    }

    if let Some(encoding) = meta_charset(bytes).and_then(|label| lookup(&label)) {
        return encoding;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// `charset` parameter of a Content-Type value
fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\''))
    })
}

/// Charset label from `<meta charset>` or `<meta http-equiv content>` near the top
fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SCAN_LIMIT)];
    let head = head.to_ascii_lowercase();
    let head = String::from_utf8_lossy(&head);

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let value = &tag[tag.find("charset=")? + "charset=".len()..];
        let label: String = value
            .trim_start_matches(|c| c == '"' || c == '\'' || c == ' ')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
            .collect();
        (!label.is_empty()).then_some(label)
    })
}
