//! Reversible text encoding for stored payloads.
//!
//! Text is percent-escaped with the URI-component rules and the escaped ASCII
//! is then base64-encoded, so the stored value is plain ASCII regardless of
//! the store's charset handling.

use crate::error::AppError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by URI-component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode `text` into its storage form.
pub fn encode(text: &str) -> String {
    let escaped = utf8_percent_encode(text, URI_COMPONENT).to_string();
    STANDARD.encode(escaped.as_bytes())
}

/// Decode a storage value produced by [`encode`].
///
/// # Errors
/// Returns [`AppError::Codec`] when the value is not valid base64 or does not
/// unescape to UTF-8.
pub fn decode(encoded: &str) -> Result<String, AppError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|err| AppError::Codec(format!("invalid base64 payload: {}", err)))?;
    let escaped = String::from_utf8(bytes)
        .map_err(|_| AppError::Codec("escaped payload is not ASCII".to_string()))?;
    percent_decode_str(&escaped)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|err| AppError::Codec(format!("payload is not UTF-8: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::AppError;

    #[test]
    fn round_trip_preserves_text_exactly() {
        let samples = [
            "",
            "console.log('hi')",
            "line one\nline two\r\n\ttabbed",
            "héllo 🚀",
            "e\u{301} and a\u{308}\u{332}",
            "𝔘𝔫𝔦𝔠𝔬𝔡𝔢 and 🧑‍🚀",
            "100% sure & <b>bold</b> ?query=a+b#frag",
            "\u{0}\u{1f}\u{7f}",
        ];
        for text in samples {
            assert_eq!(decode(&encode(text)).expect("decode"), text, "text: {text:?}");
        }
    }

    #[test]
    fn encoding_matches_uri_component_then_base64() {
        assert_eq!(encode("console.log('hi')"), "Y29uc29sZS5sb2coJ2hpJyk=");
        assert_eq!(encode("a b\n"), "YSUyMGIlMEE=");
        assert_eq!(
            encode("héllo 🚀"),
            "aCVDMyVBOWxsbyUyMCVGMCU5RiU5QSU4MA=="
        );
    }

    #[test]
    fn encoded_values_are_plain_ascii() {
        let encoded = encode("日本語 🚀 \u{0}");
        assert!(encoded.is_ascii());
    }

    #[test]
    fn malformed_payloads_report_codec_errors() {
        let err = decode("***not base64***").expect_err("invalid base64");
        assert!(matches!(err, AppError::Codec(_)));

        // "%FF" is a complete escape of a byte that is not valid UTF-8.
        let err = decode("JUZG").expect_err("invalid utf-8");
        assert!(matches!(err, AppError::Codec(_)));
    }
}
