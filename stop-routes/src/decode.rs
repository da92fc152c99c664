//! Byte-level decoding shared by every input document.
//!
//! Agency feeds are mostly UTF-8, sometimes with a byte-order mark, and
//! occasionally ISO-8859-1. Decoding never fails: a body that is not valid
//! UTF-8 is read as ISO-8859-1 and the caller is told.

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decoded document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// True if the body was not UTF-8 and was read as ISO-8859-1.
    pub lossy: bool,
}

/// Decode raw file bytes.
///
/// Surrounding ASCII whitespace and a leading UTF-8 BOM are removed.
pub fn decode(bytes: &[u8]) -> Decoded {
    let trimmed = bytes.trim_ascii();
    let body = trimmed.strip_prefix(UTF8_BOM).unwrap_or(trimmed);

    match std::str::from_utf8(body) {
        Ok(text) => Decoded {
            text: text.to_string(),
            lossy: false,
        },
        Err(_) => Decoded {
            text: latin1(body),
            lossy: true,
        },
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
