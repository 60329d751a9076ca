//! Strict percent-decoding for URL path segments.

/// Percent-decodes `input` as UTF-8.
///
/// Returns `None` for a truncated or non-hex escape, or when the decoded
/// bytes are not valid UTF-8.
pub fn percent_decode(input: &str) -> Option<String> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let high = bytes.next().and_then(hex_digit)?;
            let low = bytes.next().and_then(hex_digit)?;
            out.push(high << 4 | low);
        } else {
            out.push(b);
        }
    }
    String::from_utf8(out).ok()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escapes() {
        assert_eq!(percent_decode("a%20b.mp4").as_deref(), Some("a b.mp4"));
        assert_eq!(percent_decode("caf%c3%a9").as_deref(), Some("café"));
        assert_eq!(percent_decode("plain.webm").as_deref(), Some("plain.webm"));
    }

    #[test]
    fn rejects_truncated_escape() {
        assert_eq!(percent_decode("abc%2"), None);
        assert_eq!(percent_decode("abc%"), None);
        assert_eq!(percent_decode("%zz"), None);
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert_eq!(percent_decode("%FF%FE"), None);
    }
}
