use std::borrow::Cow;

use crate::models::UNAVAILABLE_MARKER;

/// Overflow token the catalog producer writes for prices it could not scrape.
pub const OVERFLOW_TOKEN: &str = "Infinity";

/// Rewrites every bare `Infinity` token to the JSON string `"Unavailable"`.
///
/// Works on the raw text before any parsing: the token is not valid JSON, so
/// the document cannot be parsed until it has been replaced. Occurrences
/// inside string literals and inside longer identifiers are left alone.
/// Running the rewrite on its own output is a no-op.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    if !raw.contains(OVERFLOW_TOKEN) {
        return Cow::Borrowed(raw);
    }

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len() + 16);
    let mut copied_up_to = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                i += 1;
            }
            b'I' if is_overflow_token(bytes, i) => {
                out.push_str(&raw[copied_up_to..i]);
                out.push('"');
                out.push_str(UNAVAILABLE_MARKER);
                out.push('"');
                i += OVERFLOW_TOKEN.len();
                copied_up_to = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&raw[copied_up_to..]);
    Cow::Owned(out)
}

fn is_overflow_token(bytes: &[u8], at: usize) -> bool {
    let end = at + OVERFLOW_TOKEN.len();
    bytes.get(at..end) == Some(OVERFLOW_TOKEN.as_bytes())
        && (at == 0 || !is_word_byte(bytes[at - 1]))
        && bytes.get(end).is_none_or(|b| !is_word_byte(*b))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
