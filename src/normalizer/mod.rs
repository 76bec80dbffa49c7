//! Whitespace normalization for extracted page text.
//!
//! Every piece of text that leaves the extractor goes through [`normalize`]:
//! runs of horizontal whitespace become one space, lines are trimmed, and any
//! run of blank lines becomes exactly one blank line.

/// Marker appended by [`truncate`] when text is cut.
pub const ELLIPSIS: &str = "...";

/// Normalize whitespace in `text`.
///
/// The function is idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.split('\n') {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            pending_blank = !out.is_empty();
            continue;
        };

        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        out.push_str(first);
        for word in words {
            out.push(' ');
            out.push_str(word);
        }
        pending_blank = false;
    }

    out
}

/// Cut `text` to at most `limit` characters, appending [`ELLIPSIS`] when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}
