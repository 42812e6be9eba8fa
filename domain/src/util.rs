//! Shared utility functions.

/// Shorten `s` to at most `max_bytes` for error messages and logs.
///
/// Whitespace runs (including newlines) collapse to a single space, the cut
/// never splits a UTF-8 character, and a trailing `...` marks truncation.
pub fn excerpt(s: &str, max_bytes: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() <= max_bytes {
        return collapsed;
    }
    let mut end = max_bytes;
    while end > 0 && !collapsed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &collapsed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_short_text_unchanged() {
        assert_eq!(excerpt("not found", 50), "not found");
    }

    #[test]
    fn excerpt_collapses_whitespace() {
        assert_eq!(excerpt("  rate\n\n limited  ", 50), "rate limited");
    }

    #[test]
    fn excerpt_truncates_with_marker() {
        assert_eq!(excerpt("hello world", 5), "hello...");
    }

    #[test]
    fn excerpt_multibyte_boundary() {
        // '天' is 3 bytes; cutting at byte 4 backs up to 3
        assert_eq!(excerpt("天安门", 4), "天...");
    }

    #[test]
    fn excerpt_empty() {
        assert_eq!(excerpt("", 10), "");
    }
}
