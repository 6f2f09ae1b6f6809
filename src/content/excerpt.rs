//! Plain-text excerpts for post cards and search
//!
//! This is a textual heuristic rather than a markdown-aware summary. Each
//! removal pass runs on the output of the previous one, so the order below
//! matters for nested or overlapping constructs.

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum number of characters kept from the body
pub const EXCERPT_LENGTH: usize = 200;

/// Appended when the excerpt was cut at [`EXCERPT_LENGTH`]
pub const CONTINUATION_MARKER: &str = "...";

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"#[^\r\n]*").unwrap();
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref BRACKETS: Regex = Regex::new(r"(?s)\[.*?\]").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*[^\r\n]*\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*[^\r\n]*\*").unwrap();
    static ref LINE_BREAKS: Regex = Regex::new(r"[\r\n]+").unwrap();
}

/// Derive a bounded plain-text summary from a markdown body
pub fn excerpt(body: &str) -> String {
    let text = HEADING.replace_all(body, "");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = BRACKETS.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "");
    let text = ITALIC.replace_all(&text, "");
    let text = LINE_BREAKS.replace_all(&text, " ");

    let truncated: String = text.trim().chars().take(EXCERPT_LENGTH).collect();
    let truncated = truncated.trim();

    if truncated.chars().count() == EXCERPT_LENGTH {
        format!("{}{}", truncated, CONTINUATION_MARKER)
    } else {
        truncated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_heading_and_bold() {
        let text = excerpt("# Title\nHello **world**");
        assert!(!text.contains('#'));
        assert!(!text.contains("**"));
        assert_eq!(text, "Hello");
    }

    #[test]
    fn test_strips_code_blocks() {
        let body = "Before\n```rust\nfn main() {}\n```\nAfter";
        assert_eq!(excerpt(body), "Before After");
    }

    #[test]
    fn test_strips_bracketed_spans() {
        let body = "See [the docs](https://example.com) and ![img](a.png) [note]";
        assert_eq!(excerpt(body), "See (https://example.com) and !(a.png)");
    }

    #[test]
    fn test_italic_is_greedy_within_a_line() {
        assert_eq!(excerpt("a *b* c *d* e"), "a  e");
        assert_eq!(excerpt("one *two\nthree* four"), "one *two three* four");
    }

    #[test]
    fn test_heading_marker_mid_line() {
        assert_eq!(excerpt("issue #42 is fixed\nnext line"), "issue  next line");
    }

    #[test]
    fn test_collapses_line_breaks() {
        assert_eq!(excerpt("line one\r\n\r\nline two\nline three"), "line one line two line three");
    }

    #[test]
    fn test_short_body_has_no_marker() {
        let text = excerpt("Short body.");
        assert_eq!(text, "Short body.");
        assert!(!text.ends_with(CONTINUATION_MARKER));
    }

    #[test]
    fn test_long_body_is_truncated_with_marker() {
        let body = "a".repeat(500);
        let text = excerpt(&body);
        assert_eq!(text.chars().count(), EXCERPT_LENGTH + CONTINUATION_MARKER.len());
        assert!(text.ends_with(CONTINUATION_MARKER));
    }

    #[test]
    fn test_exactly_at_cap_gets_marker() {
        let body = "b".repeat(EXCERPT_LENGTH);
        assert_eq!(excerpt(&body), format!("{}...", body));
    }

    #[test]
    fn test_trailing_space_at_cut_drops_marker() {
        // The cut lands right after a space, so the re-trim shortens the text
        let body = format!("{} tail", "c".repeat(EXCERPT_LENGTH - 1));
        let text = excerpt(&body);
        assert_eq!(text, "c".repeat(EXCERPT_LENGTH - 1));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let body = "가".repeat(300);
        let text = excerpt(&body);
        assert_eq!(text.chars().count(), EXCERPT_LENGTH + 3);
    }

    #[test]
    fn test_length_never_exceeds_bound() {
        let body = "word **bold** [link](x) *it* ".repeat(40);
        assert!(excerpt(&body).chars().count() <= EXCERPT_LENGTH + 3);
    }
}
