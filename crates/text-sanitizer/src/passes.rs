//! Ordered sanitization passes.
//!
//! Pass order matters: later passes must not re-introduce markup removed
//! earlier, so code is stripped before links, links before line markers,
//! line markers before emphasis, and whitespace is collapsed last. None of
//! these passes assume well-formed markdown; unterminated fences or
//! unmatched emphasis markers fall through as literal characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fenced code blocks, including newlines inside the fence.
static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// Single-backtick inline code spans.
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+?)`").unwrap());

/// Markdown links and images: `[label](target)`, optionally `!`-prefixed.
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"!?\[([^\]]+?)\]\([^)]+\)").unwrap());

/// Leading heading markers, up to three leading spaces permitted.
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{0,3}#{1,6}\s+").unwrap());

/// Leading bullet markers, up to three leading spaces permitted.
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{0,3}[-*+]\s+").unwrap());

/// Emphasis markers, applied in this order: bold before italic so `**x**`
/// is not half-consumed by the single-asterisk pattern, and likewise for
/// the underscore pair.
static EMPHASIS: Lazy<[Regex; 5]> = Lazy::new(|| {
    [
        Regex::new(r"\*\*([^*]+?)\*\*").unwrap(),
        Regex::new(r"\*([^*]+?)\*").unwrap(),
        Regex::new(r"__([^_]+?)__").unwrap(),
        Regex::new(r"_([^_]+?)_").unwrap(),
        Regex::new(r"~~([^~]+?)~~").unwrap(),
    ]
});

/// Replace fenced code blocks with a single space and unwrap inline code
/// spans, keeping their inner text.
pub(crate) fn strip_code(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, " ");
    INLINE_CODE.replace_all(&text, "${1}").into_owned()
}

/// Unwrap links and images, keeping only the label.
pub(crate) fn unwrap_links(text: &str) -> String {
    LINK.replace_all(text, "${1}").into_owned()
}

/// Strip leading heading and bullet markers at the start of each line.
pub(crate) fn strip_line_markers(text: &str) -> String {
    let text = HEADING.replace_all(text, "");
    BULLET.replace_all(&text, "").into_owned()
}

/// Unwrap emphasis markers, applying each pattern to fixed point so nested
/// and adjacent emphasis is fully resolved before the next marker type.
pub(crate) fn unwrap_emphasis(text: &str) -> String {
    let mut current = text.to_string();
    for pattern in EMPHASIS.iter() {
        loop {
            let next = pattern.replace_all(&current, "${1}");
            if next == current {
                break;
            }
            current = next.into_owned();
        }
    }
    current
}

/// Collapse every whitespace run (including newlines) to a single space and
/// trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_replaced_with_space() {
        assert_eq!(strip_code("a ```let x = 1;\nfoo()``` b"), "a   b");
    }

    #[test]
    fn test_unterminated_fence_left_alone() {
        assert_eq!(strip_code("a ```let x = 1;"), "a ```let x = 1;");
    }

    #[test]
    fn test_inline_code_unwrapped() {
        assert_eq!(strip_code("run `cargo test` now"), "run cargo test now");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(unwrap_links("see [docs](http://x)"), "see docs");
        assert_eq!(unwrap_links("![alt text](img.png)"), "alt text");
    }

    #[test]
    fn test_heading_and_bullet_markers() {
        assert_eq!(strip_line_markers("## Title\n  - item"), "Title\nitem");
        assert_eq!(strip_line_markers("###### Deep"), "Deep");
        // Seven hashes is not a heading.
        assert_eq!(strip_line_markers("####### nope"), "####### nope");
    }

    #[test]
    fn test_emphasis_fixed_point() {
        assert_eq!(unwrap_emphasis("**bold** *it* __b__ _i_ ~~s~~"), "bold it b i s");
        // Triple markers need both the bold and the italic pass.
        assert_eq!(unwrap_emphasis("***word***"), "word");
        assert_eq!(unwrap_emphasis("*a* *b* *c*"), "a b c");
    }

    #[test]
    fn test_unmatched_emphasis_kept_literal() {
        assert_eq!(unwrap_emphasis("a ** b"), "a ** b");
        assert_eq!(unwrap_emphasis("lone_underscore"), "lone_underscore");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a\n\n  b\t c"), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
