//! Excerpt derivation for posts that do not set one

use lazy_static::lazy_static;
use regex::Regex;

/// Used when a post body has no text left after stripping headings
pub const NO_EXCERPT: &str = "No excerpt available";

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^#+ .+$").unwrap();
}

/// Build a preview from a markdown body.
///
/// Heading lines are dropped, the first paragraph is kept with its
/// whitespace collapsed to single spaces, and anything longer than
/// `max_chars` characters is cut to exactly `max_chars` plus `...`.
pub fn derive_excerpt(body: &str, max_chars: usize) -> String {
    let stripped = HEADING_RE.replace_all(body, "");

    let paragraph = first_paragraph(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if paragraph.is_empty() {
        return NO_EXCERPT.to_string();
    }

    if paragraph.chars().count() > max_chars {
        let mut cut: String = paragraph.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    } else {
        paragraph
    }
}

/// Lines up to the first blank line, skipping leading blank lines
fn first_paragraph(text: &str) -> String {
    text.lines()
        .skip_while(|l| l.trim().is_empty())
        .take_while(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_stripped() {
        let body = "# Heading\n\nThis is the first paragraph of the post.";
        assert_eq!(
            derive_excerpt(body, 200),
            "This is the first paragraph of the post."
        );
    }

    #[test]
    fn test_only_first_paragraph() {
        let body = "## Intro\nFirst line\nsecond line.\n\nSecond paragraph.";
        assert_eq!(derive_excerpt(body, 200), "First line second line.");
    }

    #[test]
    fn test_blank_line_ends_excerpt() {
        assert_eq!(derive_excerpt("Intro.\n\nMore text.", 200), "Intro.");
        assert_eq!(derive_excerpt("Intro.\n   \nMore text.", 200), "Intro.");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let body = "Lots   of\tspace\n   here.";
        assert_eq!(derive_excerpt(body, 200), "Lots of space here.");
    }

    #[test]
    fn test_long_paragraph_truncated() {
        let body = "a".repeat(250);
        let excerpt = derive_excerpt(&body, 200);
        assert_eq!(excerpt, format!("{}...", "a".repeat(200)));
    }

    #[test]
    fn test_exact_length_not_truncated() {
        let body = "b".repeat(200);
        assert_eq!(derive_excerpt(&body, 200), body);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let body = "é".repeat(201);
        let excerpt = derive_excerpt(&body, 200);
        assert_eq!(excerpt.chars().count(), 203);
        assert!(excerpt.ends_with("é..."));
    }

    #[test]
    fn test_hashtag_without_space_is_kept() {
        assert_eq!(derive_excerpt("#rustlang is fun", 200), "#rustlang is fun");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(derive_excerpt("", 200), NO_EXCERPT);
        assert_eq!(derive_excerpt("# Only a heading\n", 200), NO_EXCERPT);
    }
}
