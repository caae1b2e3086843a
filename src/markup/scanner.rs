use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `[`, any single character, two or more lowercase letters, `]`.
static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.[a-z]{2,}\]").expect("marker pattern is valid"));

/// Extract the inline style markers contained in `fragment`.
///
/// Markers are returned left to right. Sequences that do not match the
/// marker shape are skipped, so a fragment without markers yields an
/// empty vector.
///
/// # Example
///
/// ```
/// use packager::markup::extract_markers;
///
/// assert_eq!(extract_markers("hello [bworld] foo"), vec!["[bworld]"]);
/// assert!(extract_markers("[b] and [ab]").is_empty());
/// ```
pub fn extract_markers(fragment: &str) -> Vec<String> {
    marker_spans(fragment)
        .map(|(_, marker)| marker.to_owned())
        .collect()
}

/// Iterate over markers in `fragment` together with their byte ranges.
pub fn marker_spans(fragment: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    MARKER_PATTERN
        .find_iter(fragment)
        .map(|m| (m.range(), m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_single_marker() {
        assert_eq!(extract_markers("hello [bworld] foo"), vec!["[bworld]"]);
    }

    #[test]
    fn test_no_markers_is_empty() {
        assert!(extract_markers("plain text, nothing here").is_empty());
        assert!(extract_markers("").is_empty());
    }

    #[test]
    fn test_markers_keep_document_order() {
        let found = extract_markers("[red]a [/red] b [bold]c");
        assert_eq!(found, vec!["[red]", "[/red]", "[bold]"]);
    }

    #[test]
    fn test_short_or_uppercase_tags_are_ignored() {
        // `[b]` has only one letter after the leading character, `[RED]` is uppercase.
        assert!(extract_markers("[b]x[/b] [RED] [a1bc]").is_empty());
    }

    #[test]
    fn test_tag_with_space_after_first_char_is_ignored() {
        assert!(extract_markers("[bold red]").is_empty());
    }

    #[test]
    fn test_marker_never_spans_lines() {
        assert!(extract_markers("[\nab]").is_empty());
    }

    #[test]
    fn test_spans_report_byte_ranges() {
        let text = "ab [xyz] [/ok]";
        let spans: Vec<_> = marker_spans(text).collect();
        assert_eq!(spans, vec![(3..8, "[xyz]"), (9..14, "[/ok]")]);
    }

    #[test]
    fn test_non_ascii_first_character() {
        assert_eq!(extract_markers("é[ébold]"), vec!["[ébold]"]);
    }
}
