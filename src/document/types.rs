use crate::markup::marker_spans;

/// A style marker found in the document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRef {
    /// Byte offset just past the marker's closing `]`.
    pub end: usize,
    /// The marker text, brackets included.
    pub text: String,
}

/// An immutable text document split into lines.
///
/// Besides the lines, the document keeps the (newline-normalized) source
/// text and a table of every style marker in it, so the markers preceding
/// any position can be recovered without rescanning the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    source: String,
    lines: Vec<String>,
    markers: Vec<MarkerRef>,
}

impl Document {
    /// Build a document from raw text.
    ///
    /// `\r\n` is normalized to `\n`. A final line that is empty or only
    /// whitespace (what a terminating newline produces) is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use packager::document::Document;
    ///
    /// let doc = Document::new("a\nb\n");
    /// assert_eq!(doc.lines(), ["a", "b"]);
    /// ```
    pub fn new(raw: &str) -> Self {
        let source = raw.replace("\r\n", "\n");
        let mut lines: Vec<String> = source.split('\n').map(str::to_owned).collect();
        if lines.last().is_some_and(|last| last.trim().is_empty()) {
            lines.pop();
        }
        let markers = marker_spans(&source)
            .map(|(range, text)| MarkerRef {
                end: range.end,
                text: text.to_owned(),
            })
            .collect();
        Self {
            source,
            lines,
            markers,
        }
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Get up to `count` lines starting at `offset`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[String] {
        let start = offset.min(self.lines.len());
        let end = start.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Length of the source text preceding the first occurrence of `visible`.
    ///
    /// `visible` normally ends with `\n`; when the source has no
    /// terminating newline the last line cannot match that, so the search
    /// falls back to `visible` without it. Text that never occurs yields
    /// the whole source length.
    pub fn text_before(&self, visible: &str) -> usize {
        if visible.is_empty() {
            return 0;
        }
        self.source
            .find(visible)
            .or_else(|| {
                visible
                    .strip_suffix('\n')
                    .filter(|trimmed| !trimmed.is_empty())
                    .and_then(|trimmed| self.source.find(trimmed))
            })
            .unwrap_or(self.source.len())
    }

    /// Concatenate the markers found in the first `len` bytes of the source.
    ///
    /// Markers never contain a line break, so this equals running the
    /// scanner over `&source[..len]` directly.
    pub fn carried_prefix(&self, len: usize) -> String {
        let count = self.markers.partition_point(|marker| marker.end <= len);
        self.markers[..count]
            .iter()
            .map(|marker| marker.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::extract_markers;

    #[test]
    fn test_empty_document() {
        let doc = Document::new("");
        assert_eq!(doc.line_count(), 0);
        assert!(doc.lines().is_empty());
        assert_eq!(doc.last_line(), None);
    }

    #[test]
    fn test_trailing_newline_is_dropped_once() {
        let doc = Document::new("a\nb\n");
        assert_eq!(doc.lines(), ["a", "b"]);

        let doc = Document::new("a\n\n");
        assert_eq!(doc.lines(), ["a", ""]);
    }

    #[test]
    fn test_whitespace_only_last_line_is_dropped() {
        let doc = Document::new("a\n   ");
        assert_eq!(doc.lines(), ["a"]);
    }

    #[test]
    fn test_no_trailing_newline_keeps_last_line() {
        let doc = Document::new("a\nb");
        assert_eq!(doc.lines(), ["a", "b"]);
        assert_eq!(doc.last_line(), Some("b"));
    }

    #[test]
    fn test_crlf_is_normalized() {
        let doc = Document::new("one\r\ntwo\r\n");
        assert_eq!(doc.lines(), ["one", "two"]);
        assert_eq!(doc.source, "one\ntwo\n");
    }

    #[test]
    fn test_visible_lines() {
        let doc = Document::new("a\nb\nc\nd\n");
        assert_eq!(doc.visible_lines(1, 2), ["b", "c"]);
    }

    #[test]
    fn test_visible_lines_beyond_end() {
        let doc = Document::new("a\nb\nc\n");
        assert_eq!(doc.visible_lines(2, 10), ["c"]);
        assert!(doc.visible_lines(5, 10).is_empty());
        assert!(doc.visible_lines(0, 0).is_empty());
    }

    #[test]
    fn test_text_before_first_occurrence() {
        let doc = Document::new("x\ny\nx\ny\n");
        // The first occurrence wins even when scrolled to the repeat.
        assert_eq!(doc.text_before("x\ny\n"), 0);
        assert_eq!(doc.text_before("y\nx\n"), 2);
    }

    #[test]
    fn test_text_before_without_terminating_newline() {
        let doc = Document::new("a\nb\nc");
        assert_eq!(doc.text_before("b\nc\n"), 2);
    }

    #[test]
    fn test_text_before_empty_visible_text() {
        let doc = Document::new("[red]a\n");
        assert_eq!(doc.text_before(""), 0);
    }

    #[test]
    fn test_markers_table_records_end_offsets() {
        let doc = Document::new("[red]a\nb [/red]\n");
        assert_eq!(
            doc.markers,
            [
                MarkerRef {
                    end: 5,
                    text: "[red]".to_owned()
                },
                MarkerRef {
                    end: 15,
                    text: "[/red]".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_carried_prefix() {
        let doc = Document::new("[red]a\n[bold]b\nc\n");
        assert_eq!(doc.carried_prefix(0), "");
        assert_eq!(doc.carried_prefix(7), "[red]");
        assert_eq!(doc.carried_prefix(15), "[red][bold]");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn document_text() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just("[red]".to_owned()),
                    Just("[/red]".to_owned()),
                    Just("[bold]".to_owned()),
                    Just("[[ab]".to_owned()),
                    Just("[b]".to_owned()),
                    Just("\n".to_owned()),
                    "[a-z ]{0,6}",
                ],
                0..40,
            )
            .prop_map(|parts| parts.concat())
        }

        proptest! {
            #[test]
            fn carried_prefix_matches_direct_scan(text in document_text(), cut in 0..400usize) {
                let doc = Document::new(&text);
                let mut len = cut.min(doc.source.len());
                while !doc.source.is_char_boundary(len) {
                    len -= 1;
                }
                let expected: String = extract_markers(&doc.source[..len]).concat();
                prop_assert_eq!(doc.carried_prefix(len), expected);
            }

            #[test]
            fn visible_lines_within_bounds(text in document_text(), offset in 0..50usize, count in 0..50usize) {
                let doc = Document::new(&text);
                let lines = doc.visible_lines(offset, count);
                prop_assert!(lines.len() <= count);
                prop_assert!(lines.len() <= doc.line_count());
            }
        }
    }
}
