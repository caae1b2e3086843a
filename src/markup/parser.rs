use std::sync::LazyLock;

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use regex::Regex;

use super::style::parse_style;

/// Optional backslashes followed by a tag such as `[bold]`, `[/red]` or `[/]`.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\*)\[([a-z#/@][^\[]*?)\]").expect("tag pattern is valid"));

/// Errors produced while parsing console markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// A closing tag names a style that is not open.
    #[error("closing tag '{tag}' at position {position} doesn't match any open tag")]
    ClosingTagMismatch { tag: String, position: usize },

    /// An anonymous `[/]` was found with no open tag.
    #[error("closing tag '{tag}' at position {position} has nothing to close")]
    NothingToClose { tag: String, position: usize },
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    style: Style,
}

/// Accumulates styled spans into lines, splitting on `\n`.
#[derive(Debug)]
struct TextBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
}

impl TextBuilder {
    const fn new() -> Self {
        Self {
            lines: Vec::new(),
            spans: Vec::new(),
        }
    }

    fn push(&mut self, text: &str, style: Style) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            self.push_segment(first, style);
        }
        for segment in segments {
            self.break_line();
            self.push_segment(segment, style);
        }
    }

    fn push_segment(&mut self, segment: &str, style: Style) {
        if !segment.is_empty() {
            self.spans.push(Span::styled(segment.to_owned(), style));
        }
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn finish(mut self) -> Text<'static> {
        self.break_line();
        Text::from(self.lines)
    }
}

/// Parse console markup into styled text.
///
/// Every `\n` starts a new line, including a trailing one, so the
/// returned text always has `markup.split('\n').count()` lines.
///
/// # Errors
///
/// Returns [`MarkupError`] when a closing tag has no matching open tag.
///
/// # Example
///
/// ```
/// use packager::markup::parse;
///
/// let text = parse("[bold]hi[/bold] there").unwrap();
/// assert_eq!(text.lines.len(), 1);
/// assert!(parse("oops[/red]").is_err());
/// ```
pub fn parse(markup: &str) -> Result<Text<'static>, MarkupError> {
    let mut builder = TextBuilder::new();
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut cursor = 0;

    for caps in TAG_PATTERN.captures_iter(markup) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let escapes = caps.get(1).map_or(0, |m| m.len());
        let body = caps.get(2).map_or("", |m| m.as_str());
        let current = current_style(&stack);

        builder.push(&markup[cursor..whole.start()], current);
        cursor = whole.end();

        if escapes > 0 {
            builder.push(&"\\".repeat(escapes / 2), current);
        }
        if escapes % 2 == 1 {
            builder.push(&format!("[{body}]"), current);
            continue;
        }

        // The position points past any escaped backslashes before the tag.
        let position = markup[..whole.start()].chars().count() + escapes;
        if let Some(closing) = body.strip_prefix('/') {
            close_tag(&mut stack, closing, position)?;
        } else {
            stack.push(OpenTag {
                name: tag_name(body),
                style: parse_style(body),
            });
        }
    }

    builder.push(&markup[cursor..], current_style(&stack));
    Ok(builder.finish())
}

/// Build text from `content` without interpreting any markup.
pub fn plain(content: &str) -> Text<'static> {
    let mut builder = TextBuilder::new();
    builder.push(content, Style::default());
    builder.finish()
}

fn close_tag(stack: &mut Vec<OpenTag>, closing: &str, position: usize) -> Result<(), MarkupError> {
    let name = normalize(closing);
    if name.is_empty() {
        return match stack.pop() {
            Some(_) => Ok(()),
            None => Err(MarkupError::NothingToClose {
                tag: "[/]".to_owned(),
                position,
            }),
        };
    }
    match stack.iter().rposition(|open| open.name == name) {
        Some(index) => {
            stack.remove(index);
            Ok(())
        }
        None => Err(MarkupError::ClosingTagMismatch {
            tag: format!("[/{closing}]"),
            position,
        }),
    }
}

fn current_style(stack: &[OpenTag]) -> Style {
    stack
        .iter()
        .fold(Style::default(), |acc, open| acc.patch(open.style))
}

/// Name used to pair closing tags: the part before any `=`, normalized.
fn tag_name(body: &str) -> String {
    normalize(body.split_once('=').map_or(body, |(name, _)| name))
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
