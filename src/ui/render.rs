use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Model;
use crate::document::Document;

use super::status;
use super::viewport::Viewport;

/// Compose the text shown inside the frame for the current scroll position.
///
/// The visible lines are prefixed with every style marker that appears in
/// the source before them, so styles opened above the window still apply.
/// The result is padded with blank rows to exactly `viewport.height()`
/// rows whenever the window is not full.
///
/// # Example
///
/// ```
/// use packager::document::Document;
/// use packager::ui::compose_body;
/// use packager::ui::viewport::Viewport;
///
/// let doc = Document::new("[red]a\nb\nc\n");
/// let mut vp = Viewport::new(3, doc.line_count());
/// vp.scroll_down(1);
/// assert_eq!(compose_body(&doc, &vp), "[red]b\nc\n");
/// ```
pub fn compose_body(document: &Document, viewport: &Viewport) -> String {
    let height = viewport.height();
    let mut visible = String::new();
    for line in document.visible_lines(viewport.offset(), height) {
        visible.push_str(line);
        visible.push('\n');
    }

    let before = document.text_before(&visible);
    let mut body = if before > 0 {
        document.carried_prefix(before)
    } else {
        String::new()
    };
    body.push_str(visible.strip_suffix('\n').unwrap_or(&visible));

    let rows = body.split('\n').count();
    if rows < height {
        body.push_str(&"\n".repeat(height - rows));
    }
    body
}

/// Draw the titled frame around `body`, followed by the hint line.
pub fn render(model: &Model, body: Text<'static>, frame: &mut Frame) {
    let area = frame.area();
    let frame_rows = u16::try_from(model.viewport.height())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(frame_rows),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let block = Block::default()
        .title(model.title.as_str())
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(body).block(block), chunks[0]);
    status::render_hint_bar(frame, chunks[1]);
}
