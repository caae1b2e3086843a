use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Controls shown under the frame.
pub const HINT: &str = "CTRL+C to exit | R to refresh";

pub fn render_hint_bar(frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new(HINT), area);
}
