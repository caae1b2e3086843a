use std::collections::VecDeque;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::{Color, Modifier};

use super::*;
use crate::app::{Pager, PagerEvent};
use crate::document::Document;
use crate::ui::viewport::Viewport;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn body(raw: &str, height: usize, offset: usize) -> String {
    let doc = Document::new(raw);
    let mut viewport = Viewport::new(height, doc.line_count());
    viewport.scroll_down(offset);
    compose_body(&doc, &viewport)
}

#[test]
fn test_compose_body_top_of_document() {
    assert_eq!(body("a\nb\nc\nd\n", 2, 0), "a\nb");
}

#[test]
fn test_compose_body_carries_markers_from_above() {
    assert_eq!(body("[bold]x\n[red]y\nz\n", 2, 2), "[bold][red]z\n");
    assert_eq!(body("[bold]x\n[red]y\nz\n", 2, 1), "[bold][red]y\nz");
}

#[test]
fn test_compose_body_pads_short_window() {
    assert_eq!(body("a\nb\nc\n", 4, 2), "c\n\n\n");
}

#[test]
fn test_compose_body_without_trailing_newline() {
    assert_eq!(body("[red]a\nb", 3, 1), "[red]b\n\n");
}

#[test]
fn test_compose_body_uses_first_occurrence() {
    // The window "x" also occurs in line 0, so nothing is carried.
    assert_eq!(body("x\n[red]y\nx\n", 1, 2), "x");
}

#[test]
fn test_compose_body_empty_document() {
    assert_eq!(body("", 3, 0), "\n\n");
}

#[test]
fn test_compose_body_zero_height() {
    assert_eq!(body("a\nb\n", 0, 0), "");
}

#[test]
fn test_frame_shows_title_body_and_hint() {
    let mut terminal = create_test_terminal(40, 8);
    let mut pager = Pager::new("hello\nworld\n", "notes.txt");
    pager.render(&mut terminal).unwrap();

    let rows = rows(&terminal);
    assert!(rows[0].contains("notes.txt"));
    assert!(rows[1].contains("hello"));
    assert!(rows[2].contains("world"));
    assert!(rows[5].starts_with('└'));
    assert!(rows[6].starts_with(HINT));
}

#[test]
fn test_frame_height_follows_terminal() {
    let mut terminal = create_test_terminal(40, 12);
    let mut pager = Pager::new("a\n", "t");
    pager.render(&mut terminal).unwrap();

    let rows = rows(&terminal);
    // 8 body rows inside the borders, then the hint.
    assert!(rows[9].starts_with('└'));
    assert!(rows[10].starts_with(HINT));
    assert!(rows[11].trim().is_empty());
}

#[test]
fn test_markup_is_styled_not_printed() {
    let mut terminal = create_test_terminal(40, 8);
    let mut pager = Pager::new("[bold]loud[/bold] quiet\n", "t");
    pager.render(&mut terminal).unwrap();

    let rows = rows(&terminal);
    assert!(rows[1].contains("loud quiet"));
    assert!(!rows[1].contains("[bold]"));

    let buffer = terminal.backend().buffer();
    assert!(buffer[(1, 1)].modifier.contains(Modifier::BOLD));
    assert!(!buffer[(6, 1)].modifier.contains(Modifier::BOLD));
}

#[test]
fn test_scrolled_view_keeps_style_from_above() {
    let mut terminal = create_test_terminal(40, 6);
    let mut pager = Pager::new("[red]first\nsecond\nthird\n", "t");
    let mut script: VecDeque<PagerEvent> = VecDeque::from([PagerEvent::Down]);

    // Running out of events leaves the last frame on screen.
    assert!(pager.run(&mut terminal, &mut script).is_err());

    let rows = rows(&terminal);
    assert!(rows[1].contains("second"));
    assert!(rows[2].contains("third"));
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(1, 1)].fg, Color::Red);
}

#[test]
fn test_full_window_reproduces_every_line() {
    let raw = "alpha\n[green]beta\ngamma\n";
    let doc = Document::new(raw);
    let viewport = Viewport::new(5, doc.line_count());
    let body = compose_body(&doc, &viewport);
    assert_eq!(body, "alpha\n[green]beta\ngamma\n\n");
    assert_eq!(body.lines().take(3).collect::<Vec<_>>(), doc.lines());
}
