use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;

/// A decoded user action, independent of the raw terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    Up,
    Down,
    Cancel,
    Refresh,
    /// The terminal was resized.
    Redraw,
    Other,
}

/// Blocking source of pager events.
pub trait EventSource {
    /// Wait for the next event.
    ///
    /// # Errors
    ///
    /// Returns an error if reading terminal input fails.
    fn next_event(&mut self) -> io::Result<PagerEvent>;
}

/// Reads events from the terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<PagerEvent> {
        Ok(pager_event(&event::read()?))
    }
}

/// A fixed script of events, mostly useful for driving the pager in tests.
///
/// Running out of events is reported as [`io::ErrorKind::UnexpectedEof`].
impl EventSource for VecDeque<PagerEvent> {
    fn next_event(&mut self) -> io::Result<PagerEvent> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more events"))
    }
}

/// Decode a crossterm event.
pub fn pager_event(event: &Event) -> PagerEvent {
    match event {
        Event::Key(key) => key_event(*key),
        Event::Resize(_, _) => PagerEvent::Redraw,
        _ => PagerEvent::Other,
    }
}

fn key_event(key: KeyEvent) -> PagerEvent {
    if key.kind == KeyEventKind::Release {
        return PagerEvent::Other;
    }
    match key.code {
        KeyCode::Up => PagerEvent::Up,
        KeyCode::Down => PagerEvent::Down,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => PagerEvent::Cancel,
        KeyCode::Char('r' | 'R') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            PagerEvent::Refresh
        }
        _ => PagerEvent::Other,
    }
}

/// Map a pager event to a message. `None` means the event is ignored.
pub const fn handle_event(event: PagerEvent) -> Option<Message> {
    match event {
        PagerEvent::Up => Some(Message::ScrollUp),
        PagerEvent::Down => Some(Message::ScrollDown),
        PagerEvent::Cancel => Some(Message::Quit),
        PagerEvent::Refresh => Some(Message::Reload),
        PagerEvent::Redraw => Some(Message::Redraw),
        PagerEvent::Other => None,
    }
}
