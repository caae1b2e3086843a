use crate::app::{Disposition, Model};

/// All possible actions in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Scroll up one line
    ScrollUp,
    /// Scroll down one line (no-op at the end of the document)
    ScrollDown,
    /// Terminal resized, render again
    Redraw,
    /// Reload the file from disk
    Reload,
    /// Quit the pager
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp => {
            model.viewport.scroll_up(1);
        }
        Message::ScrollDown => {
            if !model.at_document_end() {
                model.viewport.scroll_down(1);
            }
        }
        Message::Redraw => {}
        Message::Reload => {
            model.disposition = Disposition::ReloadRequested;
        }
        Message::Quit => {
            model.disposition = Disposition::Cancelled;
        }
    }
    model
}
