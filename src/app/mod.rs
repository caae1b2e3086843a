//! The scrolling pager and its event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete pager state
//! - [`Message`]: All possible actions
//! - [`update`]: Pure function for state transitions
//! - [`Pager::run`]: Event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use input::{CrosstermEvents, EventSource, PagerEvent, handle_event, pager_event};
pub use model::{Disposition, Model};
pub use update::{Message, update};

use crate::document::Document;
use crate::markup::MarkupError;

/// Errors that end a pager session early.
#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    /// The visible text is not valid console markup.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// Reading input failed.
    #[error("failed to read terminal input: {0}")]
    Input(#[from] std::io::Error),

    /// The terminal backend failed to report its size, draw or clear.
    #[error("terminal error: {0}")]
    Terminal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PagerError {
    fn terminal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Terminal(Box::new(err))
    }
}

/// Interactive viewer for one document.
///
/// The pager owns the document and the scroll state for one viewing
/// session. The terminal and the event source are passed in, so the same
/// pager runs against a real terminal or a test backend.
#[derive(Debug)]
pub struct Pager {
    model: Model,
}

impl Pager {
    /// Create a pager for `raw_text`, captioned with `title`.
    pub fn new(raw_text: &str, title: impl Into<String>) -> Self {
        Self {
            model: Model::new(Document::new(raw_text), title, 0),
        }
    }

    /// Enable or disable console markup in the body.
    #[must_use]
    pub fn with_markup(mut self, enabled: bool) -> Self {
        self.model.markup_enabled = enabled;
        self
    }
}
