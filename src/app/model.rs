use crate::document::Document;
use crate::ui::viewport::Viewport;

/// How the pager's event loop should proceed after a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Disposition {
    /// Keep viewing.
    #[default]
    Continue,
    /// Re-read the file from disk and reopen the viewer.
    ReloadRequested,
    /// Stop viewing entirely.
    Cancelled,
}

/// The complete pager state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The document being viewed
    pub document: Document,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Frame caption
    pub title: String,
    /// Interpret console markup in the body (disabled for error banners)
    pub markup_enabled: bool,
    /// Set by `update` once the loop should stop
    pub disposition: Disposition,
    /// Body produced by the most recent render, padding included
    last_body: String,
}

impl Model {
    /// Create a new model scrolled to the top.
    pub fn new(document: Document, title: impl Into<String>, viewport_height: usize) -> Self {
        let total_lines = document.line_count();
        Self {
            document,
            viewport: Viewport::new(viewport_height, total_lines),
            title: title.into(),
            markup_enabled: true,
            disposition: Disposition::Continue,
            last_body: String::new(),
        }
    }

    pub(super) fn set_last_body(&mut self, body: String) {
        self.last_body = body;
    }

    /// True when the last rendered row is the document's last line.
    ///
    /// An empty document is always at its end.
    pub fn at_document_end(&self) -> bool {
        let Some(last_line) = self.document.last_line() else {
            return true;
        };
        self.last_body.rsplit('\n').next() == Some(last_line)
    }
}
