//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible window of the document
//! and handles all scroll operations.

/// Rows taken by the frame borders, the hint line and one spare row.
pub const FRAME_OVERHEAD_ROWS: u16 = 4;

/// Manages the visible portion of a document.
///
/// The viewport tracks:
/// - Viewport height (terminal rows minus frame overhead)
/// - Current scroll offset (in lines)
/// - Total document length
///
/// Unlike a page-based viewer the offset may advance until the last line
/// sits at the top of the window: `0 <= offset <= total_lines - 1`.
///
/// # Example
///
/// ```
/// use packager::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(2, 4);
/// vp.scroll_down(10);
/// assert_eq!(vp.offset(), 3);
/// vp.scroll_up(10);
/// assert_eq!(vp.offset(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a new viewport scrolled to the top.
    ///
    /// # Arguments
    ///
    /// * `height` - Number of document lines that fit in the frame
    /// * `total_lines` - Total lines in the document
    pub const fn new(height: usize, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    /// Viewport height for a terminal with `rows` rows.
    ///
    /// Saturates at zero for terminals too small to hold the frame.
    pub const fn height_for_rows(rows: u16) -> usize {
        rows.saturating_sub(FRAME_OVERHEAD_ROWS) as usize
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the viewport height.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Scroll up by n lines.
    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by n lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    /// Resize the viewport.
    pub fn resize(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Calculate the maximum valid offset.
    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(1)
    }
}
