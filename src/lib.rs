// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. markup::MarkupError)
    clippy::module_name_repetitions
)]

//! # Packager
//!
//! Packages a content directory into a zip archive and previews its files
//! in a scroll-aware terminal pager.
//!
//! The pager keeps inline style markers intact while scrolling: styling
//! opened above the visible window is carried into the first visible line,
//! so a scrolled view renders the same as the unscrolled document would.
//!
//! ## Architecture
//!
//! The pager uses The Elm Architecture (TEA) pattern:
//! - **Model**: Document, viewport and session outcome
//! - **Message**: Scroll, redraw, reload and quit
//! - **Update**: Pure state transitions
//! - **View**: Compose the visible body and render it in a titled frame
//!
//! ## Modules
//!
//! - [`app`]: Pager state, input mapping and event loop
//! - [`commands`]: The `init`, `purge`, `pack`, `clean` and `preview` commands
//! - [`config`]: Saved defaults and command-line flags
//! - [`document`]: Loaded text, line access and marker lookup
//! - [`markup`]: Style marker scanning and console markup parsing
//! - [`package`]: Content directory and zip archive operations
//! - [`terminal`]: Terminal acquisition and restoration
//! - [`ui`]: Viewport, body composition and frame rendering

pub mod app;
pub mod commands;
pub mod config;
pub mod document;
pub mod markup;
pub mod package;
pub mod terminal;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{Disposition, Message, Model, Pager, PagerEvent};
    pub use crate::document::Document;
    pub use crate::ui::viewport::Viewport;
}
