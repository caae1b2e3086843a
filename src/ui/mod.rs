//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and viewport height management
//! - [`compose_body`]: The text shown for the current scroll position
//! - [`render`]: The titled frame and hint line

pub mod viewport;

mod render;
mod status;

pub use render::{compose_body, render};
pub use status::HINT;

#[cfg(test)]
mod tests;
