//! Console markup handling.
//!
//! This module handles:
//! - Scanning text for inline style markers (`[bold]`, `[/red]`, ...)
//! - Parsing markup into styled ratatui [`Text`](ratatui::text::Text)
//! - Mapping style definitions (`bold red on blue`) to ratatui styles

mod parser;
mod scanner;
mod style;

pub use parser::{MarkupError, parse, plain};
pub use scanner::{extract_markers, marker_spans};
pub use style::{parse_color, parse_style};
