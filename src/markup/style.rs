//! Style definitions for console markup tags.
//!
//! A definition is a whitespace separated list of words such as
//! `bold red on blue` or `not italic #ff8800`. Words that are not
//! recognised contribute nothing.

use ratatui::style::{Color, Modifier, Style};

/// Convert a tag body into a ratatui style.
///
/// `link=...` and `@...` tags carry no visual style.
pub fn parse_style(definition: &str) -> Style {
    let name = definition
        .split_once('=')
        .map_or(definition, |(name, _)| name);
    if name.trim_start().starts_with('@') || name.trim().eq_ignore_ascii_case("link") {
        return Style::default();
    }

    let mut style = Style::default();
    let mut words = definition.split_whitespace().map(str::to_ascii_lowercase);
    while let Some(word) = words.next() {
        match word.as_str() {
            "on" => {
                if let Some(color) = words.next().as_deref().and_then(parse_color) {
                    style = style.bg(color);
                }
            }
            "not" => {
                if let Some(modifier) = words.next().as_deref().and_then(modifier_for) {
                    style = style.remove_modifier(modifier);
                }
            }
            other => {
                if let Some(modifier) = modifier_for(other) {
                    style = style.add_modifier(modifier);
                } else if let Some(color) = parse_color(other) {
                    style = style.fg(color);
                }
            }
        }
    }
    style
}

fn modifier_for(word: &str) -> Option<Modifier> {
    let modifier = match word {
        "bold" | "b" => Modifier::BOLD,
        "dim" | "d" => Modifier::DIM,
        "italic" | "i" => Modifier::ITALIC,
        "underline" | "u" => Modifier::UNDERLINED,
        "blink" => Modifier::SLOW_BLINK,
        "blink2" => Modifier::RAPID_BLINK,
        "reverse" | "r" => Modifier::REVERSED,
        "conceal" | "c" => Modifier::HIDDEN,
        "strike" | "s" => Modifier::CROSSED_OUT,
        _ => return None,
    };
    Some(modifier)
}

/// Parse a single color word.
///
/// Supports the sixteen ANSI names (`red`, `bright_red`, ...), `grey`,
/// `default`, `#rrggbb`, `rgb(r,g,b)` and `color(n)`.
pub fn parse_color(word: &str) -> Option<Color> {
    let color = match word {
        "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" | "grey" | "gray" => Color::Gray,
        "bright_black" => Color::DarkGray,
        "bright_red" => Color::LightRed,
        "bright_green" => Color::LightGreen,
        "bright_yellow" => Color::LightYellow,
        "bright_blue" => Color::LightBlue,
        "bright_magenta" => Color::LightMagenta,
        "bright_cyan" => Color::LightCyan,
        "bright_white" => Color::White,
        _ => return parse_numeric_color(word),
    };
    Some(color)
}

fn parse_numeric_color(word: &str) -> Option<Color> {
    if let Some(hex) = word.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }
    if let Some(args) = word.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let mut parts = args.split(',').map(|p| p.trim().parse::<u8>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        return Some(Color::Rgb(r, g, b));
    }
    if let Some(index) = word
        .strip_prefix("color(")
        .and_then(|s| s.strip_suffix(')'))
    {
        return index.trim().parse::<u8>().ok().map(Color::Indexed);
    }
    None
}
