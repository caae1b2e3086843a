//! Command implementations behind the CLI.
//!
//! Each command returns an [`Outcome`]: the process exit code plus an
//! optional message for the user. Prompts go through the [`Prompt`] trait
//! so the destructive commands can be exercised without a terminal.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::app::{CrosstermEvents, Disposition, EventSource, Pager, PagerError};
use crate::config::Settings;
use crate::document::{self, LoadError};
use crate::package::{self, PackageError};
use crate::terminal::TerminalSession;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CANCELLED: i32 = -1;

/// First line of the document shown when a file's markup cannot be parsed.
pub const FORMAT_ERROR_BANNER: &str = "<Formatting Error>";
/// First line of the document shown when a file cannot be read.
pub const READ_ERROR_BANNER: &str = "<Read Error>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

/// Exit code and message produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    pub notice: Option<Notice>,
}

impl Outcome {
    pub const fn ok() -> Self {
        Self {
            code: EXIT_OK,
            notice: None,
        }
    }

    fn with(code: i32, tone: Tone, text: impl Into<String>) -> Self {
        Self {
            code,
            notice: Some(Notice {
                tone,
                text: text.into(),
            }),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::with(EXIT_OK, Tone::Success, text)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::with(EXIT_OK, Tone::Plain, text)
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self::with(EXIT_OK, Tone::Warning, text)
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self::with(EXIT_FAILURE, Tone::Error, text)
    }

    pub const fn cancelled() -> Self {
        Self {
            code: EXIT_CANCELLED,
            notice: None,
        }
    }

    pub fn cancelled_with(text: impl Into<String>) -> Self {
        Self::with(EXIT_CANCELLED, Tone::Plain, text)
    }
}

/// Confirmation prompts used by destructive commands.
pub trait Prompt {
    /// Show `message`, read a line, and accept only the exact `expected` text.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    fn confirm_phrase(&mut self, message: &str, expected: &str) -> io::Result<bool>;

    /// Show `message`, wait for a single key press, and accept only `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    fn confirm_key(&mut self, message: &str, key: char) -> io::Result<bool>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm_phrase(&mut self, message: &str, expected: &str) -> io::Result<bool> {
        println!("{message}");
        print!("> ");
        io::stdout().flush()?;
        enable_raw_mode()?;
        let answer = read_phrase();
        disable_raw_mode()?;
        Ok(answer?.is_some_and(|line| line == expected))
    }

    fn confirm_key(&mut self, message: &str, key: char) -> io::Result<bool> {
        println!("{message}");
        enable_raw_mode()?;
        let pressed = read_key_press();
        disable_raw_mode()?;
        Ok(pressed? == KeyCode::Char(key))
    }
}

/// Effect of one key press on a line typed at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEdit {
    Pending,
    Submitted,
    Interrupted,
}

fn edit_line(line: &mut String, key: KeyEvent) -> LineEdit {
    if key.kind == KeyEventKind::Release {
        return LineEdit::Pending;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            LineEdit::Interrupted
        }
        KeyCode::Enter => LineEdit::Submitted,
        KeyCode::Backspace => {
            line.pop();
            LineEdit::Pending
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            line.push(c);
            LineEdit::Pending
        }
        _ => LineEdit::Pending,
    }
}

/// Read a line in raw mode, echoing it. `None` when Ctrl+C is pressed.
fn read_phrase() -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match edit_line(&mut line, key) {
            LineEdit::Pending => execute!(
                stdout,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(format!("> {line}"))
            )?,
            LineEdit::Submitted => {
                execute!(stdout, Print("\r\n"))?;
                return Ok(Some(line));
            }
            LineEdit::Interrupted => {
                execute!(stdout, Print("^C\r\n"))?;
                return Ok(None);
            }
        }
    }
}

fn read_key_press() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(key.code);
            }
        }
    }
}

/// Accepts every prompt without asking (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm_phrase(&mut self, _message: &str, _expected: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn confirm_key(&mut self, _message: &str, _key: char) -> io::Result<bool> {
        Ok(true)
    }
}

fn content_missing() -> Outcome {
    Outcome::failure("It seems no content exists, ensure you ran 'packager init'.")
}

/// `init`: create the content directory.
pub fn init(settings: &Settings) -> Outcome {
    match package::init_content(&settings.content_dir) {
        Ok(()) => Outcome::ok(),
        Err(PackageError::AlreadyInitialized { .. }) => {
            Outcome::failure("Content already initialized, perhaps you meant 'purge'?")
        }
        Err(err) => Outcome::failure(format!("Failed to initialize content: '{err}'")),
    }
}

/// `purge`: after typed confirmation, delete all content.
pub fn purge(settings: &Settings, prompt: &mut dyn Prompt) -> Outcome {
    if !settings.content_dir.is_dir() {
        return content_missing();
    }

    let warning =
        "WARNING! This will delete ALL of your content.\nType 'YES' to confirm this action.";
    match prompt.confirm_phrase(warning, "YES") {
        Ok(true) => {}
        Ok(false) | Err(_) => return Outcome::cancelled(),
    }

    match package::purge_content(&settings.content_dir) {
        Ok(()) => Outcome::success("Successfully purged content."),
        Err(err) => Outcome::failure(format!("Failed purging content: '{err}'")),
    }
}

/// `pack`: zip the content directory, asking before overwriting.
pub fn pack(settings: &Settings, prompt: &mut dyn Prompt) -> Outcome {
    if !settings.content_dir.is_dir() {
        return content_missing();
    }

    if settings.archive.is_file() {
        let message = format!(
            "Notice: {} already exists, press 'y' to overwrite it.",
            settings.archive.display()
        );
        if !prompt.confirm_key(&message, 'y').unwrap_or(false) {
            return Outcome::cancelled_with("Canceled packaging due to conflict package.");
        }
    }

    match package::pack_directory(&settings.content_dir, &settings.archive) {
        Ok(entries) => Outcome::success(format!(
            "Packed {} file(s) into {}.",
            entries.len(),
            settings.archive.display()
        )),
        Err(err) => Outcome::failure(format!("Failed packaging content: '{err}'")),
    }
}

/// `clean`: remove the generated archive.
pub fn clean(settings: &Settings) -> Outcome {
    match package::clean_archive(&settings.archive) {
        Ok(true) => Outcome::plain("OK"),
        Ok(false) => Outcome::notice("Nothing to clean."),
        Err(err) => Outcome::failure(format!("Failed to remove archive: '{err}'")),
    }
}

/// Validate the `preview` arguments and resolve the file to show.
///
/// # Errors
///
/// Returns the [`Outcome`] to report when the arguments or the file are
/// not acceptable.
pub fn resolve_preview_target(settings: &Settings, paths: &[String]) -> Result<PathBuf, Outcome> {
    let relative = match paths {
        [] => return Err(Outcome::failure("usage: preview <path>")),
        [one] => one,
        _ => return Err(Outcome::failure("You cannot preview multiple files.")),
    };

    let path = std::path::absolute(settings.content_dir.join(relative))
        .map_err(|err| Outcome::failure(format!("Invalid path: '{err}'")))?;
    if path.is_dir() {
        return Err(Outcome::failure("You cannot preview directories."));
    }
    if !path.exists() {
        return Err(Outcome::failure(format!(
            "No such path exists (please note it should be relative to '{}').",
            settings.content_dir.display()
        )));
    }
    match document::check_size(&path) {
        Ok(()) => Ok(path),
        Err(err @ LoadError::TooLarge { .. }) => Err(Outcome::failure(err.to_string())),
        Err(err) => Err(Outcome::failure(format!("Failed to read file: '{err}'"))),
    }
}

/// `preview`: open the pager on a file below the content directory.
///
/// # Errors
///
/// Fails if the terminal cannot be acquired or the viewer hits an I/O error.
pub fn preview(settings: &Settings, paths: &[String]) -> Result<Outcome> {
    let path = match resolve_preview_target(settings, paths) {
        Ok(path) => path,
        Err(outcome) => return Ok(outcome),
    };
    let title = paths.first().map_or("", String::as_str);

    let mut session = TerminalSession::acquire()?;
    view_file(&path, title, session.terminal(), &mut CrosstermEvents)?;
    Ok(Outcome::ok())
}

/// View `path` until the user cancels, re-reading it on every refresh.
///
/// When the file cannot be read, or its markup cannot be parsed, the viewer
/// shows an error banner followed by the message, without markup. A
/// refresh from the banner tries the file again.
///
/// # Errors
///
/// Fails if the terminal or the event source fails.
pub fn view_file<B, E>(
    path: &Path,
    title: &str,
    terminal: &mut Terminal<B>,
    events: &mut E,
) -> Result<()>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
    E: EventSource + ?Sized,
{
    let mut banner: Option<String> = None;
    loop {
        let mut pager = match banner.take() {
            Some(text) => Pager::new(&text, title).with_markup(false),
            None => match document::read_text(path) {
                Ok(text) => Pager::new(&text, title),
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "read failed, showing banner");
                    Pager::new(&format!("{READ_ERROR_BANNER}\n{err}"), title).with_markup(false)
                }
            },
        };

        match pager.run(terminal, events) {
            Ok(Disposition::ReloadRequested) => {
                tracing::info!(path = %path.display(), "reloading preview");
            }
            Ok(_) => return Ok(()),
            Err(PagerError::Markup(err)) => {
                tracing::debug!(%err, "markup error, showing banner");
                banner = Some(format!("{FORMAT_ERROR_BANNER}\n{err}"));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Preview of {} failed", path.display()));
            }
        }
    }
}
