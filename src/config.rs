use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default content directory, relative to the working directory.
pub const DEFAULT_CONTENT_DIR: &str = "content";
/// Default archive produced by `pack`.
pub const DEFAULT_ARCHIVE: &str = "package.zip";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub content: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub yes: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            content: other.content.clone().or_else(|| self.content.clone()),
            archive: other.archive.clone().or_else(|| self.archive.clone()),
            yes: self.yes || other.yes,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

/// Resolved settings used by the commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub content_dir: PathBuf,
    pub archive: PathBuf,
    pub assume_yes: bool,
}

impl Settings {
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        Self {
            content_dir: flags
                .content
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
            archive: flags
                .archive
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE)),
            assume_yes: flags.yes,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_flags(&ConfigFlags::default())
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("packager").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("packager")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("packager").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("packager")
                .join("config");
        }
    }

    PathBuf::from(".packagerrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".packagerrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split one config line into flag tokens.
///
/// A path flag takes the rest of its line as the value, so saved paths may
/// contain spaces.
fn line_tokens(line: &str) -> Vec<String> {
    if let Some((name, value)) = line.split_once(char::is_whitespace) {
        if is_path_flag(name) {
            return vec![name.to_owned(), value.trim().to_owned()];
        }
    }
    if let Some((name, _)) = line.split_once('=') {
        if is_path_flag(name) {
            return vec![line.to_owned()];
        }
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# packager defaults (saved with --save)".to_string());
    if let Some(content) = &flags.content {
        lines.push(format!("--content {}", content.display()));
    }
    if let Some(archive) = &flags.archive {
        lines.push(format!("--archive {}", archive.display()));
    }
    if flags.yes {
        lines.push("--yes".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--yes" || token == "-y" {
            flags.yes = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_path_flag(&mut flags, name, value);
        } else if is_path_flag(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_path_flag(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_path_flag(name: &str) -> bool {
    matches!(name, "--content" | "--archive" | "--log-file")
}

fn apply_path_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    let value = Some(PathBuf::from(value));
    match name {
        "--content" => flags.content = value,
        "--archive" => flags.archive = value,
        "--log-file" => flags.log_file = value,
        _ => {}
    }
}
