//! packager - Package a content directory and preview its files.
//!
//! # Usage
//!
//! ```bash
//! packager init
//! packager preview notes/readme.txt
//! packager pack --yes
//! packager clean
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use packager::commands::{
    self, AssumeYes, EXIT_FAILURE, Notice, Outcome, Prompt, TerminalPrompt, Tone,
};
use packager::config::{
    ConfigFlags, Settings, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};

/// Package a content directory into a zip archive and preview its files
#[derive(Parser, Debug)]
#[command(name = "packager", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Content directory to package
    #[arg(long, global = true, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Archive written by `pack`
    #[arg(long, global = true, value_name = "FILE")]
    archive: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    /// Write logs to a file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            content: self.content.clone(),
            archive: self.archive.clone(),
            yes: self.yes,
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the content directory
    Init,
    /// Delete everything in the content directory
    Purge,
    /// Zip the content directory
    Pack,
    /// Remove the generated archive
    Clean,
    /// View a file from the content directory
    Preview {
        /// Path relative to the content directory
        #[arg(value_name = "PATH")]
        paths: Vec<String>,
    },
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .init();
    Ok(())
}

fn print_notice(notice: &Notice) {
    let text = notice.text.as_str();
    match notice.tone {
        Tone::Plain => println!("{text}"),
        Tone::Success => println!("{}", text.green()),
        Tone::Warning => println!("{}", text.yellow()),
        Tone::Error => eprintln!("{}", text.red()),
    }
}

fn run(command: &Command, settings: &Settings) -> Result<Outcome> {
    let mut prompt: Box<dyn Prompt> = if settings.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt)
    };

    let outcome = match command {
        Command::Init => commands::init(settings),
        Command::Purge => commands::purge(settings, prompt.as_mut()),
        Command::Pack => commands::pack(settings, prompt.as_mut()),
        Command::Clean => commands::clean(settings),
        Command::Preview { paths } => commands::preview(settings, paths)?,
    };
    Ok(outcome)
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_FAILURE,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;
    tracing::debug!(?effective, "resolved configuration");

    let Some(command) = &cli.command else {
        if !(cli.save || cli.clear) {
            Cli::command().print_help()?;
        }
        return Ok(());
    };

    let settings = Settings::from_flags(&effective);
    let outcome = run(command, &settings)?;
    if let Some(notice) = &outcome.notice {
        print_notice(notice);
    }
    if outcome.code != 0 {
        std::process::exit(outcome.code);
    }
    Ok(())
}
