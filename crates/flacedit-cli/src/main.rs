use anyhow::Result;
use clap::Parser;
use flacedit_core::{Config, FlacAccessor, LogJournal};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;
mod prompt;
mod session;

use prompt::Prompter;
use session::{Outcome, Session};

#[derive(Debug, Parser)]
#[command(name = "flacedit", version, about)]
struct Cli {
    /// Path to the FLAC file to view or edit
    ///
    /// You are asked whether to view the file's tags (v) or modify them (m).
    ///
    /// When modifying, each common field (TITLE, ARTIST, ALBUM, DATE, GENRE by
    /// default) is shown with its current value. Leave an answer blank to keep
    /// the existing value. Afterwards any number of extra fields can be added;
    /// a blank field name finishes. Changes are written only after an
    /// explicit "y" at the confirmation prompt.
    ///
    /// Exit status is 1 if a modify session cannot read the file, 0 otherwise.
    path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {e:#}. Using default configuration.");
        Config::default()
    });

    let _log_guard = logging::init(&config);

    match run(&cli, &config) {
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<Outcome> {
    let journal = LogJournal;
    let accessor = FlacAccessor::new(&journal);

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());

    let mut session = Session::new(&accessor, &journal, &config.fields, prompter);
    session.run(&cli.path)
}
