//! Contacts CLI - an interactive, menu-driven address book
//!
//! Loads the contacts file, runs the menu session on the terminal (or on
//! piped stdin) and writes the file back on exit when anything changed.

mod app;
mod cli;
mod config;
mod constants;
mod input;
mod logging;
mod prompt;
mod ui;

use std::io::{self, IsTerminal};

use clap::Parser;
use tracing::error;

use contacts_core::{local_today, AddressBook, Session};

use crate::app::AppContext;
use crate::cli::Cli;
use crate::constants::exit_codes;
use crate::input::{interactive, ReaderSource, TerminalSource};
use crate::ui::UiContext;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let app = match AppContext::load(&cli) {
        Ok(app) => app,
        Err(err) => {
            ui::print_error(&UiContext::plain(), &err.to_string());
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };
    let ctx = app.ui();
    let path = app.book_path()?;

    let mut book = match AddressBook::open(&path) {
        Ok(book) => book,
        Err(err) => {
            error!(error = %err, "failed to load contacts");
            ui::print_error(&ctx, &err.to_string());
            std::process::exit(exit_codes::LOAD_FAILED);
        }
    };
    let session = Session::new(app.page_size(), local_today());

    let mut out = io::stdout();
    let saved = if interactive(io::stdin().is_terminal(), io::stdout().is_terminal()) {
        let mut source = TerminalSource::new();
        app::run(&mut book, &session, &ctx, &mut source, &mut out)?
    } else {
        let mut source = ReaderSource::new(io::stdin().lock(), io::stdout());
        app::run(&mut book, &session, &ctx, &mut source, &mut out)?
    };

    if !saved {
        ui::print_error(&ctx, "Changes were not saved");
        std::process::exit(exit_codes::WRITE_FAILED);
    }
    Ok(())
}
