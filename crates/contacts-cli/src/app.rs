//! Application context and the interactive driver loop.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use contacts_core::{AddressBook, Session, State};

use crate::cli::Cli;
use crate::config::{default_config_path, load_config, ContactsConfig};
use crate::input::LineSource;
use crate::prompt;
use crate::ui::{self, UiContext};

/// CLI arguments bundled with the loaded configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: ContactsConfig,
}

impl<'a> AppContext<'a> {
    /// Load the config named by `--config` / `CONTACTS_CONFIG`, or the
    /// default one if present.
    pub fn load(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path(cli)?;
        debug!(path = %config_path.display(), "loading config");
        let config = load_config(&config_path)?;
        Ok(Self { cli, config })
    }

    pub fn book_path(&self) -> anyhow::Result<PathBuf> {
        self.config.book_path(self.cli.path.as_deref())
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size(self.cli.page_size)
    }

    pub fn ui(&self) -> UiContext {
        UiContext::from_env(self.cli.plain, self.cli.no_color, self.cli.ascii)
    }
}

pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match cli.config.as_deref() {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

/// Drive `session` until it exits.
///
/// Returns whether every change reached storage. If input or output
/// fails, pending changes are written before the error is returned.
pub fn run<S, W>(
    book: &mut AddressBook,
    session: &Session,
    ctx: &UiContext,
    source: &mut S,
    out: &mut W,
) -> anyhow::Result<bool>
where
    S: LineSource,
    W: Write,
{
    info!(
        path = %book.location().display(),
        contacts = book.len(),
        "session started"
    );
    if let Err(err) = drive_session(book, session, ctx, source, out) {
        flush_after_error(book);
        return Err(err);
    }
    Ok(!book.is_dirty())
}

fn drive_session<S, W>(
    book: &mut AddressBook,
    session: &Session,
    ctx: &UiContext,
    source: &mut S,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: LineSource,
    W: Write,
{
    let mut state = State::initial(book);
    while !state.is_exit() {
        let text = prompt::render(ctx, book, &state, session.page_size, session.today);
        let input = source.next_input(&text)?;
        let step = session.step(book, state, input);
        for notice in &step.notices {
            writeln!(out, "{}", ui::notice(ctx, notice, session.today))?;
        }
        out.flush()?;
        state = step.state;
    }
    Ok(())
}

fn flush_after_error(book: &mut AddressBook) {
    if !book.is_dirty() {
        return;
    }
    match book.flush() {
        Ok(_) => warn!("session aborted; pending changes were written"),
        Err(err) => error!(error = %err, "session aborted; pending changes were lost"),
    }
}
