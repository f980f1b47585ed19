//! Tracing subscriber bootstrap. Logs go to stderr, never to the prompt stream.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable overriding the log level.
pub const LOG_ENV: &str = "CONTACTS_LOG";

/// Level from `CONTACTS_LOG` if set, else from the `-v` count.
pub fn resolve_level(env_value: Option<&str>, verbose: u8) -> Level {
    if let Some(value) = env_value {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => return Level::TRACE,
            "debug" => return Level::DEBUG,
            "info" => return Level::INFO,
            "warn" => return Level::WARN,
            "error" => return Level::ERROR,
            _ => {}
        }
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Escape codes only when stderr is a terminal and `NO_COLOR` is unset.
pub fn use_ansi(stderr_is_tty: bool, no_color: bool) -> bool {
    stderr_is_tty && !no_color
}

pub fn init(verbose: u8) -> anyhow::Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let level = resolve_level(env_value.as_deref(), verbose);
    let ansi = use_ansi(
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}
