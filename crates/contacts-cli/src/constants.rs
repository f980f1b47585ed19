//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// - 0: Clean exit
/// - 1: Contacts could not be written on exit (also anyhow's default)
/// - 2: Misuse of shell command (clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unsaved changes were lost because the final write failed.
    pub const WRITE_FAILED: i32 = 1;

    /// The contacts file exists but could not be loaded.
    pub const LOAD_FAILED: i32 = 3;

    /// The config file could not be read or parsed.
    pub const CONFIG_ERROR: i32 = 4;
}
