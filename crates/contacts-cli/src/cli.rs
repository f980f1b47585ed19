use clap::{ArgAction, Parser};

use contacts_core::VERSION;

/// Contacts - an interactive, menu-driven address book
#[derive(Parser, Debug)]
#[command(name = "contacts")]
#[command(author, version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Path to the contacts file (a directory gets `ab.json` appended)
    #[arg(value_name = "PATH", env = "CONTACTS_PATH")]
    pub path: Option<String>,

    /// Contacts shown per page when browsing
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Config file override
    #[arg(long, value_name = "FILE", env = "CONTACTS_CONFIG")]
    pub config: Option<String>,

    /// Plain output even on a terminal
    #[arg(long)]
    pub plain: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// ASCII symbols only
    #[arg(long)]
    pub ascii: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_path_and_flags() {
        let cli = Cli::try_parse_from(["contacts", "book.json", "--page-size", "3", "-vv"]).unwrap();
        assert_eq!(cli.path.as_deref(), Some("book.json"));
        assert_eq!(cli.page_size, Some(3));
        assert_eq!(cli.verbose, 2);
    }
}
