pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "front-helpers")]
#[command(about = "Formatting, validation and storage helpers for front-end data")]
pub struct CliConfig {
    /// Path to TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Format a date (RFC 3339, YYYY-MM-DD[ HH:MM[:SS]], a bare year or epoch millis)
    Date {
        input: String,
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// Relative time from a date until now
    Ago { input: String },
    /// Format an amount as currency
    Currency {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        #[arg(long)]
        currency: Option<String>,
    },
    /// Abbreviate a large number (1.2К, 1.5М)
    Compact {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Human-readable file size
    Size { bytes: u64 },
    /// Truncate text with an ellipsis
    Truncate {
        text: String,
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Normalize a Russian phone number
    Phone { phone: String },
    /// Strip HTML tags from a fragment
    StripHtml { html: String },
    /// Generate a random id
    Id {
        #[arg(short, long, default_value = "id")]
        prefix: String,
    },
    /// Validate a value
    Check {
        #[arg(value_enum)]
        kind: CheckKind,
        value: String,
    },
    /// Build a URL against the configured origin
    Url {
        base: String,
        /// key=value pairs
        #[arg(short, long = "param")]
        params: Vec<String>,
    },
    /// Work with the persistent key-value store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Save a file through the download directory
    Download {
        input: PathBuf,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        mime: Option<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    Email,
    Phone,
    Number,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum StoreAction {
    Get {
        key: String,
        /// JSON returned when the key is missing
        #[arg(long, default_value = "null")]
        default: String,
    },
    /// Value is parsed as JSON; anything unparsable is stored as a string
    Set { key: String, value: String },
    Remove { key: String },
    Keys,
    Clear,
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_command() {
        let cli = CliConfig::try_parse_from([
            "front-helpers",
            "date",
            "2024-01-05",
            "--pattern",
            "yyyy/MM/dd",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Date { input, pattern } => {
                assert_eq!(input, "2024-01-05");
                assert_eq!(pattern.as_deref(), Some("yyyy/MM/dd"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_store_and_check_commands() {
        let cli = CliConfig::try_parse_from(["front-helpers", "store", "set", "theme", "\"dark\""])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Store { action: StoreAction::Set { ref key, .. } } if key == "theme"
        ));

        let cli = CliConfig::try_parse_from(["front-helpers", "check", "email", "a@b.co"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check { kind: CheckKind::Email, .. }
        ));
    }

    #[test]
    fn test_negative_currency_amount() {
        let cli = CliConfig::try_parse_from(["front-helpers", "currency", "-150.5"]).unwrap();
        assert!(matches!(cli.command, Command::Currency { amount, .. } if amount == -150.5));
    }
}
