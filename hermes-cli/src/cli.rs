//! CLI parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "hermes")]
#[command(about = "Hermes chat robot shell", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive shell (config from env; flags override it).
    Repl,
    /// Say one message to the robot and print its answers.
    Hear {
        /// Message text, e.g. "@hermes flip abc".
        text: String,
    },
    /// Compile a plugin script and list its rules without running it.
    Check {
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hear_with_overrides() {
        let cli = Cli::parse_from(["hermes", "hear", "@bot ping", "--name", "Bot", "--room", "r"]);
        assert_eq!(cli.overrides.name.as_deref(), Some("Bot"));
        assert_eq!(cli.overrides.room.as_deref(), Some("r"));
        assert!(matches!(cli.command, Commands::Hear { ref text } if text == "@bot ping"));
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["hermes", "check", "plugins/greet.hermes"]);
        assert!(cli.overrides.plugin_dir.is_none());
        assert!(
            matches!(cli.command, Commands::Check { ref file } if file.ends_with("greet.hermes"))
        );
    }
}
