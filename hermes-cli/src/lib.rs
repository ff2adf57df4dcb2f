//! # hermes-cli
//!
//! The `hermes` shell: env/flag configuration, the interactive REPL and one-shot commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod repl;
pub mod session;

pub use cli::{Cli, Commands};
pub use commands::{check_file, hear_once};
pub use config::{HermesConfig, Overrides};
pub use repl::{parse_input, Input};
pub use session::Session;
