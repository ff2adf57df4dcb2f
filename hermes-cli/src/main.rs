//! hermes CLI: interactive shell, one-shot messages and plugin checks. Config from env and
//! optional CLI flags.

use anyhow::Result;
use clap::Parser;
use hermes_cli::{check_file, hear_once, repl, Cli, Commands, HermesConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HermesConfig::load(&cli.overrides)?;
    config.validate()?;
    hermes_core::init_tracing(config.log_file(), "info")?;

    match cli.command {
        Commands::Repl => repl::run(config).await,
        Commands::Hear { text } => {
            for line in hear_once(config, &text).await? {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Check { file } => {
            for line in check_file(&file)? {
                println!("{}", line);
            }
            Ok(())
        }
    }
}
