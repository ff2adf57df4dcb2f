//! One-shot subcommands.

use std::path::Path;

use anyhow::{Context as _, Result};
use hermes_core::{MessageLog, Transcript};
use hermes_script::ScriptPlugin;
use tracing::info;

use crate::config::HermesConfig;
use crate::repl::drain;
use crate::session::Session;

/// Says `text` to a freshly built robot and returns what it answered, rendered.
/// Timers the message schedules do not outlive the call.
pub async fn hear_once(config: HermesConfig, text: &str) -> Result<Vec<String>> {
    let (session, mut rx) = Session::start(config)?;
    let log = MessageLog::new();
    log.incoming(session.user(), text, &session.context()).await?;
    session.hear(text)?;
    let said = drain(&session, &log, &mut rx).await?;
    session.save_brain()?;
    Ok(said)
}

/// Compiles a plugin script without installing it; returns one line per statement.
pub fn check_file(path: &Path) -> Result<Vec<String>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plugin");
    let plugin = ScriptPlugin::compile(name, &source)
        .with_context(|| format!("{} does not compile", path.display()))?;

    let mut lines: Vec<String> = plugin.rules().map(ToString::to_string).collect();
    let rules = lines.len();
    let help = plugin.statements().len() - rules;
    info!(plugin = %name, rules = rules, help = help, "step: plugin checked");
    lines.push(format!("{}: {} rules, {} help entries", name, rules, help));
    Ok(lines)
}
