//! Help: lists the commands other plugins documented with `robot.help(...)`.

use hermes_core::Result;
use hermes_robot::{Plugin, Response, Robot};

#[derive(Debug, Clone, Copy, Default)]
pub struct HelpPlugin;

impl Plugin for HelpPlugin {
    fn name(&self) -> &str {
        "help"
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        robot.help(&["help", "help <query>"], "List commands, optionally filtered.");

        robot.respond(r"(?i)^help(?:\s+(.+?))?\s*$", |res: &Response, robot: &Robot| {
            let query = res.group(1);
            let lines: Vec<String> = robot
                .help_entries()
                .iter()
                .filter(|entry| query.map_or(true, |q| entry.matches(q)))
                .map(|entry| format!("{}{}", robot.mention(), entry.render()))
                .collect();

            match (lines.is_empty(), query) {
                (true, Some(q)) => res.say(format!("No commands match \"{}\".", q)),
                (true, None) => res.say("No commands documented yet."),
                (false, _) => res.say(lines.join("\n")),
            }
            Ok(())
        })?;
        Ok(())
    }
}
