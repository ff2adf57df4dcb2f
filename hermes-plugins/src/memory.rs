//! Memory: remembers every user and room the robot hears from.

use hermes_core::Result;
use hermes_robot::{Plugin, Response, Robot, Route};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryPlugin;

impl Plugin for MemoryPlugin {
    fn name(&self) -> &str {
        "memory"
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        robot.on(Route::hear(), |res: &Response, robot: &Robot| {
            if let Some(user) = res.user() {
                robot.user(user, None);
            }
            if let Some(room) = res.room() {
                robot.room(room, None);
            }
            debug!(user = ?res.user(), room = ?res.room(), "memory: recorded");
            Ok(())
        });

        robot.respond(r"(?i)^who\s*am\s*i\??$", |res: &Response, robot: &Robot| {
            match res.user() {
                Some(user) => {
                    let record = Value::Object(robot.user(user, None));
                    res.reply(format!("You are {}", record));
                }
                None => res.reply("I don't know who you are."),
            }
            Ok(())
        })?;
        robot.help(&["whoami"], "Show what I remember about you.");
        Ok(())
    }
}
