//! Store: `set <key> <value>` / `get <key>` / `unset <key>` over the robot's data.

use hermes_core::Result;
use hermes_robot::{Plugin, Response, Robot};
use serde_json::Value;

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StorePlugin;

impl Plugin for StorePlugin {
    fn name(&self) -> &str {
        "store"
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        robot.respond(r"(?is)^set\s+(\S+)\s+(.+)$", |res: &Response, robot: &Robot| {
            let key = res.group(1).unwrap_or_default();
            let value = res.group(2).unwrap_or_default().trim();
            robot.set_data(key, Value::String(value.to_string()));
            res.say(format!("Okay, {} is {}.", key, value));
            Ok(())
        })?;

        robot.respond(r"(?i)^get\s+(\S+)\s*$", |res: &Response, robot: &Robot| {
            let key = res.group(1).unwrap_or_default();
            match robot.data(key) {
                Some(value) => res.say(format!("{} is {}", key, display(&value))),
                None => res.say(format!("{} is not set", key)),
            }
            Ok(())
        })?;

        robot.respond(r"(?i)^unset\s+(\S+)\s*$", |res: &Response, robot: &Robot| {
            let key = res.group(1).unwrap_or_default();
            match robot.brain().remove_data(key) {
                Some(_) => res.say(format!("Forgot {}.", key)),
                None => res.say(format!("{} is not set", key)),
            }
            Ok(())
        })?;

        robot.help(&["set <key> <value>"], "Remember <value> under <key>.");
        robot.help(&["get <key>"], "Tell the value stored under <key>.");
        robot.help(&["unset <key>"], "Forget <key>.");
        Ok(())
    }
}
