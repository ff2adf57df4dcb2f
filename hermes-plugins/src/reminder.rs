//! Reminder: `remind me in <n> <unit> to <task>` schedules a timer on the tokio runtime.
//!
//! Timers are fire-and-forget; there is no cancellation.

use std::time::Duration;

use hermes_core::{HermesError, Result};
use hermes_robot::{Plugin, Response, Robot};
use tokio::runtime::Handle;
use tracing::info;

/// Seconds per unit, for `second`, `minute` and `hour` (plural accepted by the pattern).
fn unit_secs(unit: &str) -> u64 {
    match unit.to_lowercase().as_str() {
        "minute" => 60,
        "hour" => 3600,
        _ => 1,
    }
}

fn delay(amount: &str, unit: &str) -> Option<Duration> {
    let amount: u64 = amount.parse().ok()?;
    amount.checked_mul(unit_secs(unit)).map(Duration::from_secs)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReminderPlugin;

impl Plugin for ReminderPlugin {
    fn name(&self) -> &str {
        "reminder"
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        robot.respond(
            r"(?is)^remind me in (\d+) (second|minute|hour)s? to (.+)$",
            |res: &Response, robot: &Robot| {
                let amount = res.group(1).unwrap_or_default();
                let unit = res.group(2).unwrap_or_default();
                let task = res.group(3).unwrap_or_default().trim().to_string();

                let Some(delay) = delay(amount, unit) else {
                    res.error(format!("I can't wait {} {}s.", amount, unit));
                    return Ok(());
                };
                let handle = Handle::try_current().map_err(|_| {
                    HermesError::Runtime("reminders need a running tokio runtime".to_string())
                })?;

                let text = match res.user() {
                    Some(user) => format!("{}: {}", user, task),
                    None => task.clone(),
                };
                let context = res.context().clone();
                let robot = robot.clone();
                info!(delay_secs = delay.as_secs(), task = %task, "reminder scheduled");
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    info!(task = %text, "reminder fired");
                    robot.say(text, &context);
                });

                let plural = if amount == "1" { "" } else { "s" };
                res.say(format!("Okay, I'll remind you in {} {}{}.", amount, unit, plural));
                Ok(())
            },
        )?;
        robot.help(
            &["remind me in <n> <second|minute|hour>s to <task>"],
            "Remind you of <task> later.",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay() {
        assert_eq!(delay("5", "second"), Some(Duration::from_secs(5)));
        assert_eq!(delay("2", "Minute"), Some(Duration::from_secs(120)));
        assert_eq!(delay("1", "hour"), Some(Duration::from_secs(3600)));
        assert_eq!(delay("99999999999999999999", "second"), None);
        assert_eq!(delay(&u64::MAX.to_string(), "hour"), None);
    }
}
