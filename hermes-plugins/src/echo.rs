//! Echo: logs everything the robot says and repeats text back on request.

use hermes_core::{Event, OutgoingKind, Result};
use hermes_robot::{Plugin, Response, Robot};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoPlugin;

impl Plugin for EchoPlugin {
    fn name(&self) -> &str {
        "echo"
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        for kind in OutgoingKind::ALL {
            let nickname = robot.nickname();
            robot.subscribe(kind.as_str(), move |event: &Event| {
                if let Event::Outgoing(out) = event {
                    info!(
                        robot = %nickname,
                        kind = %out.kind,
                        context = %out.context,
                        text = %out.text,
                        "robot said"
                    );
                }
            });
        }

        robot.respond(r"(?is)^echo\s+(.+)$", |res: &Response, _robot: &Robot| {
            res.say(res.group(1).unwrap_or_default());
            Ok(())
        })?;
        robot.help(&["echo <text>"], "Repeat <text> back.");
        Ok(())
    }
}
