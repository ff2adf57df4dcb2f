//! Per-match response context handed to chat handlers.

use hermes_core::{Context, OutgoingKind, Result};

use crate::listener::ListenerId;
use crate::robot::Robot;
use crate::route::{ChatEvent, Route};

/// Built fresh for every matched message and dropped when the handler returns.
///
/// Holds the regex captures (index 0 is the whole match), the text that was tested and the
/// incoming context. Output methods answer in that same context.
pub struct Response {
    robot: Robot,
    event: ChatEvent,
    text: String,
    captures: Vec<Option<String>>,
    context: Context,
}

impl Response {
    pub(crate) fn new(
        robot: Robot,
        event: ChatEvent,
        text: &str,
        captures: Vec<Option<String>>,
        context: Context,
    ) -> Self {
        Self {
            robot,
            event,
            text: text.to_string(),
            captures,
            context,
        }
    }

    pub fn event(&self) -> ChatEvent {
        self.event
    }

    /// Text the listener's regex was tested against (mention remainder for `mention`).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn captures(&self) -> &[Option<String>] {
        &self.captures
    }

    /// Capture group `index`, `None` when absent or unmatched.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.captures.get(index).and_then(|g| g.as_deref())
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn user(&self) -> Option<&str> {
        self.context.user()
    }

    pub fn room(&self) -> Option<&str> {
        self.context.room()
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn send(&self, kind: OutgoingKind, text: impl Into<String>) {
        self.robot.send(kind, text, &self.context);
    }

    pub fn say(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Say, text);
    }

    pub fn reply(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Reply, text);
    }

    pub fn emote(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Emote, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Error, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Warn, text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Success, text);
    }

    pub fn topic(&self, text: impl Into<String>) {
        self.send(OutgoingKind::Topic, text);
    }

    pub fn on<F>(&self, route: Route, handler: F) -> ListenerId
    where
        F: Fn(&Response, &Robot) -> Result<()> + Send + Sync + 'static,
    {
        self.robot.on(route, handler)
    }

    pub fn once<F>(&self, route: Route, handler: F) -> ListenerId
    where
        F: Fn(&Response, &Robot) -> Result<()> + Send + Sync + 'static,
    {
        self.robot.once(route, handler)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.robot.off(id)
    }

    /// Feeds `message` back into the robot in this response's context.
    pub fn hear(&self, message: &str) -> Result<()> {
        self.robot.hear(message, &self.context)
    }
}
