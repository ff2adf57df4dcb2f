//! Generic event payloads and outgoing robot messages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::Context;
use crate::error::HermesError;

/// Kind of message the robot sends; each kind is also the generic event name it is emitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutgoingKind {
    Say,
    Reply,
    Emote,
    Error,
    Warn,
    Info,
    Success,
    Topic,
}

impl OutgoingKind {
    pub const ALL: [OutgoingKind; 8] = [
        OutgoingKind::Say,
        OutgoingKind::Reply,
        OutgoingKind::Emote,
        OutgoingKind::Error,
        OutgoingKind::Warn,
        OutgoingKind::Info,
        OutgoingKind::Success,
        OutgoingKind::Topic,
    ];

    /// Event name under which messages of this kind are emitted.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutgoingKind::Say => "say",
            OutgoingKind::Reply => "reply",
            OutgoingKind::Emote => "emote",
            OutgoingKind::Error => "error",
            OutgoingKind::Warn => "warn",
            OutgoingKind::Info => "info",
            OutgoingKind::Success => "success",
            OutgoingKind::Topic => "topic",
        }
    }
}

impl fmt::Display for OutgoingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutgoingKind {
    type Err = HermesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutgoingKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HermesError::InvalidArgument(format!("unknown message kind: {}", s)))
    }
}

/// A message the robot sends back, with the context it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outgoing {
    pub kind: OutgoingKind,
    pub text: String,
    pub context: Context,
    pub created_at: DateTime<Utc>,
}

impl Outgoing {
    pub fn new(kind: OutgoingKind, text: impl Into<String>, context: Context) -> Self {
        Self {
            kind,
            text: text.into(),
            context,
            created_at: Utc::now(),
        }
    }
}

/// Payload delivered to generic (non chat-filtered) subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw text heard by the robot.
    Hear { message: String, context: Context },
    /// Text addressed to the robot, with the mention prefix stripped.
    Mention { message: String, context: Context },
    /// Something the robot said (say, reply, error, ...).
    Outgoing(Outgoing),
    /// Any event a plugin emits under its own name.
    Custom(serde_json::Value),
}

impl Event {
    /// Context of the event, when it carries one.
    pub fn context(&self) -> Option<&Context> {
        match self {
            Event::Hear { context, .. } | Event::Mention { context, .. } => Some(context),
            Event::Outgoing(outgoing) => Some(&outgoing.context),
            Event::Custom(_) => None,
        }
    }
}
