//! Output side of the robot.
//!
//! [`Transcript`] is the sink outgoing messages are delivered to; [`MessageLog`] is the
//! in-memory implementation that keeps an ordered list of everything said in a session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::types::{Context, Outgoing, OutgoingKind};

/// Abstraction for recording a conversation. Implementations map to a front-end (terminal, log).
#[async_trait]
pub trait Transcript: Send + Sync {
    /// Records a line typed by a user.
    async fn incoming(&self, author: &str, text: &str, context: &Context) -> Result<()>;
    /// Records a message the robot sent.
    async fn deliver(&self, robot_name: &str, outgoing: &Outgoing) -> Result<()>;
}

/// One line of a conversation log. `kind` is `None` for lines typed by a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub author: String,
    pub kind: Option<OutgoingKind>,
    pub text: String,
    pub context: Context,
    pub at: DateTime<Utc>,
}

impl LogEntry {
    /// Human-readable line for terminal output.
    pub fn render(&self) -> String {
        match self.kind {
            None | Some(OutgoingKind::Say) => format!("{}: {}", self.author, self.text),
            Some(OutgoingKind::Reply) => match self.context.user() {
                Some(user) => format!("{}: @{} {}", self.author, user, self.text),
                None => format!("{}: {}", self.author, self.text),
            },
            Some(OutgoingKind::Emote) => format!("* {} {}", self.author, self.text),
            Some(OutgoingKind::Topic) => format!("-- topic: {}", self.text),
            Some(kind) => format!("{} [{}]: {}", self.author, kind, self.text),
        }
    }
}

/// Ordered, in-memory conversation log.
#[derive(Default)]
pub struct MessageLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in arrival order.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Most recent entry.
    pub async fn last(&self) -> Option<LogEntry> {
        self.entries.read().await.last().cloned()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl Transcript for MessageLog {
    async fn incoming(&self, author: &str, text: &str, context: &Context) -> Result<()> {
        self.entries.write().await.push(LogEntry {
            author: author.to_string(),
            kind: None,
            text: text.to_string(),
            context: context.clone(),
            at: Utc::now(),
        });
        Ok(())
    }

    async fn deliver(&self, robot_name: &str, outgoing: &Outgoing) -> Result<()> {
        self.entries.write().await.push(LogEntry {
            author: robot_name.to_string(),
            kind: Some(outgoing.kind),
            text: outgoing.text.clone(),
            context: outgoing.context.clone(),
            at: outgoing.created_at,
        });
        Ok(())
    }
}
