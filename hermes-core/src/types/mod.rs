//! Core types: message context, generic events and outgoing messages.

mod context;
mod event;

pub use context::Context;
pub use event::{Event, Outgoing, OutgoingKind};
