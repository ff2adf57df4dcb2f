//! # hermes-core
//!
//! Core types for the Hermes chat robot: message [`Context`], generic [`Event`] payloads,
//! [`Outgoing`] messages, the [`Transcript`] output sink, error types and tracing
//! initialization. Transport-agnostic; used by hermes-robot, hermes-plugins and hermes-cli.

pub mod error;
pub mod logger;
pub mod transcript;
pub mod types;

pub use error::{HermesError, Result};
pub use logger::init_tracing;
pub use transcript::{LogEntry, MessageLog, Transcript};
pub use types::{Context, Event, Outgoing, OutgoingKind};
