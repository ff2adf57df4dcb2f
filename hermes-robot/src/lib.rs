//! # Hermes robot
//!
//! The [`Robot`] receives raw chat text with a [`Context`], decides whether the text is
//! addressed to it (mention prefix) and dispatches to the regex listeners plugins registered.
//!
//! Two kinds of subscription exist side by side:
//! - chat subscriptions ([`Robot::on`], [`Robot::once`]) filter `hear` / `mention` events by
//!   context and regex and receive a [`Response`];
//! - generic subscriptions ([`Robot::subscribe`]) receive any named [`Event`] unfiltered
//!   (outgoing `say`, `reply`, ..., `error`, or plugin-defined events).

mod brain;
mod help;
mod listener;
mod plugin;
mod response;
mod robot;
mod route;

pub use brain::{Attrs, Brain, BrainSnapshot};
pub use help::HelpEntry;
pub use listener::{ChatHandler, EventHandler, ListenerId};
pub use plugin::{Plugin, PluginFn};
pub use response::Response;
pub use robot::{nickify, Robot, DEFAULT_TEMPLATE};
pub use route::{ChatEvent, Route};

pub use hermes_core::{Context, Event, HermesError, Outgoing, OutgoingKind, Result};
