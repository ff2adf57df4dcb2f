//! Listener handler types and the two subscription kinds stored by the robot.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use hermes_core::{Event, Result};

use crate::response::Response;
use crate::robot::Robot;
use crate::route::Route;

/// Handle returned on registration; pass it to [`Robot::off`] to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Boxed handler for a matched chat message.
pub type ChatHandler = Box<dyn Fn(&Response, &Robot) -> Result<()> + Send + Sync>;

/// Boxed handler for a generic named event.
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

/// Chat listener: route plus handler.
pub(crate) struct ChatSubscription {
    pub id: ListenerId,
    pub route: Route,
    pub handler: ChatHandler,
    pub once: bool,
    fired: AtomicBool,
}

impl ChatSubscription {
    pub fn new(id: ListenerId, route: Route, handler: ChatHandler, once: bool) -> Self {
        Self {
            id,
            route,
            handler,
            once,
            fired: AtomicBool::new(false),
        }
    }

    /// Claims the single shot of a `once` listener. Always true for persistent listeners.
    pub fn claim(&self) -> bool {
        !self.once || !self.fired.swap(true, Ordering::SeqCst)
    }
}

/// Plain listener keyed by event name.
pub(crate) struct GenericSubscription {
    pub id: ListenerId,
    pub name: String,
    pub handler: EventHandler,
    pub once: bool,
    fired: AtomicBool,
}

impl GenericSubscription {
    pub fn new(id: ListenerId, name: String, handler: EventHandler, once: bool) -> Self {
        Self {
            id,
            name,
            handler,
            once,
            fired: AtomicBool::new(false),
        }
    }

    pub fn claim(&self) -> bool {
        !self.once || !self.fired.swap(true, Ordering::SeqCst)
    }
}
