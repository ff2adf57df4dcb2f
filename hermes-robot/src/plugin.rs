//! Plugin extension point.

use hermes_core::Result;

use crate::robot::Robot;

/// Something that extends a robot once: registers listeners, help entries or subscribers.
///
/// Closures `Fn(&Robot) -> Result<()>` are plugins too (named `anonymous`); wrap one in
/// [`PluginFn`] to give it a name.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str {
        "anonymous"
    }

    fn register(&self, robot: &Robot) -> Result<()>;
}

impl<F> Plugin for F
where
    F: Fn(&Robot) -> Result<()> + Send + Sync,
{
    fn register(&self, robot: &Robot) -> Result<()> {
        self(robot)
    }
}

/// Named closure plugin.
pub struct PluginFn<F> {
    name: String,
    register: F,
}

impl<F> PluginFn<F>
where
    F: Fn(&Robot) -> Result<()> + Send + Sync,
{
    pub fn new(name: impl Into<String>, register: F) -> Self {
        Self {
            name: name.into(),
            register,
        }
    }
}

impl<F> Plugin for PluginFn<F>
where
    F: Fn(&Robot) -> Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        (self.register)(robot)
    }
}
