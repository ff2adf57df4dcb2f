//! # Plugins for the Hermes robot
//!
//! Built-ins (`echo`, `help`, `memory`) and demo commands (`flip`, `reminder`, `store`).
//! Each plugin is a unit struct implementing [`hermes_robot::Plugin`].

mod echo;
mod flip;
mod help;
mod memory;
mod reminder;
mod store;

#[cfg(test)]
mod test;

pub use echo::EchoPlugin;
pub use flip::{flip, FlipPlugin};
pub use help::HelpPlugin;
pub use memory::MemoryPlugin;
pub use reminder::ReminderPlugin;
pub use store::StorePlugin;

use hermes_core::Result;
use hermes_robot::Robot;

/// Installs echo, help and memory.
pub fn install_builtins(robot: &Robot) -> Result<()> {
    robot
        .use_plugin(EchoPlugin)?
        .use_plugin(HelpPlugin)?
        .use_plugin(MemoryPlugin)?;
    Ok(())
}

/// Installs flip, reminder and store.
pub fn install_demos(robot: &Robot) -> Result<()> {
    robot
        .use_plugin(FlipPlugin)?
        .use_plugin(ReminderPlugin)?
        .use_plugin(StorePlugin)?;
    Ok(())
}
