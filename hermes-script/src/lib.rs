//! # Hermes plugin scripts
//!
//! User-editable plugins written as
//!
//! ```text
//! module.exports = function(robot){
//!   robot.respond(/^ping$/i, say "pong")
//!   robot.hear(/good (morning|night)/i, {room: "lobby"}, reply "good $1 to you too")
//!   robot.help("ping", "Replies with pong.")
//! }
//! ```
//!
//! The body is pulled out with a fixed regex ([`extract_body`]) and interpreted by a
//! restricted rule language; it is never executed as code. A rule can only match text and
//! send one templated message back, so an edited plugin cannot reach anything the robot
//! does not already expose to chat.

mod editor;
mod parser;
mod plugin;
mod source;
mod template;

pub use editor::{PluginEditor, SCRIPT_EXTENSION};
pub use parser::{parse_body, Rule, Statement};
pub use plugin::ScriptPlugin;
pub use source::{extract_body, wrap_body};
pub use template::Template;
