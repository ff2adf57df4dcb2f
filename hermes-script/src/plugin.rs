//! A compiled plugin script.

use hermes_core::Result;
use hermes_robot::{Plugin, Response, Robot};
use tracing::debug;

use crate::parser::{parse_body, Rule, Statement};
use crate::source::extract;

/// Plugin built from script source. Installing it registers one listener per rule and one
/// help entry per `robot.help(...)` line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptPlugin {
    name: String,
    statements: Vec<Statement>,
}

impl ScriptPlugin {
    /// Extracts the body of `source` and parses it. Error line numbers refer to `source`.
    pub fn compile(name: impl Into<String>, source: &str) -> Result<Self> {
        let (body, offset) = extract(source)?;
        Self::from_body(name, body, offset)
    }

    /// Parses a bare body (no `module.exports` wrapper).
    pub fn from_body(name: impl Into<String>, body: &str, line_offset: usize) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            statements: parse_body(body, line_offset)?,
        })
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Rule(rule) => Some(rule),
            Statement::Help { .. } => None,
        })
    }
}

impl Plugin for ScriptPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        for statement in &self.statements {
            match statement {
                Statement::Rule(rule) => {
                    let action = rule.action;
                    let template = rule.template.clone();
                    let id = robot.on(rule.route.clone(), move |res: &Response, robot: &Robot| {
                        res.send(action, template.expand(res, robot));
                        Ok(())
                    });
                    debug!(plugin = %self.name, listener = %id, rule = %rule, "script rule registered");
                }
                Statement::Help {
                    trigger,
                    description,
                } => robot.help(&[trigger.as_str()], description),
            }
        }
        Ok(())
    }
}
