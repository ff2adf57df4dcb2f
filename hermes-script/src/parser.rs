//! Line-oriented parser for plugin script bodies.
//!
//! One statement per line, optionally ending in `;`. Blank lines and `//` comment lines are
//! skipped:
//!
//! ```text
//! robot.respond(/regex/flags, [{key: "value", ...},] <action> "template")
//! robot.hear(/regex/flags, [{key: "value", ...},] <action> "template")
//! robot.help("trigger", "description")
//! ```
//!
//! `respond` listens on mentions, `hear` on every message. Actions are the outgoing kinds
//! (`say`, `reply`, `emote`, `error`, `warn`, `info`, `success`, `topic`). Regex flags
//! `i`, `m`, `s`, `x` map to inline flags; `g` is accepted and ignored.

use std::fmt;

use hermes_core::{Context, HermesError, OutgoingKind, Result};
use hermes_robot::{ChatEvent, Route};
use regex::Regex;

use crate::template::Template;

/// Listener rule: when `route` matches, send `action` with the expanded `template`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub route: Route,
    pub action: OutgoingKind,
    pub template: Template,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}/", self.route.event(), self.route.as_regex().as_str())?;
        if !self.route.context_filter().is_empty() {
            write!(f, " {}", self.route.context_filter())?;
        }
        write!(f, " -> {} {:?}", self.action, self.template.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Rule(Rule),
    Help {
        trigger: String,
        description: String,
    },
}

/// Parses a script body. `line_offset` is added to reported line numbers.
pub fn parse_body(body: &str, line_offset: usize) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    for (index, raw) in body.lines().enumerate() {
        let line_no = line_offset + index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        statements.push(Cursor::new(line, line_no).statement()?);
    }
    Ok(statements)
}

struct Cursor<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self { rest: text, line }
    }

    fn error(&self, message: impl Into<String>) -> HermesError {
        HermesError::script(self.line, message)
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}` near `{}`", token, self.rest)))
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let text: &'a str = self.rest;
        let end = text
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(text.len());
        if end == 0 {
            return Err(self.error(format!("expected a name near `{}`", text)));
        }
        let (ident, rest) = text.split_at(end);
        self.rest = rest;
        Ok(ident)
    }

    /// `"..."` with `\"`, `\\`, `\n` and `\t` escapes.
    fn string(&mut self) -> Result<String> {
        self.expect("\"")?;
        let text: &'a str = self.rest;
        let mut out = String::new();
        let mut chars = text.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.rest = &text[i + 1..];
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, other)) => out.push(other),
                    None => break,
                },
                other => out.push(other),
            }
        }
        Err(self.error("unterminated string"))
    }

    /// `/pattern/flags`; `\/` inside the pattern stands for `/`.
    fn regex(&mut self) -> Result<Regex> {
        self.expect("/")?;
        let text: &'a str = self.rest;
        let mut pattern = String::new();
        let mut chars = text.char_indices();
        let mut end = None;
        while let Some((i, c)) = chars.next() {
            match c {
                '/' => {
                    end = Some(i);
                    break;
                }
                '\\' => match chars.next() {
                    Some((_, '/')) => pattern.push('/'),
                    Some((_, other)) => {
                        pattern.push('\\');
                        pattern.push(other);
                    }
                    None => break,
                },
                other => pattern.push(other),
            }
        }
        let end = end.ok_or_else(|| self.error("unterminated regex"))?;
        let after: &'a str = &text[end + 1..];

        let flag_end = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        let (flags, rest) = after.split_at(flag_end);
        self.rest = rest;

        let mut inline = String::new();
        for flag in flags.chars() {
            match flag {
                'i' | 'm' | 's' | 'x' => inline.push(flag),
                'g' => {}
                other => return Err(self.error(format!("unsupported regex flag `{}`", other))),
            }
        }
        let pattern = if inline.is_empty() {
            pattern
        } else {
            format!("(?{}){}", inline, pattern)
        };
        Regex::new(&pattern).map_err(|e| self.error(format!("invalid regex: {}", e)))
    }

    /// `{key: "value", ...}`; keys may be bare names or strings.
    fn filter(&mut self) -> Result<Context> {
        self.expect("{")?;
        let mut filter = Context::new();
        if self.eat("}") {
            return Ok(filter);
        }
        loop {
            self.skip_ws();
            let key = if self.peek() == Some('"') {
                self.string()?
            } else {
                self.ident()?.to_string()
            };
            self.expect(":")?;
            self.skip_ws();
            let value = self.string()?;
            filter.set(key, value);
            if self.eat("}") {
                return Ok(filter);
            }
            self.expect(",")?;
        }
    }

    fn statement(mut self) -> Result<Statement> {
        self.expect("robot")?;
        self.expect(".")?;
        let method = self.ident()?;
        self.expect("(")?;

        let statement = match method {
            "respond" | "hear" => {
                let event = if method == "respond" {
                    ChatEvent::Mention
                } else {
                    ChatEvent::Hear
                };
                self.skip_ws();
                let regex = self.regex()?;
                self.expect(",")?;
                self.skip_ws();
                let filter = if self.peek() == Some('{') {
                    let filter = self.filter()?;
                    self.expect(",")?;
                    filter
                } else {
                    Context::new()
                };
                let action_name = self.ident()?;
                let action: OutgoingKind = action_name
                    .parse()
                    .map_err(|_| self.error(format!("unknown action `{}`", action_name)))?;
                self.skip_ws();
                let template = Template::new(self.string()?);
                Statement::Rule(Rule {
                    route: Route::new(event).regex(regex).filter(filter),
                    action,
                    template,
                })
            }
            "help" => {
                self.skip_ws();
                let trigger = self.string()?;
                self.expect(",")?;
                self.skip_ws();
                let description = self.string()?;
                Statement::Help {
                    trigger,
                    description,
                }
            }
            other => return Err(self.error(format!("unknown robot method `{}`", other))),
        };

        self.expect(")")?;
        self.eat(";");
        self.skip_ws();
        if !self.rest.is_empty() {
            return Err(self.error(format!("unexpected trailing input `{}`", self.rest)));
        }
        Ok(statement)
    }
}
