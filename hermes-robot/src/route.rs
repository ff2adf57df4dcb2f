//! Chat routes: which chat event a listener wants, the regex it tests and its context filter.

use std::fmt;

use hermes_core::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static MATCH_ALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s).*").expect("valid regex"));

/// The two filtered chat events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatEvent {
    /// Every message the robot hears.
    Hear,
    /// Messages starting with the robot's mention prefix; the listener sees the remainder.
    Mention,
}

impl ChatEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatEvent::Hear => "hear",
            ChatEvent::Mention => "mention",
        }
    }
}

impl fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event + regex + context filter for a chat listener.
///
/// Defaults: the regex matches everything and the filter is empty (any context).
#[derive(Debug, Clone)]
pub struct Route {
    event: ChatEvent,
    regex: Regex,
    filter: Context,
}

impl Route {
    pub fn new(event: ChatEvent) -> Self {
        Self {
            event,
            regex: MATCH_ALL.clone(),
            filter: Context::new(),
        }
    }

    pub fn hear() -> Self {
        Self::new(ChatEvent::Hear)
    }

    pub fn mention() -> Self {
        Self::new(ChatEvent::Mention)
    }

    /// Compiles `pattern` and uses it as the route's regex.
    pub fn pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.regex(Regex::new(pattern)?))
    }

    pub fn regex(mut self, regex: Regex) -> Self {
        self.regex = regex;
        self
    }

    pub fn filter(mut self, filter: Context) -> Self {
        self.filter = filter;
        self
    }

    pub fn event(&self) -> ChatEvent {
        self.event
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    pub fn context_filter(&self) -> &Context {
        &self.filter
    }

    /// Capture groups when `context` passes the filter and `text` matches the regex.
    /// Index 0 is the whole match; unmatched optional groups are `None`.
    pub fn captures(&self, text: &str, context: &Context) -> Option<Vec<Option<String>>> {
        if !self.filter.matches(context) {
            return None;
        }
        let caps = self.regex.captures(text)?;
        Some(
            caps.iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        )
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event
            && self.regex.as_str() == other.regex.as_str()
            && self.filter == other.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route_matches_everything() {
        let route = Route::mention();
        let caps = route.captures("anything\nat all", &Context::new().with_room("x"));
        assert_eq!(caps.unwrap()[0].as_deref(), Some("anything\nat all"));
        assert!(route.captures("", &Context::new()).is_some());
    }

    #[test]
    fn test_route_captures_groups() {
        let route = Route::mention().pattern(r"^set (\S+)(?: (.+))?$").unwrap();
        let caps = route.captures("set x", &Context::new()).unwrap();
        assert_eq!(caps[1].as_deref(), Some("x"));
        assert_eq!(caps[2], None);
    }

    #[test]
    fn test_route_filter_applies_before_regex() {
        let route = Route::hear()
            .pattern("hi")
            .unwrap()
            .filter(Context::new().with_room("R"));
        assert!(route.captures("hi", &Context::new().with_room("R").with_user("u")).is_some());
        assert!(route.captures("hi", &Context::new().with_room("S")).is_none());
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(Route::hear().pattern("(").is_err());
    }
}
