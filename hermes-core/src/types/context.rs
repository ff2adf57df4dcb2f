//! Message context: where a message came from (`user`, `room`, plus any extra keys).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

const USER: &str = "user";
const ROOM: &str = "room";

/// Key/value context attached to every heard message and used as a listener filter.
///
/// As a filter, a context matches an incoming context when every key it holds is present on
/// the incoming one with an equal value. Keys the filter does not mention are ignored, so an
/// empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, String>);

impl Context {
    /// Empty context (matches any incoming context when used as a filter).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: impl Into<String>) -> Self {
        self.with(USER, user)
    }

    pub fn with_room(self, room: impl Into<String>) -> Self {
        self.with(ROOM, room)
    }

    /// Sets an arbitrary key and returns the context for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn user(&self) -> Option<&str> {
        self.get(USER)
    }

    pub fn room(&self) -> Option<&str> {
        self.get(ROOM)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Subset equality: true when every key of `self` equals the same key on `incoming`.
    pub fn matches(&self, incoming: &Context) -> bool {
        self.0
            .iter()
            .all(|(key, value)| incoming.0.get(key) == Some(value))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {:?}", key, value)?;
        }
        f.write_str("}")
    }
}
