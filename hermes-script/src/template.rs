//! Reply templates: `$0`..`$9` capture groups, `$user`, `$room`, `$nick`, `$$` for a dollar.

use hermes_robot::{Response, Robot};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$|[0-9]|user|room|nick)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
}

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Expands placeholders against a matched response. Missing values expand to "".
    pub fn expand(&self, res: &Response, robot: &Robot) -> String {
        PLACEHOLDER
            .replace_all(&self.raw, |caps: &Captures| match &caps[1] {
                "$" => "$".to_string(),
                "user" => res.user().unwrap_or_default().to_string(),
                "room" => res.room().unwrap_or_default().to_string(),
                "nick" => robot.nickname(),
                digit => digit
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| res.group(i))
                    .unwrap_or_default()
                    .to_string(),
            })
            .into_owned()
    }
}
