//! Help registry entries.

use serde::Serialize;

/// One documented command: the triggers a user types and what they do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub triggers: Vec<String>,
    pub description: String,
}

impl HelpEntry {
    /// True when any trigger or the description contains `query` (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.triggers
            .iter()
            .any(|t| t.to_lowercase().contains(&query))
            || self.description.to_lowercase().contains(&query)
    }

    /// `trigger1, trigger2 - description`
    pub fn render(&self) -> String {
        format!("{} - {}", self.triggers.join(", "), self.description)
    }
}
