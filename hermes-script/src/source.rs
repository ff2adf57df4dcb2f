//! Extracting and re-wrapping the body of `module.exports = function(robot){ ... }`.

use hermes_core::{HermesError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static PLUGIN_SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*module\.exports\s*=\s*function\s*\(\s*robot\s*\)\s*\{(.*)\}\s*;?\s*$")
        .expect("valid regex")
});

/// Body of a plugin source, between the function's braces.
pub fn extract_body(source: &str) -> Result<String> {
    extract(source).map(|(body, _)| body.to_string())
}

/// Body plus the number of source lines preceding it, for error line numbers.
pub(crate) fn extract(source: &str) -> Result<(&str, usize)> {
    let body = PLUGIN_SOURCE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            HermesError::script(
                1,
                "plugin source must look like `module.exports = function(robot){ ... }`",
            )
        })?;
    let offset = source[..body.start()].matches('\n').count();
    Ok((body.as_str(), offset))
}

/// Wraps `body` back into a full plugin source. `extract_body(&wrap_body(b)) == b`.
pub fn wrap_body(body: &str) -> String {
    format!("module.exports = function(robot){{{}}}\n", body)
}
