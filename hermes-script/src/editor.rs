//! Plugin editor: named plugin sources that can be edited as bodies and re-installed.

use std::collections::BTreeMap;
use std::path::Path;

use hermes_core::{HermesError, Result};
use hermes_robot::{Plugin, Robot};
use tracing::{info, warn};

use crate::plugin::ScriptPlugin;
use crate::source::{extract_body, wrap_body};

/// File extension of plugin scripts on disk.
pub const SCRIPT_EXTENSION: &str = "hermes";

/// Holds plugin sources by name, in name order.
#[derive(Debug, Clone, Default)]
pub struct PluginEditor {
    sources: BTreeMap<String, String>,
}

impl PluginEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.hermes` file in `dir`; the file stem is the plugin name.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut editor = Self::new();
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION))
            .collect();
        paths.sort();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping plugin with non UTF-8 name");
                continue;
            };
            editor.open(name, std::fs::read_to_string(&path)?);
        }
        info!(dir = %dir.display(), plugins = editor.sources.len(), "plugin sources loaded");
        Ok(editor)
    }

    /// Writes every source to `dir/<name>.hermes`.
    pub fn save_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        for (name, source) in &self.sources {
            std::fs::write(dir.join(format!("{}.{}", name, SCRIPT_EXTENSION)), source)?;
        }
        Ok(())
    }

    /// Adds or replaces the full source of `name`.
    pub fn open(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }

    pub fn close(&mut self, name: &str) -> Option<String> {
        self.sources.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    /// Editable body of `name`, extracted with the fixed plugin regex.
    pub fn body(&self, name: &str) -> Result<String> {
        extract_body(self.require(name)?)
    }

    /// Replaces the body of `name`, re-wrapping it into a full source.
    pub fn set_body(&mut self, name: impl Into<String>, body: &str) {
        self.sources.insert(name.into(), wrap_body(body));
    }

    pub fn compile(&self, name: &str) -> Result<ScriptPlugin> {
        ScriptPlugin::compile(name, self.require(name)?)
    }

    /// Compiles every source, then installs them in name order. Nothing is installed when
    /// any source fails to compile.
    pub fn install(&self, robot: &Robot) -> Result<Vec<String>> {
        let plugins = self
            .sources
            .keys()
            .map(|name| self.compile(name))
            .collect::<Result<Vec<_>>>()?;
        let mut installed = Vec::with_capacity(plugins.len());
        for plugin in plugins {
            installed.push(plugin.name().to_string());
            robot.use_plugin(plugin)?;
        }
        Ok(installed)
    }

    fn require(&self, name: &str) -> Result<&str> {
        self.source(name)
            .ok_or_else(|| HermesError::InvalidArgument(format!("no plugin named {}", name)))
    }
}
