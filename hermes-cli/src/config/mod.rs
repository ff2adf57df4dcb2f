//! Shell configuration: robot identity, default conversation context, plugin directory,
//! brain persistence and logging. Loaded from env; command-line flags override env.


use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use hermes_core::Context;
use hermes_robot::DEFAULT_TEMPLATE;

/// Flags that override the matching env variables.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Robot name (HERMES_NAME).
    #[arg(long, global = true)]
    pub name: Option<String>,
    /// Robot nickname used in the mention prefix (HERMES_NICKNAME).
    #[arg(long, global = true)]
    pub nickname: Option<String>,
    /// Mention template, `%s` is the nickname (HERMES_TEMPLATE).
    #[arg(long, global = true)]
    pub template: Option<String>,
    /// Directory of `*.hermes` plugin scripts (HERMES_PLUGIN_DIR).
    #[arg(long, global = true)]
    pub plugin_dir: Option<PathBuf>,
    /// User id messages are sent as (HERMES_USER).
    #[arg(long, global = true)]
    pub user: Option<String>,
    /// Room id messages are sent in (HERMES_ROOM).
    #[arg(long, global = true)]
    pub room: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HermesConfig {
    /// HERMES_NAME
    pub name: String,
    /// HERMES_NICKNAME; derived from the name when unset
    pub nickname: Option<String>,
    /// HERMES_TEMPLATE
    pub template: String,
    /// HERMES_PLUGIN_DIR
    pub plugin_dir: Option<PathBuf>,
    /// HERMES_USER
    pub user: String,
    /// HERMES_ROOM
    pub room: String,
    /// HERMES_BRAIN_PATH; brain is kept in memory only when unset
    pub brain_path: Option<PathBuf>,
    /// LOG_FILE; stderr only when unset
    pub log_file: Option<String>,
}

/// Env variable, treating an empty value as unset.
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl HermesConfig {
    /// Load from environment variables, then apply `overrides`.
    /// Call validate() after load to check config before building the robot.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let overrides = overrides.clone();
        Ok(Self {
            name: overrides
                .name
                .or_else(|| var("HERMES_NAME"))
                .unwrap_or_else(|| "Hermes".to_string()),
            nickname: overrides.nickname.or_else(|| var("HERMES_NICKNAME")),
            template: overrides
                .template
                .or_else(|| var("HERMES_TEMPLATE"))
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            plugin_dir: overrides
                .plugin_dir
                .or_else(|| var("HERMES_PLUGIN_DIR").map(PathBuf::from)),
            user: overrides
                .user
                .or_else(|| var("HERMES_USER"))
                .unwrap_or_else(|| "user".to_string()),
            room: overrides
                .room
                .or_else(|| var("HERMES_ROOM"))
                .unwrap_or_else(|| "shell".to_string()),
            brain_path: var("HERMES_BRAIN_PATH").map(PathBuf::from),
            log_file: var("LOG_FILE"),
        })
    }

    /// Validate config. Call after load() to fail fast before the robot is built.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("HERMES_NAME must not be empty");
        }
        if let Some(ref nickname) = self.nickname {
            if nickname.chars().any(char::is_whitespace) {
                anyhow::bail!("HERMES_NICKNAME must be a single word: {:?}", nickname);
            }
        }
        if !self.template.contains("%s") {
            anyhow::bail!(
                "HERMES_TEMPLATE must contain %s for the nickname: {:?}",
                self.template
            );
        }
        if let Some(ref dir) = self.plugin_dir {
            if !dir.is_dir() {
                anyhow::bail!(
                    "HERMES_PLUGIN_DIR is set but not a directory: {}",
                    dir.display()
                );
            }
        }
        Ok(())
    }

    /// Context attached to every line typed in the shell.
    pub fn context(&self) -> Context {
        Context::new().with_user(&self.user).with_room(&self.room)
    }

    pub fn plugin_dir(&self) -> Option<&Path> {
        self.plugin_dir.as_deref()
    }

    pub fn brain_path(&self) -> Option<&Path> {
        self.brain_path.as_deref()
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }
}
