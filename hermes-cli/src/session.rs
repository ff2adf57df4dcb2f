//! A shell session: the robot built from config, its plugins, its brain and the identity
//! lines are typed as.

use anyhow::{Context as _, Result};
use hermes_core::{Context, Event, Outgoing, OutgoingKind};
use hermes_robot::Robot;
use hermes_script::PluginEditor;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::HermesConfig;

pub struct Session {
    config: HermesConfig,
    robot: Robot,
    user: String,
    room: String,
    outgoing: mpsc::UnboundedSender<Outgoing>,
}

impl Session {
    /// Builds the robot and loads the brain. Everything the robot says, including later
    /// timer output, arrives on the returned receiver.
    pub fn start(config: HermesConfig) -> Result<(Self, mpsc::UnboundedReceiver<Outgoing>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let robot = build_robot(&config, &tx)?;

        if let Some(path) = config.brain_path() {
            let loaded = robot
                .brain()
                .load(path)
                .with_context(|| format!("Failed to load brain from {}", path.display()))?;
            info!(path = %path.display(), loaded = loaded, "step: brain loaded");
        }

        let session = Self {
            user: config.user.clone(),
            room: config.room.clone(),
            config,
            robot,
            outgoing: tx,
        };
        Ok((session, rx))
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn config(&self) -> &HermesConfig {
        &self.config
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn set_user(&mut self, user: &str) {
        self.user = user.to_string();
    }

    pub fn set_room(&mut self, room: &str) {
        self.room = room.to_string();
    }

    /// Context for the next typed line.
    pub fn context(&self) -> Context {
        Context::new().with_user(&self.user).with_room(&self.room)
    }

    /// Hands a typed line to the robot as the current user and room.
    pub fn hear(&self, text: &str) -> Result<()> {
        self.robot.hear(text, &self.context())?;
        Ok(())
    }

    /// Rebuilds the robot so edited plugin scripts take effect. Brain contents carry over;
    /// pending timers of the old robot still deliver here.
    pub fn reload(&mut self) -> Result<Vec<String>> {
        let robot = build_robot(&self.config, &self.outgoing)?;
        robot.brain().restore(self.robot.brain().snapshot());
        self.robot = robot;
        let plugins = self.robot.plugins();
        info!(plugins = plugins.len(), "step: robot reloaded");
        Ok(plugins)
    }

    /// Writes the brain to `HERMES_BRAIN_PATH`, if set.
    pub fn save_brain(&self) -> Result<()> {
        if let Some(path) = self.config.brain_path() {
            self.robot
                .brain()
                .save(path)
                .with_context(|| format!("Failed to save brain to {}", path.display()))?;
            info!(path = %path.display(), "step: brain saved");
        }
        Ok(())
    }
}

fn build_robot(config: &HermesConfig, outgoing: &mpsc::UnboundedSender<Outgoing>) -> Result<Robot> {
    let robot = Robot::with_identity(&config.name, config.nickname.as_deref(), &config.template)?;

    for kind in OutgoingKind::ALL {
        let tx = outgoing.clone();
        robot.subscribe(kind.as_str(), move |event: &Event| {
            if let Event::Outgoing(out) = event {
                if tx.send(out.clone()).is_err() {
                    warn!(kind = %out.kind, "shell closed, message dropped");
                }
            }
        });
    }

    hermes_plugins::install_builtins(&robot)?;
    hermes_plugins::install_demos(&robot)?;

    if let Some(dir) = config.plugin_dir() {
        let editor = PluginEditor::load_dir(dir)
            .with_context(|| format!("Failed to read plugins from {}", dir.display()))?;
        let installed = editor.install(&robot)?;
        info!(dir = %dir.display(), plugins = ?installed, "step: script plugins installed");
    }

    info!(
        name = %robot.name(),
        mention = %robot.mention(),
        plugins = robot.plugins().len(),
        "step: robot ready"
    );
    Ok(robot)
}
