//! Engine runtime settings.
//!
//! Read from `config.toml` in the data directory. Every field is optional;
//! anything missing takes its default, and a missing or unreadable file
//! means all defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::sim::DEFAULT_STEP_LIMIT;

/// Runtime settings for simulation and playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Step limit for levels that do not set their own.
    pub step_limit: u32,
    /// Pause between animation frames, in milliseconds.
    pub playback_delay_ms: u64,
    /// Animate runs in the terminal.
    pub animate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            playback_delay_ms: 150,
            animate: true,
        }
    }
}

impl EngineConfig {
    /// Delay between frames, or zero when animation is off.
    pub fn playback_delay(&self) -> Duration {
        if self.animate {
            Duration::from_millis(self.playback_delay_ms)
        } else {
            Duration::ZERO
        }
    }
}

/// Load settings from `toml_path`, falling back to defaults on any problem.
pub fn load_config(toml_path: &Path) -> EngineConfig {
    if !toml_path.exists() {
        info!("no config at '{}', using defaults", toml_path.display());
        return EngineConfig::default();
    }
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("engine config loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!("{e:#}. Using default engine config.");
            EngineConfig::default()
        },
    }
}

fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine config from '{}'", toml_path.display()))?;
    let config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("parsing engine config from '{}'", toml_path.display()))?;
    if config.step_limit == 0 {
        warn!("step_limit = 0 in '{}' stops every run before it starts", toml_path.display());
    }
    Ok(config)
}
