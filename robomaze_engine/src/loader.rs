//! Loader utilities for assembling the game data a session needs.
//!
//! Levels come from a RON level pack when one is given (or present in the
//! data directory) and otherwise from the built-in set. Engine settings and
//! efficiency ranks are TOML-backed and fall back to defaults.

pub mod config;
pub mod levels;
pub mod scoring;

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use crate::data_paths::data_path;
use crate::level::{Level, builtin_levels};
use crate::loader::config::{EngineConfig, load_config};
use crate::loader::levels::load_levels;
use crate::loader::scoring::{ScoringConfig, load_scoring};

/// Everything loaded at startup.
#[derive(Debug, Clone)]
pub struct GameData {
    pub config: EngineConfig,
    pub scoring: ScoringConfig,
    pub levels: Vec<Level>,
}

/// Load settings, ranks and levels.
///
/// `levels_file` overrides the data directory's `levels.ron`.
///
/// # Errors
/// Errors bubble up from level pack IO, deserialization, or validation.
pub fn load_game(levels_file: Option<&Path>) -> Result<GameData> {
    let config = load_config(&data_path("config.toml"));
    let scoring = load_scoring(&data_path("scoring.toml"));

    let default_pack = data_path("levels.ron");
    let levels = match levels_file {
        Some(path) => load_levels(path).context("while loading requested level pack")?,
        None if default_pack.is_file() => load_levels(&default_pack).context("while loading data level pack")?,
        None => {
            info!("using built-in levels");
            builtin_levels()
        },
    };
    if levels.is_empty() {
        bail!("no levels available");
    }
    info!("{} levels ready", levels.len());

    Ok(GameData {
        config,
        scoring,
        levels,
    })
}
