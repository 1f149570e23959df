//! Session state shared by the REPL and one-shot runs.
//!
//! A session owns the loaded game data, the selected level and the current
//! program text. It holds no robot state: every run starts from a fresh pose
//! built by the level.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use log::info;
use robomaze_script::{Program, parse_program};

use crate::level::Level;
use crate::loader::GameData;
use crate::loader::config::EngineConfig;
use crate::loader::scoring::ScoringConfig;
use crate::playback::Playback;
use crate::pose::Pose;
use crate::view::RunReport;

#[derive(Debug, Clone)]
pub struct Session {
    data: GameData,
    current: usize,
    source: String,
}

impl Session {
    /// Start on the first loaded level with an empty program.
    ///
    /// # Errors
    /// Fails if `data` holds no levels.
    pub fn new(data: GameData) -> Result<Self> {
        if data.levels.is_empty() {
            bail!("a session needs at least one level");
        }
        Ok(Self {
            data,
            current: 0,
            source: String::new(),
        })
    }

    pub fn levels(&self) -> &[Level] {
        &self.data.levels
    }

    pub fn level(&self) -> &Level {
        &self.data.levels[self.current]
    }

    pub fn config(&self) -> &EngineConfig {
        &self.data.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.data.config
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.data.scoring
    }

    /// Switch to the level with the given id.
    ///
    /// # Errors
    /// Fails if no loaded level has that id.
    pub fn select_level(&mut self, id: u32) -> Result<&Level> {
        let idx = self
            .data
            .levels
            .iter()
            .position(|level| level.id == id)
            .ok_or_else(|| anyhow!("no level with id {id}"))?;
        self.current = idx;
        info!("selected level {id} ({})", self.data.levels[idx].name);
        Ok(&self.data.levels[idx])
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Replace the program text with the contents of `path`.
    ///
    /// # Errors
    /// Fails if the file cannot be read.
    pub fn load_source(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).with_context(|| format!("reading program from '{}'", path.display()))?;
        info!("program loaded from '{}' ({} lines)", path.display(), text.lines().count());
        self.source = text;
        Ok(())
    }

    /// Parse the current program text.
    pub fn program(&self) -> Program {
        parse_program(&self.source)
    }

    /// Simulate `program` on the current level and rate the result.
    ///
    /// Returns `Ok(None)` when playback was cancelled.
    ///
    /// # Errors
    /// Only for malformed level data.
    pub fn run(
        &self,
        program: &Program,
        playback: &Playback,
        on_frame: impl FnMut(&Pose),
    ) -> Result<Option<RunReport>> {
        let level = self.level();
        let sim = level
            .simulation(&program.instructions, self.data.config.step_limit)
            .with_context(|| format!("level {} has malformed maze data", level.id))?;
        let report = playback
            .play(sim, on_frame)
            .map(|outcome| RunReport::new(level, &outcome, &self.data.scoring));
        if let Some(report) = &report {
            info!(
                "level {}: {} in {} steps (optimal {}), rated {}",
                level.id, report.status, report.steps, report.optimal_steps, report.rating
            );
        }
        Ok(report)
    }
}
