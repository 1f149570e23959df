//! Efficiency rating definitions and loader.
//!
//! A successful run is rated by how its step count compares to the level's
//! optimal step count. Each rank allows up to `max_percent` of the optimal
//! count; the first rank that admits the run wins. The last rank usually has
//! no limit. Runs that never reach the goal get the separate `failed` rating.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single efficiency rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EfficiencyRank {
    /// Highest allowed steps as a percentage of optimal; `None` admits any run.
    #[serde(default)]
    pub max_percent: Option<u32>,
    /// Display name of the rank
    pub name: String,
    /// One-sentence evaluation shown next to the rank
    pub description: String,
}

/// Rating text for runs that did not reach the goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRating {
    pub name: String,
    pub description: String,
}

impl Default for FailedRating {
    fn default() -> Self {
        Self {
            name: "Failed".to_string(),
            description: "The robot never reached the goal.".to_string(),
        }
    }
}

/// Wrapper for the TOML file containing the ranks.
#[derive(Debug, Deserialize)]
struct ScoringFile {
    #[serde(default)]
    failed: FailedRating,
    ranks: Vec<EfficiencyRank>,
}

/// Complete rating configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub failed: FailedRating,
    /// Sorted list of ranks (tightest limit first, unlimited last)
    pub ranks: Vec<EfficiencyRank>,
}

impl ScoringConfig {
    /// Returns `(name, description)` of the rating for a finished run.
    ///
    /// # Parameters
    /// * `success` - whether the run reached the goal
    /// * `steps` - steps taken by the run
    /// * `optimal` - the level's reference step count
    pub fn rate(&self, success: bool, steps: u32, optimal: u32) -> (&str, &str) {
        if !success {
            return (&self.failed.name, &self.failed.description);
        }
        let steps = u64::from(steps) * 100;
        for rank in &self.ranks {
            match rank.max_percent {
                None => return (&rank.name, &rank.description),
                Some(pct) if steps <= u64::from(optimal) * u64::from(pct) => {
                    return (&rank.name, &rank.description);
                },
                Some(_) => {},
            }
        }

        if let Some(last_rank) = self.ranks.last() {
            (&last_rank.name, &last_rank.description)
        } else {
            ("Unknown Rating", "No scoring data available.")
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            failed: FailedRating::default(),
            ranks: default_ranks(),
        }
    }
}

/// Efficiency as a whole percentage: 100 at or under optimal, otherwise
/// `optimal / steps` rounded to the nearest percent.
pub fn efficiency_percent(steps: u32, optimal: u32) -> u32 {
    if steps <= optimal {
        return 100;
    }
    let steps = u64::from(steps);
    let scaled = (u64::from(optimal) * 100 + steps / 2) / steps;
    u32::try_from(scaled).unwrap_or(100)
}

/// Returns hardcoded default ranks, used if `scoring.toml` cannot be loaded.
fn default_ranks() -> Vec<EfficiencyRank> {
    vec![
        EfficiencyRank {
            max_percent: Some(100),
            name: "Optimal".to_string(),
            description: "You matched the shortest known route.".to_string(),
        },
        EfficiencyRank {
            max_percent: Some(120),
            name: "Good".to_string(),
            description: "Close to optimal. A few steps could still be trimmed.".to_string(),
        },
        EfficiencyRank {
            max_percent: None,
            name: "Poor".to_string(),
            description: "You made it, but the route wanders.".to_string(),
        },
    ]
}

/// Loads rating configuration from a TOML file, falling back to defaults on error.
///
/// # Parameters
/// * `toml_path` - Path to the `scoring.toml` file
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if file cannot be read or parsed (with fallback to defaults)
pub fn load_scoring(toml_path: &Path) -> ScoringConfig {
    match try_load_scoring(toml_path) {
        Ok(config) => {
            info!(
                "{} efficiency ranks loaded from '{}'",
                config.ranks.len(),
                toml_path.display()
            );
            config
        },
        Err(e) => {
            warn!(
                "Could not load scoring data from '{}': {}. Using hardcoded defaults.",
                toml_path.display(),
                e
            );
            ScoringConfig::default()
        },
    }
}

/// Attempts to load rating configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
fn try_load_scoring(toml_path: &Path) -> Result<ScoringConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading scoring data from '{}'", toml_path.display()))?;
    parse_scoring(&text).with_context(|| format!("parsing scoring data from '{}'", toml_path.display()))
}

fn parse_scoring(text: &str) -> Result<ScoringConfig> {
    let wrapper: ScoringFile = toml::from_str(text)?;
    let mut ranks = wrapper.ranks;

    // Tightest limit first; unlimited ranks sort last.
    ranks.sort_by_key(|rank| rank.max_percent.unwrap_or(u32::MAX));

    Ok(ScoringConfig {
        failed: wrapper.failed,
        ranks,
    })
}
