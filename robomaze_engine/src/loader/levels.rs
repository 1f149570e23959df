//! Level pack loader and conversion helpers.
//!
//! Converts the serialized `LevelPackDef` data model into runtime [`Level`]s.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use robomaze_data::{LevelDef, LevelPackDef, PositionDef};

use crate::level::Level;
use crate::maze::{Maze, MazeError, Position};

/// Load a `LevelPackDef` from a RON file.
pub fn load_level_pack(path: &Path) -> Result<LevelPackDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading level pack from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing level pack RON from '{}'", path.display()))
}

/// Load, validate and build every level in a RON pack.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or validation.
pub fn load_levels(path: &Path) -> Result<Vec<Level>> {
    let pack = load_level_pack(path).context("while loading level pack from file")?;
    let levels = build_levels(&pack).with_context(|| format!("while building levels from '{}'", path.display()))?;
    info!(
        "{} levels loaded from pack \"{}\" ({})",
        levels.len(),
        pack.title,
        path.display()
    );
    Ok(levels)
}

/// Validate a pack and convert it into runtime levels.
///
/// # Errors
/// Returns a single error listing every validation problem found.
pub fn build_levels(pack: &LevelPackDef) -> Result<Vec<Level>> {
    validate_pack_def(pack)?;
    pack.levels
        .iter()
        .map(|def| level_from_def(def).with_context(|| format!("building level {}", def.id)))
        .collect()
}

/// Convert one level definition into a runtime level.
///
/// # Errors
/// Fails on unreadable maps, a missing goal, or a start that is not an open cell.
pub fn level_from_def(def: &LevelDef) -> Result<Level, MazeError> {
    let maze = Maze::from_rows(&def.rows)?;
    let goal = maze.goal().ok_or(MazeError::NoGoal)?;
    let start = position_from_def(def.start);
    maze.require_open("start", start)?;
    Ok(Level {
        id: def.id,
        name: def.name.clone(),
        algorithm: def.algorithm.clone(),
        maze,
        start,
        facing: def.facing.into(),
        goal,
        optimal_steps: def.optimal_steps,
        step_limit: def.step_limit,
    })
}

fn position_from_def(def: PositionDef) -> Position {
    Position::new(def.row, def.col)
}

/// Validate the pack and return a single aggregated error.
fn validate_pack_def(def: &LevelPackDef) -> Result<()> {
    let errors = robomaze_data::validate_pack(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("level pack validation failed:\n{details}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Facing;
    use robomaze_data::FacingDef;
    use std::io::Write;

    const PACK: &str = include_str!("../../tests/fixtures/straight.ron");

    #[test]
    fn loads_pack_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{PACK}").unwrap();
        let levels = load_levels(file.path()).unwrap();
        assert_eq!(levels.len(), 1);
        let level = &levels[0];
        assert_eq!(level.goal, Position::new(1, 4));
        assert_eq!(level.facing, Facing::South);
        assert_eq!(level.step_limit, Some(8));
        assert_eq!(level.optimal_steps, 3);
    }

    #[test]
    fn validation_errors_are_aggregated() {
        let pack = LevelPackDef {
            title: "broken".into(),
            levels: vec![LevelDef {
                id: 1,
                name: "Broken".into(),
                algorithm: String::new(),
                rows: vec!["#..#".into(), "#.x#".into(), "####".into()],
                start: PositionDef { row: 0, col: 0 },
                facing: FacingDef::East,
                optimal_steps: 1,
                step_limit: None,
            }],
        };
        let err = build_levels(&pack).unwrap_err().to_string();
        assert!(err.starts_with("level pack validation failed"));
        assert!(err.contains("unknown tile 'x'"));
        assert!(err.contains("is a wall"));
    }

    #[test]
    fn level_from_def_requires_goal() {
        let def = LevelDef {
            id: 2,
            name: "No goal".into(),
            algorithm: String::new(),
            rows: vec!["###".into(), "#.#".into(), "###".into()],
            start: PositionDef { row: 1, col: 1 },
            facing: FacingDef::North,
            optimal_steps: 1,
            step_limit: None,
        };
        assert_eq!(level_from_def(&def), Err(MazeError::NoGoal));
    }

    #[test]
    fn missing_pack_file_is_an_error() {
        assert!(load_levels(Path::new("nowhere/levels.ron")).is_err());
    }
}
