use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed level data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { id: u32 },
    BadTile { level: u32, row: usize, col: usize, found: char },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { id } => {
                write!(f, "duplicate level id {id}")
            },
            ValidationError::BadTile { level, row, col, found } => {
                write!(f, "level {level}: unknown tile '{found}' at ({row}, {col})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the shape and invariants of a single level.
///
/// ```
/// use robomaze_data::{FacingDef, LevelDef, PositionDef, validate_level};
///
/// let level = LevelDef {
///     id: 1,
///     name: "Tiny".into(),
///     algorithm: String::new(),
///     rows: vec!["####".into(), "#.G#".into(), "####".into()],
///     start: PositionDef { row: 1, col: 1 },
///     facing: FacingDef::East,
///     optimal_steps: 1,
///     step_limit: None,
/// };
/// assert!(validate_level(&level).is_empty());
/// ```
pub fn validate_level(level: &LevelDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let id = level.id;

    if level.rows.is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: format!("level {id} has an empty map"),
        });
        return errors;
    }

    let width = level.width();
    if width == 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("level {id} has an empty first row"),
        });
        return errors;
    }
    for (row, line) in level.rows.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            errors.push(ValidationError::InvalidValue {
                context: format!("level {id} row {row} has width {len}, expected {width}"),
            });
        }
    }
    // Everything below indexes cells, so a ragged map stops here.
    if !errors.is_empty() {
        return errors;
    }

    let height = level.height();
    for (row, line) in level.rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ![WALL_CHAR, EMPTY_CHAR, GOAL_CHAR].contains(&ch) {
                errors.push(ValidationError::BadTile {
                    level: id,
                    row,
                    col,
                    found: ch,
                });
                continue;
            }
            let on_border = row == 0 || col == 0 || row + 1 == height || col + 1 == width;
            if on_border && ch != WALL_CHAR {
                errors.push(ValidationError::InvalidValue {
                    context: format!("level {id} border cell ({row}, {col}) is not a wall"),
                });
            }
        }
    }

    let goals = level.goal_positions();
    if goals.len() != 1 {
        errors.push(ValidationError::InvalidValue {
            context: format!("level {id} has {} goal tiles, expected exactly 1", goals.len()),
        });
    }

    match level.char_at(level.start) {
        None => errors.push(ValidationError::InvalidValue {
            context: format!(
                "level {id} start ({}, {}) is outside the {height}x{width} map",
                level.start.row, level.start.col
            ),
        }),
        Some(WALL_CHAR) => errors.push(ValidationError::InvalidValue {
            context: format!("level {id} start ({}, {}) is a wall", level.start.row, level.start.col),
        }),
        Some(_) => {},
    }

    if level.optimal_steps == 0 && goals.first() != Some(&level.start) {
        errors.push(ValidationError::InvalidValue {
            context: format!("level {id} optimal step count is zero"),
        });
    }

    if level.step_limit == Some(0) {
        errors.push(ValidationError::InvalidValue {
            context: format!("level {id} step limit is zero"),
        });
    }

    errors
}

/// Validate every level in a pack plus pack-wide invariants (unique ids).
pub fn validate_pack(pack: &LevelPackDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    if pack.levels.is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "level pack contains no levels".to_string(),
        });
    }

    for level in &pack.levels {
        if !seen.insert(level.id) {
            errors.push(ValidationError::DuplicateId { id: level.id });
        }
        errors.extend(validate_level(level));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(rows: &[&str]) -> LevelDef {
        LevelDef {
            id: 7,
            name: "Test".into(),
            algorithm: String::new(),
            rows: rows.iter().map(|r| (*r).to_string()).collect(),
            start: PositionDef { row: 1, col: 1 },
            facing: FacingDef::East,
            optimal_steps: 2,
            step_limit: None,
        }
    }

    #[test]
    fn well_formed_level_passes() {
        let lvl = level(&["#####", "#...#", "#..G#", "#####"]);
        assert!(validate_level(&lvl).is_empty());
    }

    #[test]
    fn ragged_rows_are_reported() {
        let lvl = level(&["#####", "#..#", "#..G#", "#####"]);
        let errors = validate_level(&lvl);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ValidationError::InvalidValue { context } if context.contains("row 1")));
    }

    #[test]
    fn unknown_tiles_are_reported() {
        let lvl = level(&["#####", "#.x.#", "#..G#", "#####"]);
        let errors = validate_level(&lvl);
        assert!(errors.contains(&ValidationError::BadTile {
            level: 7,
            row: 1,
            col: 2,
            found: 'x'
        }));
    }

    #[test]
    fn open_border_is_reported() {
        let lvl = level(&["##.##", "#...#", "#..G#", "#####"]);
        let errors = validate_level(&lvl);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidValue { context } if context.contains("border")))
        );
    }

    #[test]
    fn goal_count_must_be_one() {
        let none = level(&["#####", "#...#", "#...#", "#####"]);
        let two = level(&["#####", "#.G.#", "#..G#", "#####"]);
        for lvl in [none, two] {
            assert!(
                validate_level(&lvl)
                    .iter()
                    .any(|err| matches!(err, ValidationError::InvalidValue { context } if context.contains("goal")))
            );
        }
    }

    #[test]
    fn start_on_wall_or_outside_is_reported() {
        let mut lvl = level(&["#####", "#...#", "#..G#", "#####"]);
        lvl.start = PositionDef { row: 0, col: 0 };
        assert!(
            validate_level(&lvl)
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidValue { context } if context.contains("is a wall")))
        );

        lvl.start = PositionDef { row: 9, col: 1 };
        assert!(
            validate_level(&lvl)
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidValue { context } if context.contains("outside")))
        );
    }

    #[test]
    fn duplicate_level_ids_are_reported() {
        let lvl = level(&["#####", "#...#", "#..G#", "#####"]);
        let pack = LevelPackDef {
            title: "dupes".into(),
            levels: vec![lvl.clone(), lvl],
        };
        let errors = validate_pack(&pack);
        assert_eq!(errors, vec![ValidationError::DuplicateId { id: 7 }]);
        assert_eq!(errors[0].to_string(), "duplicate level id 7");
    }

    #[test]
    fn pack_parses_from_ron() {
        let text = include_str!("../tests/fixtures/mini.ron");
        let pack: LevelPackDef = ron::from_str(text).expect("pack parses");
        assert_eq!(pack.levels[0].facing, FacingDef::East);
        assert_eq!(pack.levels[0].step_limit, None);
        assert!(validate_pack(&pack).is_empty());
    }
}
