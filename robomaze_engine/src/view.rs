//! View module.
//! Text rendering of the maze, the robot and run results for the terminal.
//! Nothing here feeds back into simulation; it only reads levels and outcomes.

use std::fmt::Write;

use robomaze_script::SkippedLine;
use serde::Serialize;

use crate::level::Level;
use crate::loader::scoring::{ScoringConfig, efficiency_percent};
use crate::maze::{Maze, Position, Tile};
use crate::pose::Pose;
use crate::sim::Outcome;
use crate::style::GameStyle;

/// How many trailing log lines the run report shows.
const LOG_TAIL: usize = 6;

/// Unstyled map rows: `#` wall, `.` floor, `G` goal, an arrow for the robot.
pub fn grid_lines(maze: &Maze, robot: Option<&Pose>) -> Vec<String> {
    maze.tile_rows()
        .enumerate()
        .map(|(row, tiles)| {
            tiles
                .iter()
                .enumerate()
                .map(|(col, tile)| glyph(*tile, Position::new(row, col), robot))
                .collect()
        })
        .collect()
}

fn glyph(tile: Tile, pos: Position, robot: Option<&Pose>) -> char {
    match robot {
        Some(pose) if pose.position() == pos => pose.facing.arrow(),
        _ => tile.as_char(),
    }
}

/// Colored map, one space between cells so the grid reads roughly square.
pub fn render_maze(maze: &Maze, robot: Option<&Pose>) -> String {
    let mut out = String::new();
    for line in grid_lines(maze, robot) {
        let cells: Vec<String> = line.chars().map(styled_glyph).collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

fn styled_glyph(ch: char) -> String {
    let text = ch.to_string();
    match Tile::from_char(ch) {
        Some(Tile::Wall) => text.wall_style(),
        Some(Tile::Empty) => text.floor_style(),
        Some(Tile::Goal) => text.goal_style(),
        None => text.robot_style(),
    }
    .to_string()
}

/// One-line level banner.
pub fn level_banner(level: &Level) -> String {
    let mut banner = format!("Level {}: {}", level.id, level.name);
    if !level.algorithm.is_empty() {
        let _ = write!(banner, " [{}]", level.algorithm);
    }
    banner
}

/// Rated summary of one finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub level: u32,
    pub status: String,
    pub steps: u32,
    pub optimal_steps: u32,
    pub efficiency: u32,
    pub rating: String,
    pub rating_description: String,
    pub outcome: Outcome,
}

impl RunReport {
    pub fn new(level: &Level, outcome: &Outcome, scoring: &ScoringConfig) -> Self {
        let (rating, description) = scoring.rate(outcome.success(), outcome.total_steps, level.optimal_steps);
        let efficiency = if outcome.success() {
            efficiency_percent(outcome.total_steps, level.optimal_steps)
        } else {
            0
        };
        Self {
            level: level.id,
            status: outcome.status.tag().to_string(),
            steps: outcome.total_steps,
            optimal_steps: level.optimal_steps,
            efficiency,
            rating: rating.to_string(),
            rating_description: description.to_string(),
            outcome: outcome.clone(),
        }
    }

    /// Styled multi-line report for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let status = if self.outcome.success() {
            self.status.success_style()
        } else {
            self.status.failure_style()
        };
        let _ = writeln!(out, "Status:        {status}");
        let _ = writeln!(out, "Steps taken:   {}", self.steps.to_string().stat_style());
        let _ = writeln!(out, "Optimal steps: {}", self.optimal_steps.to_string().stat_style());
        let _ = writeln!(
            out,
            "Efficiency:    {}% ({}) {}",
            self.efficiency,
            self.rating.title_style(),
            self.rating_description
        );
        let skipped = self.outcome.log.len().saturating_sub(LOG_TAIL);
        if skipped > 0 {
            let _ = writeln!(out, "  ... {skipped} earlier log lines");
        }
        for line in &self.outcome.log[skipped..] {
            let _ = writeln!(out, "  {}", line.log_style());
        }
        out
    }
}

/// Warning lines for program lines the parser dropped.
pub fn skipped_warnings(skipped: &[SkippedLine]) -> Vec<String> {
    skipped
        .iter()
        .map(|s| format!("line {} ignored ({}): {}", s.line, s.reason, s.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::builtin_levels;
    use crate::pose::Facing;

    #[test]
    fn grid_shows_robot_arrow_over_tile() {
        let level = &builtin_levels()[0];
        let pose = Pose::new(Position::new(1, 1), Facing::South);
        let lines = grid_lines(&level.maze, Some(&pose));
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "#".repeat(15));
        assert!(lines[1].starts_with("#↓"));
        assert!(lines[13].ends_with("G#"));
    }

    #[test]
    fn grid_without_robot_is_plain_map() {
        let maze = Maze::from_rows(&["####", "#.G#", "####"]).unwrap();
        assert_eq!(grid_lines(&maze, None), vec!["####", "#.G#", "####"]);
    }

    #[test]
    fn report_rates_successful_run() {
        let level = &builtin_levels()[0];
        let program = robomaze_script::parse("forward(12)\nright()\nforward(12)");
        let outcome = level.run(&program, 100).unwrap();
        let report = RunReport::new(level, &outcome, &ScoringConfig::default());
        assert_eq!(report.status, "goal-reached");
        assert_eq!(report.steps, 24);
        assert_eq!(report.efficiency, 100);
        assert_eq!(report.rating, "Optimal");
    }

    #[test]
    fn report_for_failed_run_has_zero_efficiency() {
        let level = &builtin_levels()[0];
        let program = robomaze_script::parse("forward(4)\nright()\nforward(3)");
        let outcome = level.run(&program, 100).unwrap();
        let report = RunReport::new(level, &outcome, &ScoringConfig::default());
        assert_eq!(report.status, "blocked");
        assert_eq!(report.efficiency, 0);
        assert_eq!(report.rating, "Failed");
    }

    #[test]
    fn rendered_report_tails_long_logs() {
        colored::control::set_override(false);
        let level = &builtin_levels()[1];
        let program = robomaze_script::parse("forward(12)\nright()\nforward(12)");
        let outcome = level.run(&program, 100).unwrap();
        let text = RunReport::new(level, &outcome, &ScoringConfig::default()).render();
        assert!(text.contains("Status:        goal-reached"));
        assert!(text.contains("earlier log lines"));
        assert!(text.trim_end().ends_with("Goal reached!"));
    }

    #[test]
    fn rendered_maze_matches_grid() {
        colored::control::set_override(false);
        let maze = Maze::from_rows(&["####", "#.G#", "####"]).unwrap();
        let pose = Pose::new(Position::new(1, 1), Facing::West);
        assert_eq!(render_maze(&maze, Some(&pose)), "# # # #\n# ← G #\n# # # #\n");
    }

    #[test]
    fn banner_includes_algorithm() {
        let level = &builtin_levels()[2];
        assert_eq!(level_banner(level), "Level 3: A* Search [A*]");
    }
}
