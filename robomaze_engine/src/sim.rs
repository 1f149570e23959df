//! Trajectory simulation.
//!
//! A [`Simulation`] is a small state machine over one instruction sequence:
//! each call to [`Simulation::step`] executes at most one instruction against
//! the maze and reports either the new pose or the terminal status. Callers
//! that only want the result use [`run`]; progressive playback drives
//! `step` itself (see [`crate::playback`]).

use log::{debug, info};
use robomaze_script::Instruction;
use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::maze::{Maze, MazeError, Position};
use crate::pose::Pose;

/// Step limit used when neither the level nor the config sets one.
pub const DEFAULT_STEP_LIMIT: u32 = 100;

pub const MSG_GOAL_REACHED: &str = "Goal reached!";
pub const MSG_STEP_LIMIT: &str = "Maximum steps exceeded!";
pub const MSG_HIT_BOUNDARY: &str = "Error: Hit boundary!";
pub const MSG_HIT_WALL: &str = "Error: Hit wall!";
pub const MSG_EXHAUSTED: &str = "Code completed but goal not reached";

/// What stopped a forward move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockReason {
    Boundary,
    Wall,
}

/// Terminal status of a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    GoalReached,
    Blocked(BlockReason),
    StepLimitExceeded,
    ExhaustedWithoutGoal,
}

impl RunStatus {
    /// The log line recorded when the run ends with this status.
    pub fn message(self) -> &'static str {
        match self {
            RunStatus::GoalReached => MSG_GOAL_REACHED,
            RunStatus::Blocked(BlockReason::Boundary) => MSG_HIT_BOUNDARY,
            RunStatus::Blocked(BlockReason::Wall) => MSG_HIT_WALL,
            RunStatus::StepLimitExceeded => MSG_STEP_LIMIT,
            RunStatus::ExhaustedWithoutGoal => MSG_EXHAUSTED,
        }
    }

    /// Short machine-friendly tag.
    pub fn tag(self) -> &'static str {
        match self {
            RunStatus::GoalReached => "goal-reached",
            RunStatus::Blocked(_) => "blocked",
            RunStatus::StepLimitExceeded => "step-limit-exceeded",
            RunStatus::ExhaustedWithoutGoal => "exhausted-without-goal",
        }
    }
}

/// Result of one complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: RunStatus,
    pub total_steps: u32,
    pub final_pose: Pose,
    pub log: Vec<String>,
}

impl Outcome {
    pub fn success(&self) -> bool {
        self.status.is_goal_reached()
    }
}

/// Result of a single [`Simulation::step`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran; carries the pose after it.
    Executed(Pose),
    /// The run is over (possibly just now, without executing anything).
    Finished(RunStatus),
}

/// In-progress run over borrowed, read-only inputs.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    maze: &'a Maze,
    instructions: &'a [Instruction],
    goal: Position,
    step_limit: u32,
    cursor: usize,
    pose: Pose,
    log: Vec<String>,
    status: Option<RunStatus>,
}

impl<'a> Simulation<'a> {
    /// Set up a run starting from `start`.
    ///
    /// # Errors
    /// Fails fast when the start or goal does not name an open cell of `maze`.
    pub fn new(
        instructions: &'a [Instruction],
        maze: &'a Maze,
        start: Pose,
        goal: Position,
        step_limit: u32,
    ) -> Result<Self, MazeError> {
        maze.require_open("start", start.position())?;
        maze.require_open("goal", goal)?;
        Ok(Self {
            maze,
            instructions,
            goal,
            step_limit,
            cursor: 0,
            pose: start,
            log: Vec::new(),
            status: None,
        })
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn status(&self) -> Option<RunStatus> {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some()
    }

    /// Instructions not yet executed.
    pub fn remaining(&self) -> usize {
        if self.is_finished() {
            0
        } else {
            self.instructions.len() - self.cursor
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Advance by one instruction.
    pub fn step(&mut self) -> Step {
        if let Some(status) = self.status {
            return Step::Finished(status);
        }

        let Some(&instruction) = self.instructions.get(self.cursor) else {
            let status = if self.at_goal() {
                RunStatus::GoalReached
            } else {
                RunStatus::ExhaustedWithoutGoal
            };
            return Step::Finished(self.finish(status));
        };

        if self.pose.total_steps >= self.step_limit {
            return Step::Finished(self.finish(RunStatus::StepLimitExceeded));
        }

        match self.apply(instruction) {
            Ok(message) => {
                debug!("#{} {instruction}: {message}", self.cursor);
                self.cursor += 1;
                self.log.push(message);
            },
            Err(reason) => {
                return Step::Finished(self.finish(RunStatus::Blocked(reason)));
            },
        }

        // Checked after turns too; a turn cannot move onto the goal, but the
        // start cell may already be the goal.
        if self.at_goal() {
            self.finish(RunStatus::GoalReached);
        }
        Step::Executed(self.pose)
    }

    /// Run to completion without observation.
    pub fn run(self) -> Outcome {
        self.run_observed(|_| {})
    }

    /// Run to completion, calling `observer` with the pose after every
    /// executed instruction.
    pub fn run_observed(mut self, mut observer: impl FnMut(&Pose)) -> Outcome {
        let status = loop {
            match self.step() {
                Step::Executed(pose) => observer(&pose),
                Step::Finished(status) => break status,
            }
        };
        self.outcome_with(status)
    }

    /// Consume the simulation; `None` if it has not reached a terminal status.
    pub fn into_outcome(self) -> Option<Outcome> {
        let status = self.status?;
        Some(self.outcome_with(status))
    }

    fn outcome_with(self, status: RunStatus) -> Outcome {
        Outcome {
            status,
            total_steps: self.pose.total_steps,
            final_pose: self.pose,
            log: self.log,
        }
    }

    fn at_goal(&self) -> bool {
        self.pose.position() == self.goal
    }

    fn apply(&mut self, instruction: Instruction) -> Result<String, BlockReason> {
        match instruction {
            Instruction::MoveForward => {
                let target = self
                    .pose
                    .position()
                    .ahead(self.pose.facing)
                    .ok_or(BlockReason::Boundary)?;
                match self.maze.tile(target) {
                    None => return Err(BlockReason::Boundary),
                    Some(tile) if !tile.is_passable() => return Err(BlockReason::Wall),
                    Some(_) => {},
                }
                self.pose.row = target.row;
                self.pose.col = target.col;
                self.pose.total_steps += 1;
                Ok(format!("Moved forward to {target}"))
            },
            Instruction::TurnLeft => {
                self.pose.facing = self.pose.facing.turned_left();
                Ok(format!("Turned left, now facing {}", self.pose.facing))
            },
            Instruction::TurnRight => {
                self.pose.facing = self.pose.facing.turned_right();
                Ok(format!("Turned right, now facing {}", self.pose.facing))
            },
        }
    }

    fn finish(&mut self, status: RunStatus) -> RunStatus {
        info!(
            "run finished: {} after {} steps at {}",
            status.tag(),
            self.pose.total_steps,
            self.pose.position()
        );
        self.log.push(status.message().to_string());
        self.status = Some(status);
        status
    }
}

/// Simulate `instructions` from `start` and return the outcome.
///
/// # Errors
/// Only for malformed maze data (start or goal outside the grid or on a wall).
pub fn run(
    instructions: &[Instruction],
    maze: &Maze,
    start: Pose,
    goal: Position,
    step_limit: u32,
) -> Result<Outcome, MazeError> {
    Ok(Simulation::new(instructions, maze, start, goal, step_limit)?.run())
}

/// Like [`run`], with an observer called once per executed instruction.
///
/// # Errors
/// Only for malformed maze data.
pub fn run_observed(
    instructions: &[Instruction],
    maze: &Maze,
    start: Pose,
    goal: Position,
    step_limit: u32,
    observer: impl FnMut(&Pose),
) -> Result<Outcome, MazeError> {
    Ok(Simulation::new(instructions, maze, start, goal, step_limit)?.run_observed(observer))
}
