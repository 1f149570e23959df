//! Progressive playback of a simulation.
//!
//! The driver only paces and observes: it calls [`Simulation::step`] in a
//! loop, hands each executed pose to a frame callback and sleeps between
//! frames. The outcome is the same as an unpaced [`Simulation::run`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::info;

use crate::pose::Pose;
use crate::sim::{Outcome, Simulation, Step};

/// Frame pacing and cancellation for an animated run.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    delay: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl Playback {
    pub fn new(delay: Duration) -> Self {
        Self { delay, cancel: None }
    }

    /// No pause between frames.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Abandon playback between frames once `flag` becomes true.
    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Drive `sim` to completion, calling `on_frame` after every executed
    /// instruction.
    ///
    /// Returns `None` if playback was cancelled before the run finished.
    pub fn play(&self, mut sim: Simulation<'_>, mut on_frame: impl FnMut(&Pose)) -> Option<Outcome> {
        let mut frames = 0usize;
        loop {
            if self.is_cancelled() {
                info!(
                    "playback abandoned after {frames} frames with {} instructions left",
                    sim.remaining()
                );
                return None;
            }
            match sim.step() {
                Step::Executed(pose) => {
                    frames += 1;
                    on_frame(&pose);
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                },
                Step::Finished(_) => break,
            }
        }
        sim.into_outcome()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
