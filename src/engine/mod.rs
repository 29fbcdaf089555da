//! Engine — the animation state machine.
//!
//! Owns the single shared transform and the frame counter. One call to
//! `advance` per timer tick: dispatch the current step, compose its
//! primitive into the running transform, log one line, and wrap back to
//! identity at the end of the cycle. The engine never deals with pixels,
//! panels, or the terminal.

pub mod steps;

use crate::affine::Affine;
use crate::types::StatusLog;

pub use steps::{Sequence, StepOp};

pub struct Engine {
    transform: Affine,
    frame_index: usize,
    sequence: Sequence,
}

impl Engine {
    pub fn new(sequence: Sequence) -> Self {
        Self {
            transform: Affine::IDENTITY,
            frame_index: 0,
            sequence,
        }
    }

    /// Read-only snapshot of the current composed transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    pub fn cycle_length(&self) -> usize {
        self.sequence.cycle_length()
    }

    /// Perform one animation step.
    ///
    /// Dispatches on the frame counter, right-multiplies the step's
    /// primitive into the running transform (the reset step is log-only),
    /// and pushes exactly one line to `log`. Afterwards the counter
    /// advances; past the cycle end both counter and transform are
    /// reassigned to their initial values.
    pub fn advance(&mut self, log: &mut StatusLog) {
        match self.sequence.steps().get(self.frame_index) {
            Some(step) => {
                log.push(step.describe());
                if let Some(primitive) = step.primitive() {
                    self.transform = self.transform * primitive;
                }
            }
            // Unreachable while the increment/reset arithmetic below holds;
            // surfaced in the log rather than swallowed or panicking.
            None => log.push(format!(
                "Error: invalid frame index {} (expected 0..={})",
                self.frame_index,
                self.cycle_length(),
            )),
        }

        self.frame_index += 1;
        if self.frame_index > self.cycle_length() {
            self.frame_index = 0;
            self.transform = Affine::IDENTITY;
        }
    }
}
