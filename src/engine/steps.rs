//! Step tables — the closed set of per-frame animation operations.
//!
//! Two statically selected sequences share one engine: the production table
//! runs the combined operations, the diagnostic table splits translate and
//! scale into per-axis steps so each primitive can be watched in isolation.

use crate::affine::Affine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOp {
    Translate { dx: f64, dy: f64 },
    /// Positive degrees rotate counterclockwise (y-up semantics).
    Rotate { degrees: f64 },
    Scale { sx: f64, sy: f64 },
    /// Log-only step; the engine reassigns identity when the counter wraps.
    Reset,
}

impl StepOp {
    /// The primitive transform this step composes into the running
    /// transform, if any. `Reset` performs no geometric change.
    pub fn primitive(&self) -> Option<Affine> {
        match *self {
            StepOp::Translate { dx, dy } => Some(Affine::translation(dx, dy)),
            StepOp::Rotate { degrees } => Some(Affine::rotation(degrees.to_radians())),
            StepOp::Scale { sx, sy } => Some(Affine::scale(sx, sy)),
            StepOp::Reset => None,
        }
    }

    /// One-line plain-language description for the status log.
    pub fn describe(&self) -> String {
        match *self {
            StepOp::Translate { dx, dy } if dy == 0.0 => {
                format!("Translate images {} along the x-axis", fmt_signed(dx))
            }
            StepOp::Translate { dx, dy } if dx == 0.0 => {
                format!("Translate images {} along the y-axis", fmt_signed(dy))
            }
            StepOp::Translate { dx, dy } => format!(
                "Translate images {} along the x-axis and {} along the y-axis",
                fmt_signed(dx),
                fmt_signed(dy),
            ),
            StepOp::Rotate { degrees } if degrees >= 0.0 => {
                format!("Rotate images {} degrees counterclockwise", fmt_plain(degrees))
            }
            StepOp::Rotate { degrees } => {
                format!("Rotate images {} degrees clockwise", fmt_plain(-degrees))
            }
            StepOp::Scale { sx, sy } if sy == 1.0 => {
                format!("Scale images {} times along the x-axis", fmt_plain(sx))
            }
            StepOp::Scale { sx, sy } if sx == 1.0 => {
                format!("Scale images {} times along the y-axis", fmt_plain(sy))
            }
            StepOp::Scale { sx, sy } => format!(
                "Scale images {} times along the x-axis and {} times along the y-axis",
                fmt_plain(sx),
                fmt_plain(sy),
            ),
            StepOp::Reset => "Reset images to original positions".to_string(),
        }
    }
}

/// Format with an explicit sign and no trailing `.0` on whole values.
fn fmt_signed(v: f64) -> String {
    if v == v.trunc() {
        format!("{:+}", v as i64)
    } else {
        format!("{v:+}")
    }
}

/// Format without a sign and no trailing `.0` on whole values.
fn fmt_plain(v: f64) -> String {
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// The two sequences
// ---------------------------------------------------------------------------

pub const PRODUCTION_STEPS: &[StepOp] = &[
    StepOp::Translate { dx: -5.0, dy: 7.0 },
    StepOp::Rotate { degrees: 45.0 },
    StepOp::Rotate { degrees: -90.0 },
    StepOp::Scale { sx: 2.0, sy: 0.5 },
    StepOp::Reset,
];

pub const DIAGNOSTIC_STEPS: &[StepOp] = &[
    StepOp::Translate { dx: -5.0, dy: 0.0 },
    StepOp::Translate { dx: 0.0, dy: 7.0 },
    StepOp::Rotate { degrees: 45.0 },
    StepOp::Rotate { degrees: -90.0 },
    StepOp::Scale { sx: 2.0, sy: 1.0 },
    StepOp::Scale { sx: 1.0, sy: 0.5 },
    StepOp::Reset,
];

/// Which step table the engine dispatches on, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Production,
    Diagnostic,
}

impl Sequence {
    pub fn steps(self) -> &'static [StepOp] {
        match self {
            Sequence::Production => PRODUCTION_STEPS,
            Sequence::Diagnostic => DIAGNOSTIC_STEPS,
        }
    }

    /// Highest valid frame index. The step at this index is the reset step.
    pub fn cycle_length(self) -> usize {
        self.steps().len() - 1
    }
}
