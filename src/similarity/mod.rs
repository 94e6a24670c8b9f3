pub mod verify;

use crate::error::{SimJoinError, SimJoinResult};

/// The similarity measure to join on. A closed, tagged variant rather than a
/// dynamic dispatch over measure names: each arm of the matches below
/// statically selects the prefix-length, size-bound, and overlap-threshold
/// formulas for that measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimMeasure {
    Jaccard,
    Cosine,
    Dice,
    Overlap,
    EditDistance,
}

/// Comparison operator applied between the computed similarity/distance and
/// the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Ge,
    Gt,
    Eq,
    Le,
    Lt,
}

impl SimMeasure {
    fn supports_comp_op(&self, op: CompOp) -> bool {
        match self {
            Self::Jaccard | Self::Cosine | Self::Dice | Self::Overlap => {
                matches!(op, CompOp::Ge | CompOp::Gt | CompOp::Eq)
            }
            Self::EditDistance => matches!(op, CompOp::Le | CompOp::Lt | CompOp::Eq),
        }
    }
}

/// Join configuration, fully validated at construction time. No partial
/// `JoinConfig` can exist without having passed every `InvalidConfig` check.
#[derive(Debug, Clone, Copy)]
pub struct JoinConfig {
    pub measure: SimMeasure,
    pub threshold: f64,
    pub comp_op: CompOp,
    pub allow_empty: bool,
}

impl JoinConfig {
    pub fn new(
        measure: SimMeasure,
        threshold: f64,
        comp_op: CompOp,
        allow_empty: bool,
    ) -> SimJoinResult<Self> {
        if !measure.supports_comp_op(comp_op) {
            return Err(SimJoinError::InvalidConfig(format!(
                "comparison operator {:?} is not supported for measure {:?}",
                comp_op, measure
            )));
        }

        match measure {
            SimMeasure::Jaccard | SimMeasure::Dice => {
                if !(threshold > 0.0 && threshold <= 1.0) {
                    return Err(SimJoinError::InvalidConfig(format!(
                        "threshold must be in (0, 1] for {:?}, got {}",
                        measure, threshold
                    )));
                }
            }
            SimMeasure::Cosine => {
                if !(threshold > 0.0 && threshold <= 1.0) {
                    return Err(SimJoinError::InvalidConfig(format!(
                        "threshold must be in (0, 1] for Cosine, got {}",
                        threshold
                    )));
                }
            }
            SimMeasure::Overlap => {
                if threshold < 1.0 || threshold.fract() != 0.0 {
                    return Err(SimJoinError::InvalidConfig(format!(
                        "threshold must be a positive integer for Overlap, got {}",
                        threshold
                    )));
                }
            }
            SimMeasure::EditDistance => {
                if threshold < 0.0 || threshold.fract() != 0.0 {
                    return Err(SimJoinError::InvalidConfig(format!(
                        "threshold must be a non-negative integer for EditDistance, got {}",
                        threshold
                    )));
                }
            }
        }

        Ok(Self {
            measure,
            threshold,
            comp_op,
            allow_empty,
        })
    }
}

/// Clamps a prefix length to `[0, n]`, since the formulas below can produce
/// values outside that range for degenerate (tiny) token counts.
fn clamp_prefix(len: i64, n: usize) -> usize {
    len.max(0).min(n as i64) as usize
}

/// Number of leading (rarest) tokens of an `n`-token record that must be
/// indexed/probed to guarantee no false negatives, per measure and threshold.
pub fn prefix_length(measure: SimMeasure, n: usize, threshold: f64) -> usize {
    if n == 0 {
        return 0;
    }

    let n_f = n as f64;

    match measure {
        SimMeasure::Jaccard => {
            clamp_prefix(n as i64 - (threshold * n_f).ceil() as i64 + 1, n)
        }
        SimMeasure::Cosine => {
            clamp_prefix(n as i64 - (threshold * threshold * n_f).ceil() as i64 + 1, n)
        }
        SimMeasure::Dice => clamp_prefix(
            n as i64 - ((threshold * n_f) / (2.0 - threshold)).ceil() as i64 + 1,
            n,
        ),
        SimMeasure::Overlap => clamp_prefix(n as i64 - threshold as i64 + 1, n),
        SimMeasure::EditDistance => n, // computed separately via q/tau in the driver
    }
}

/// Inclusive `[lower, upper]` bound on candidate token count compatible with
/// an `n`-token probe record at this threshold. `None` when the measure has
/// no size bound (Overlap, EditDistance).
pub fn size_bounds(measure: SimMeasure, n: usize, threshold: f64) -> Option<(usize, usize)> {
    if n == 0 {
        return None;
    }

    let n_f = n as f64;

    match measure {
        SimMeasure::Jaccard => Some((
            (threshold * n_f).ceil() as usize,
            (n_f / threshold).floor() as usize,
        )),
        SimMeasure::Cosine => Some((
            (threshold * threshold * n_f).ceil() as usize,
            (n_f / (threshold * threshold)).floor() as usize,
        )),
        SimMeasure::Dice => Some((
            ((threshold * n_f) / (2.0 - threshold)).ceil() as usize,
            (n_f * (2.0 - threshold) / threshold).floor() as usize,
        )),
        SimMeasure::Overlap | SimMeasure::EditDistance => None,
    }
}

/// Minimum shared-token count two records of sizes `x` and `y` must reach to
/// possibly satisfy the threshold.
pub fn overlap_threshold(measure: SimMeasure, x: usize, y: usize, threshold: f64) -> usize {
    let x_f = x as f64;
    let y_f = y as f64;

    match measure {
        SimMeasure::Jaccard => ((threshold * (x_f + y_f)) / (1.0 + threshold)).ceil() as usize,
        SimMeasure::Cosine => (threshold * (x_f * y_f).sqrt()).ceil() as usize,
        SimMeasure::Dice => (threshold * (x_f + y_f) / 2.0).ceil() as usize,
        SimMeasure::Overlap => threshold as usize,
        SimMeasure::EditDistance => 0, // unused; edit distance verifies directly
    }
}
