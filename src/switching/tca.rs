//! Time of closest approach between adjacent element sets
//!
//! Both element sets of a pair are propagated over a fixed-step grid spanning
//! their epochs, and the grid point where their predicted positions are
//! nearest becomes the boundary. There is no refinement below the grid step.

use crate::constants::DEFAULT_TCA_STEP_S;
use crate::elements::ElementSet;
use crate::errors::{Result, SwitchError};
use crate::time::{from_micros, step_to_micros, to_julian, to_micros};
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Settings of the closest-approach search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcaOptions {
    /// Spacing of the sampling grid in seconds
    pub step_seconds: f64,
}

impl Default for TcaOptions {
    fn default() -> Self {
        Self {
            step_seconds: DEFAULT_TCA_STEP_S,
        }
    }
}

impl TcaOptions {
    /// Set the sampling step in seconds
    pub fn with_step_seconds(mut self, step_seconds: f64) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    /// Sampling step as a positive number of microseconds
    pub(crate) fn step_micros(&self) -> Result<i64> {
        step_to_micros(self.step_seconds)
    }
}

/// Find the grid instant where `a` and `b` predict the closest positions
///
/// The grid starts at the epoch of `a` and advances by `step` microseconds up
/// to the epoch of `b`. Grid points where either propagation fails are
/// dropped. The search fails if nothing usable remains or if the minimum
/// distance is reached at more than one grid point.
pub(crate) fn closest_approach<E: ElementSet>(
    pair: usize,
    a: &E,
    b: &E,
    step: i64,
) -> Result<NaiveDateTime> {
    let t0 = to_micros(a.epoch());
    let t1 = to_micros(b.epoch());

    let grid: Vec<i64> = (0..)
        .map(|k| t0 + k * step)
        .take_while(|&t| t <= t1)
        .collect();

    let (jd, fr): (Vec<f64>, Vec<f64>) = grid
        .iter()
        .map(|&t| {
            let moment = to_julian(from_micros(t));
            (moment.jd(), moment.fr())
        })
        .unzip();

    let batch_a = a.propagate_batch(&jd, &fr);
    let batch_b = b.propagate_batch(&jd, &fr);
    for batch in [&batch_a, &batch_b] {
        match batch.consistent_len() {
            Some(n) if n == grid.len() => {}
            other => {
                return Err(SwitchError::BatchLengthMismatch {
                    expected: grid.len(),
                    actual: other.unwrap_or(batch.error_codes.len()),
                })
            }
        }
    }

    let mut best: Option<(usize, f64)> = None;
    let mut ties = 0;
    let mut usable = 0;
    for k in 0..grid.len() {
        if batch_a.error_codes[k] != 0 || batch_b.error_codes[k] != 0 {
            continue;
        }
        let distance = (batch_a.positions[k] - batch_b.positions[k]).norm();
        if !distance.is_finite() {
            continue;
        }
        usable += 1;

        match best {
            Some((_, min)) if distance > min => {}
            Some((_, min)) if distance == min => ties += 1,
            _ => {
                best = Some((k, distance));
                ties = 1;
            }
        }
    }

    let reason = match best {
        None => format!("none of {} grid points propagated cleanly", grid.len()),
        Some((_, min)) if ties > 1 => format!(
            "minimum distance {:.6} km reached at {} grid points",
            min, ties
        ),
        Some((k, min)) => {
            debug!(
                "Pair {}: closest approach {:.6} km at {} ({} of {} grid points usable)",
                pair,
                min,
                from_micros(grid[k]),
                usable,
                grid.len()
            );
            return Ok(from_micros(grid[k]));
        }
    };

    warn!("Pair {}: closest approach unresolved, {}", pair, reason);
    Err(SwitchError::UnresolvedBoundary { pair, reason })
}
