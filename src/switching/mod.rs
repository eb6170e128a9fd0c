//! Switching policies and transition tables
//!
//! A switching policy decides, for any instant, which element set of a series
//! should be propagated. Each policy is reduced to a [`TransitionTable`]: the
//! `n + 1` boundary timestamps delimiting the active interval of each of the
//! `n` element sets. Segment `i` is the half-open interval
//! `[boundaries[i], boundaries[i + 1])` and always belongs to element set `i`.
//!
//! # Policies
//!
//! - [`Policy::Epoch`]: an element set becomes active at its own epoch
//! - [`Policy::Midpoint`]: control passes halfway between adjacent epochs
//! - [`Policy::ClosestApproach`]: control passes where the two adjacent
//!   element sets predict the closest positions (sampled search)

mod tca;

use crate::elements::{ElementSeries, ElementSet};
use crate::errors::{Result, SwitchError};
use crate::time::{from_micros, supported_max, supported_min, to_micros};
use chrono::NaiveDateTime;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use tca::TcaOptions;

/// Rule for choosing the active element set at any instant
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// The newest element set takes over at its own epoch
    #[default]
    Epoch,
    /// Adjacent element sets hand over at the midpoint of their epochs
    Midpoint,
    /// Adjacent element sets hand over at their time of closest approach
    #[serde(rename = "tca")]
    ClosestApproach(TcaOptions),
}

impl Policy {
    /// Short identifier, as accepted by [`Policy::from_str`]
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Epoch => "epoch",
            Policy::Midpoint => "midpoint",
            Policy::ClosestApproach(_) => "tca",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "epoch" => Ok(Policy::Epoch),
            "midpoint" => Ok(Policy::Midpoint),
            "tca" => Ok(Policy::ClosestApproach(TcaOptions::default())),
            _ => Err(SwitchError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Boundary timestamps delimiting the active segment of each element set
///
/// Holds `n + 1` non-decreasing boundaries for `n` element sets. The first
/// and last boundaries are the limits of the supported calendar range and
/// stand in for minus and plus infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    boundaries: Vec<NaiveDateTime>,
    policy: Policy,
}

impl TransitionTable {
    /// Wrap interior boundaries with the range sentinels
    ///
    /// Interior boundaries are clamped into the supported range so the table
    /// stays sorted even for element sets with out-of-range epochs.
    fn with_sentinels(interior: Vec<NaiveDateTime>, policy: Policy) -> Self {
        let lower = supported_min();
        let upper = supported_max();

        let mut boundaries = Vec::with_capacity(interior.len() + 2);
        boundaries.push(lower);
        boundaries.extend(interior.into_iter().map(|t| t.clamp(lower, upper)));
        boundaries.push(upper);

        Self { boundaries, policy }
    }

    /// All boundaries, sentinels included
    pub fn boundaries(&self) -> &[NaiveDateTime] {
        &self.boundaries
    }

    /// Number of boundaries (`n + 1`)
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Always false, a table holds at least its two sentinels
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Number of segments (`n`)
    pub fn segment_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Half-open `[lower, upper)` bounds of segment `index`
    pub fn segment(&self, index: usize) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let lower = *self.boundaries.get(index)?;
        let upper = *self.boundaries.get(index + 1)?;
        Some((lower, upper))
    }

    /// Policy that produced the table
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Lower sentinel
    pub fn first(&self) -> NaiveDateTime {
        self.boundaries[0]
    }

    /// Upper sentinel
    pub fn last(&self) -> NaiveDateTime {
        self.boundaries[self.boundaries.len() - 1]
    }
}

impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "TransitionTable ({}, {} segments)",
            self.policy,
            self.segment_count()
        )?;
        for (i, pair) in self.boundaries.windows(2).enumerate() {
            writeln!(f, "  {:>4}: [{}, {})", i, pair[0], pair[1])?;
        }
        Ok(())
    }
}

/// Compute the transition table of a series under a switching policy
pub fn compute_transitions<E: ElementSet>(
    policy: &Policy,
    series: &ElementSeries<'_, E>,
) -> Result<TransitionTable> {
    debug!(
        "Computing {} transitions for {} element sets",
        policy,
        series.len()
    );

    let interior = match policy {
        Policy::Epoch => series.iter().skip(1).map(|e| e.epoch()).collect(),
        Policy::Midpoint => series
            .pairs()
            .map(|(a, b)| midpoint(a.epoch(), b.epoch()))
            .collect(),
        Policy::ClosestApproach(options) => {
            let step = options.step_micros()?;
            series
                .pairs()
                .enumerate()
                .map(|(pair, (a, b))| tca::closest_approach(pair, a, b, step))
                .collect::<Result<Vec<_>>>()?
        }
    };

    let table = TransitionTable::with_sentinels(interior, *policy);
    trace!("{}", table);
    Ok(table)
}

/// Instant halfway between two timestamps, at microsecond resolution
fn midpoint(a: NaiveDateTime, b: NaiveDateTime) -> NaiveDateTime {
    let t0 = to_micros(a);
    let t1 = to_micros(b);
    from_micros(t0 + (t1 - t0) / 2)
}
