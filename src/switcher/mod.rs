//! Switching facade
//!
//! [`Switcher`] ties an [`ElementSeries`] to the [`TransitionTable`] of a
//! switching policy. It answers which element set is active at an instant and
//! propagates arbitrary time arrays by dispatching one batch per segment to
//! the active element set, reassembling the results in the caller's order.
//!
//! Construction is two-phase and eager: the series is sorted, then the table
//! is computed and stored as a plain value. A switcher is never mutated
//! afterwards; [`Switcher::rebuild`] returns a new one.

use crate::elements::{ElementSeries, ElementSet};
use crate::errors::{Result, SwitchError};
use crate::partition::{partition, segment_of};
use crate::switching::{compute_transitions, Policy, TransitionTable};
use crate::time::{to_julian_arrays, to_micros};
use chrono::NaiveDateTime;
use log::debug;
use nalgebra::Vector3;

/// Propagated states aligned with the query times
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Propagation {
    /// Positions in km
    pub positions: Vec<Vector3<f64>>,
    /// Velocities in km/s
    pub velocities: Vec<Vector3<f64>>,
    /// Propagator status per time, passed through unchanged (0 means success)
    pub error_codes: Vec<i32>,
}

impl Propagation {
    fn zeroed(len: usize) -> Self {
        Self {
            positions: vec![Vector3::zeros(); len],
            velocities: vec![Vector3::zeros(); len],
            error_codes: vec![0; len],
        }
    }

    /// Number of propagated times
    pub fn len(&self) -> usize {
        self.error_codes.len()
    }

    /// Check if no times were propagated
    pub fn is_empty(&self) -> bool {
        self.error_codes.is_empty()
    }
}

/// Chooses and propagates the active element set of one object
#[derive(Debug)]
pub struct Switcher<'a, E> {
    series: ElementSeries<'a, E>,
    transitions: TransitionTable,
}

impl<'a, E: ElementSet> Switcher<'a, E> {
    /// Sort the element sets and compute their transitions under `policy`
    pub fn new<I>(elements: I, policy: Policy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let series = ElementSeries::new(elements)?;
        let transitions = compute_transitions(&policy, &series)?;
        Ok(Self {
            series,
            transitions,
        })
    }

    /// Like [`Switcher::new`], with the policy given by name
    /// (`"epoch"`, `"midpoint"` or `"tca"`)
    pub fn from_method<I>(elements: I, method: &str) -> Result<Self>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let policy: Policy = method.parse()?;
        Self::new(elements, policy)
    }

    /// Pair a series with a previously computed table
    pub fn with_transitions(
        series: ElementSeries<'a, E>,
        transitions: TransitionTable,
    ) -> Result<Self> {
        if transitions.len() != series.len() + 1 {
            return Err(SwitchError::TableMismatch {
                expected: series.len() + 1,
                actual: transitions.len(),
            });
        }
        Ok(Self {
            series,
            transitions,
        })
    }

    /// New switcher over the same element sets under another policy
    pub fn rebuild(&self, policy: Policy) -> Result<Self> {
        let transitions = compute_transitions(&policy, &self.series)?;
        Ok(Self {
            series: self.series.clone(),
            transitions,
        })
    }

    /// Element sets in epoch order
    pub fn series(&self) -> &ElementSeries<'a, E> {
        &self.series
    }

    /// Transition table in use
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Policy the table was computed with
    pub fn policy(&self) -> Policy {
        self.transitions.policy()
    }

    /// Propagate every time with its active element set
    ///
    /// Each element set is called once, with all the times of its segment.
    /// Results come back in the order of `times`, error codes untouched.
    pub fn propagate(&self, times: &[NaiveDateTime]) -> Result<Propagation> {
        let segments = partition(self.transitions.boundaries(), times)?;
        let mut result = Propagation::zeroed(times.len());

        for segment in &segments {
            let element = &self.series[segment.index];
            let subset: Vec<NaiveDateTime> = segment.indices.iter().map(|&i| times[i]).collect();
            let (jd, fr) = to_julian_arrays(&subset);

            let batch = element.propagate_batch(&jd, &fr);
            match batch.consistent_len() {
                Some(n) if n == subset.len() => {}
                other => {
                    return Err(SwitchError::BatchLengthMismatch {
                        expected: subset.len(),
                        actual: other.unwrap_or(batch.error_codes.len()),
                    })
                }
            }

            debug!(
                "Segment {}: {} times, {} propagation failures",
                segment.index,
                subset.len(),
                batch.failures()
            );

            for (k, &i) in segment.indices.iter().enumerate() {
                result.positions[i] = batch.positions[k];
                result.velocities[i] = batch.velocities[k];
                result.error_codes[i] = batch.error_codes[k];
            }
        }

        Ok(result)
    }

    /// Index in the series of the element set active at `time`
    pub fn active_index(&self, time: NaiveDateTime) -> Result<usize> {
        segment_of(self.transitions.boundaries(), time)
    }

    /// Element set active at `time`
    pub fn find_active_element(&self, time: NaiveDateTime) -> Result<&'a E> {
        let index = self.active_index(time)?;
        self.series.get(index).ok_or(SwitchError::TableMismatch {
            expected: self.series.len() + 1,
            actual: self.transitions.len(),
        })
    }

    /// Element set whose epoch is closest to `time`, whatever the policy
    ///
    /// Ties go to the earlier element set.
    pub fn find_nearest_element(&self, time: NaiveDateTime) -> &'a E {
        let target = to_micros(time);
        self.series
            .iter()
            .min_by_key(|element| (to_micros(element.epoch()) - target).abs())
            .unwrap_or_else(|| self.series.first())
    }
}
