//! Element set definitions
//!
//! An [`ElementSet`] is one orbital state of an object, valid near its epoch,
//! that can be propagated in batches. This crate never implements one; SGP4
//! records, numerical integrators or test doubles are plugged in by the caller.
//! [`ElementSeries`] holds borrowed element sets ordered by epoch.

use crate::errors::{Result, SwitchError};
use chrono::NaiveDateTime;
use nalgebra::Vector3;
use std::ops::Index;

/// Results of propagating one element set over a batch of times
///
/// All three vectors have one entry per input time, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropagationBatch {
    /// Propagator status per time (0 means success)
    pub error_codes: Vec<i32>,
    /// Positions in km
    pub positions: Vec<Vector3<f64>>,
    /// Velocities in km/s
    pub velocities: Vec<Vector3<f64>>,
}

impl PropagationBatch {
    /// Create an empty batch with room for `capacity` results
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            error_codes: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity),
        }
    }

    /// Append one result
    pub fn push(&mut self, error_code: i32, position: Vector3<f64>, velocity: Vector3<f64>) {
        self.error_codes.push(error_code);
        self.positions.push(position);
        self.velocities.push(velocity);
    }

    /// Number of results, or `None` if the three vectors disagree
    pub fn consistent_len(&self) -> Option<usize> {
        let n = self.error_codes.len();
        (self.positions.len() == n && self.velocities.len() == n).then_some(n)
    }

    /// Number of results flagged with a nonzero error code
    pub fn failures(&self) -> usize {
        self.error_codes.iter().filter(|&&code| code != 0).count()
    }
}

/// A propagatable orbital element set
pub trait ElementSet {
    /// Reference instant at which the element set is most accurate
    fn epoch(&self) -> NaiveDateTime;

    /// Propagate to every `(jd[i], fr[i])` Julian moment
    ///
    /// `jd` holds midnight Julian dates and `fr` day fractions, the two-part
    /// convention of SGP4. Failures are reported per time through
    /// [`PropagationBatch::error_codes`], never as a Rust error.
    fn propagate_batch(&self, jd: &[f64], fr: &[f64]) -> PropagationBatch;
}

impl<T: ElementSet + ?Sized> ElementSet for &T {
    fn epoch(&self) -> NaiveDateTime {
        (**self).epoch()
    }

    fn propagate_batch(&self, jd: &[f64], fr: &[f64]) -> PropagationBatch {
        (**self).propagate_batch(jd, fr)
    }
}

/// Element sets of one object, sorted ascending by epoch
///
/// The sort is stable, so element sets sharing an epoch keep the order in
/// which they were supplied. A series is never empty.
#[derive(Debug)]
pub struct ElementSeries<'a, E> {
    elements: Vec<&'a E>,
}

impl<E> Clone for ElementSeries<'_, E> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

impl<'a, E: ElementSet> ElementSeries<'a, E> {
    /// Build a series from borrowed element sets in any order
    pub fn new<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let mut elements: Vec<&'a E> = elements.into_iter().collect();
        if elements.is_empty() {
            return Err(SwitchError::EmptySeries);
        }

        elements.sort_by_key(|element| element.epoch());
        Ok(Self { elements })
    }

    /// Number of element sets
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; kept for the usual container API
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element set by position in the sorted series
    pub fn get(&self, index: usize) -> Option<&'a E> {
        self.elements.get(index).copied()
    }

    /// Element set with the earliest epoch
    pub fn first(&self) -> &'a E {
        self.elements[0]
    }

    /// Iterate over the element sets in epoch order
    pub fn iter(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.elements.iter().copied()
    }

    /// Epochs in series order
    pub fn epochs(&self) -> Vec<NaiveDateTime> {
        self.iter().map(|element| element.epoch()).collect()
    }

    /// Adjacent `(earlier, later)` element set pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&'a E, &'a E)> + '_ {
        self.elements.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl<'a, E> Index<usize> for ElementSeries<'a, E> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        self.elements[index]
    }
}
