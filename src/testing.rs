//! Test doubles shared by the unit tests

use crate::elements::{ElementSet, PropagationBatch};
use crate::time::{from_julian, to_micros, JulianMoment};
use chrono::{NaiveDate, NaiveDateTime};
use nalgebra::Vector3;

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    at(y, m, d, 0, 0, 0)
}

/// Element set moving along a straight line with an optional quadratic drift
///
/// `position(s) = origin + velocity * s + (drift * s², 0, 0)` where `s` is in
/// seconds since the epoch. The z component of every velocity is replaced by
/// the epoch in microseconds since 1957, so tests can tell which set answered.
#[derive(Debug, Clone)]
pub(crate) struct MockElementSet {
    pub epoch: NaiveDateTime,
    pub origin: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub drift: f64,
    pub failing_from: Option<NaiveDateTime>,
    pub truncate: bool,
}

impl MockElementSet {
    pub fn moving(epoch: NaiveDateTime, origin: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            epoch,
            origin,
            velocity,
            drift: 0.0,
            failing_from: None,
            truncate: false,
        }
    }

    pub fn stationary(epoch: NaiveDateTime) -> Self {
        Self::moving(epoch, Vector3::zeros(), Vector3::zeros())
    }

    pub fn drifting(epoch: NaiveDateTime) -> Self {
        Self {
            drift: 1e-6,
            ..Self::stationary(epoch)
        }
    }

    pub fn failing_from(mut self, time: NaiveDateTime) -> Self {
        self.failing_from = Some(time);
        self
    }

    pub fn truncating(mut self) -> Self {
        self.truncate = true;
        self
    }
}

impl ElementSet for MockElementSet {
    fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    fn propagate_batch(&self, jd: &[f64], fr: &[f64]) -> PropagationBatch {
        let mut batch = PropagationBatch::with_capacity(jd.len());
        let epoch_us = to_micros(self.epoch);

        for (&whole, &fraction) in jd.iter().zip(fr) {
            let time = from_julian(JulianMoment::from_parts(whole, fraction));
            let s = (to_micros(time) - epoch_us) as f64 / 1e6;

            let failed = self.failing_from.is_some_and(|limit| time >= limit);
            let position =
                self.origin + self.velocity * s + Vector3::new(self.drift * s * s, 0.0, 0.0);
            let velocity = Vector3::new(
                self.velocity.x + 2.0 * self.drift * s,
                self.velocity.y,
                epoch_us as f64,
            );
            batch.push(if failed { 1 } else { 0 }, position, velocity);
        }

        if self.truncate {
            batch.error_codes.pop();
            batch.positions.pop();
            batch.velocities.pop();
        }
        batch
    }
}
