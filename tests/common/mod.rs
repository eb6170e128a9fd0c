//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use nalgebra::Vector3;
use thistle::time::{from_julian, to_micros};
use thistle::{ElementSet, JulianMoment, PropagationBatch};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    at(y, m, d, 0, 0, 0)
}

/// Element set whose prediction drifts quadratically away from its epoch
///
/// Two tracks with different epochs predict the same position exactly halfway
/// between them. The velocity z component carries the epoch in microseconds
/// so a result can be traced back to the track that produced it.
#[derive(Debug, Clone)]
pub struct Track {
    pub epoch: NaiveDateTime,
    pub drift: f64,
}

impl Track {
    pub fn new(epoch: NaiveDateTime) -> Self {
        Self { epoch, drift: 1e-6 }
    }

    pub fn tag(&self) -> f64 {
        to_micros(self.epoch) as f64
    }
}

impl ElementSet for Track {
    fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    fn propagate_batch(&self, jd: &[f64], fr: &[f64]) -> PropagationBatch {
        let mut batch = PropagationBatch::with_capacity(jd.len());
        for (&whole, &fraction) in jd.iter().zip(fr) {
            let time = from_julian(JulianMoment::from_parts(whole, fraction));
            let s = (to_micros(time) - to_micros(self.epoch)) as f64 / 1e6;
            batch.push(
                0,
                Vector3::new(self.drift * s * s, 0.0, 0.0),
                Vector3::new(2.0 * self.drift * s, 0.0, self.tag()),
            );
        }
        batch
    }
}

/// Element sets of the reference scenario, deliberately out of order
pub fn scenario_tracks() -> Vec<Track> {
    vec![
        Track::new(day(1998, 1, 10)),
        Track::new(day(1998, 1, 1)),
        Track::new(day(1998, 1, 5)),
    ]
}
