//! Partitioning of query times onto transition segments
//!
//! Given the `n + 1` boundaries of a [`TransitionTable`](crate::switching::TransitionTable)
//! and an arbitrary, unsorted array of query times, [`partition`] groups the
//! positions of the query array by the segment containing each time.
//!
//! Testing every time against every segment costs `O(n·m)`. Instead the
//! boundaries are first narrowed to the window that can contain the data:
//! the last boundary at or before the earliest time, and the first boundary
//! after the latest time. Only the `k` segments of that window are scanned, for
//! `O(log n + k·m)` overall, independent of the length of the series when the
//! query spans a few element sets.

use crate::errors::{Result, SwitchError};
use chrono::NaiveDateTime;
use log::debug;

/// Positions of the query times falling in one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment index, which is also the index of the active element set
    pub index: usize,
    /// Ascending positions into the query array
    pub indices: Vec<usize>,
}

/// Group the positions of `times` by transition segment
///
/// Segments are half-open, `[transitions[i], transitions[i + 1])`, and only
/// non-empty segments are returned, in segment order. Every position of
/// `times` appears in exactly one returned segment.
///
/// # Errors
///
/// * [`SwitchError::EmptySeries`] if `transitions` has fewer than two boundaries
/// * [`SwitchError::OutOfRangeTime`] if a time precedes the first boundary or
///   is at or after the last one
pub fn partition(transitions: &[NaiveDateTime], times: &[NaiveDateTime]) -> Result<Vec<Segment>> {
    if transitions.len() < 2 {
        return Err(SwitchError::EmptySeries);
    }

    let (earliest, latest) = match time_bounds(times) {
        Some(bounds) => bounds,
        None => return Ok(Vec::new()),
    };

    let lower = transitions[0];
    let upper = transitions[transitions.len() - 1];
    if earliest < lower {
        return Err(SwitchError::OutOfRangeTime {
            time: earliest,
            lower,
            upper,
        });
    }
    if latest >= upper {
        return Err(SwitchError::OutOfRangeTime {
            time: latest,
            lower,
            upper,
        });
    }

    let (start, stop) = search_window(transitions, earliest, latest);
    debug!(
        "Partitioning {} times over segments {}..{} of {}",
        times.len(),
        start,
        stop,
        transitions.len() - 1
    );

    let mut segments = Vec::with_capacity(stop - start);
    for index in start..stop {
        let (begin, end) = (transitions[index], transitions[index + 1]);
        let indices: Vec<usize> = times
            .iter()
            .enumerate()
            .filter(|&(_, &t)| begin <= t && t < end)
            .map(|(i, _)| i)
            .collect();

        if !indices.is_empty() {
            segments.push(Segment { index, indices });
        }
    }

    Ok(segments)
}

/// Segment containing a single time
pub fn segment_of(transitions: &[NaiveDateTime], time: NaiveDateTime) -> Result<usize> {
    let segments = partition(transitions, &[time])?;
    // A single in-range time always lands in exactly one segment
    Ok(segments.first().map_or(0, |segment| segment.index))
}

/// Earliest and latest of the query times, `None` when there are none
fn time_bounds(times: &[NaiveDateTime]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = *times.first()?;
    Some(
        times
            .iter()
            .fold((first, first), |(lo, hi), &t| (lo.min(t), hi.max(t))),
    )
}

/// Candidate segment range `start..stop` for times in `[earliest, latest]`
///
/// `start` is the highest boundary index with `transitions[start] <= earliest`
/// and `stop` the lowest with `transitions[stop] > latest`. Both are binary
/// searches over the non-decreasing boundaries. Callers guarantee
/// `transitions[0] <= earliest` and `latest < transitions[last]`.
fn search_window(
    transitions: &[NaiveDateTime],
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
) -> (usize, usize) {
    let start = transitions.partition_point(|&t| t <= earliest) - 1;
    let stop = transitions.partition_point(|&t| t <= latest);
    (start, stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, day};
    use crate::time::{supported_max, supported_min};
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario_table() -> Vec<NaiveDateTime> {
        vec![
            supported_min(),
            day(1998, 1, 5),
            day(1998, 1, 10),
            supported_max(),
        ]
    }

    #[test]
    fn test_one_time_per_segment() {
        let times = [day(1998, 1, 2), day(1998, 1, 6), day(1998, 1, 11)];
        let segments = partition(&scenario_table(), &times).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment { index: 0, indices: vec![0] },
                Segment { index: 1, indices: vec![1] },
                Segment { index: 2, indices: vec![2] },
            ]
        );
    }

    #[test]
    fn test_unsorted_times_keep_positions() {
        let times = [
            day(1998, 1, 11),
            day(1998, 1, 2),
            day(1998, 1, 7),
            day(1998, 1, 3),
            day(1998, 1, 12),
        ];
        let segments = partition(&scenario_table(), &times).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment { index: 0, indices: vec![1, 3] },
                Segment { index: 1, indices: vec![2] },
                Segment { index: 2, indices: vec![0, 4] },
            ]
        );
    }

    #[test]
    fn test_boundaries_are_half_open() {
        // A time equal to a boundary belongs to the later segment
        let times = [day(1998, 1, 5), day(1998, 1, 10) - Duration::microseconds(1)];
        let segments = partition(&scenario_table(), &times).unwrap();
        assert_eq!(segments, vec![Segment { index: 1, indices: vec![0, 1] }]);

        let segments = partition(&scenario_table(), &[supported_min()]).unwrap();
        assert_eq!(segments, vec![Segment { index: 0, indices: vec![0] }]);
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let times = [day(1998, 1, 2), day(1998, 1, 12)];
        let segments = partition(&scenario_table(), &times).unwrap();
        let indices: Vec<usize> = segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_zero_width_segments() {
        let table = vec![
            supported_min(),
            day(1998, 1, 5),
            day(1998, 1, 5),
            day(1998, 1, 5),
            supported_max(),
        ];
        let times = [day(1998, 1, 5), day(1998, 1, 4)];
        let segments = partition(&table, &times).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment { index: 0, indices: vec![1] },
                Segment { index: 3, indices: vec![0] },
            ]
        );
    }

    #[test]
    fn test_empty_times() {
        assert!(partition(&scenario_table(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range() {
        let table = scenario_table();

        let err = partition(&table, &[day(1998, 1, 2), supported_max()]).unwrap_err();
        assert_eq!(
            err,
            SwitchError::OutOfRangeTime {
                time: supported_max(),
                lower: supported_min(),
                upper: supported_max(),
            }
        );

        let before = supported_min() - Duration::microseconds(1);
        assert!(matches!(
            partition(&table, &[before, day(1998, 1, 2)]),
            Err(SwitchError::OutOfRangeTime { time, .. }) if time == before
        ));
    }

    #[test]
    fn test_degenerate_table() {
        assert_eq!(
            partition(&[supported_min()], &[day(1998, 1, 2)]),
            Err(SwitchError::EmptySeries)
        );
    }

    #[test]
    fn test_search_window() {
        let table: Vec<NaiveDateTime> = (0..10).map(|i| day(2000, 1, 1 + 3 * i)).collect();

        assert_eq!(search_window(&table, day(2000, 1, 4), day(2000, 1, 9)), (1, 3));
        assert_eq!(search_window(&table, day(2000, 1, 5), day(2000, 1, 5)), (1, 2));
        assert_eq!(search_window(&table, day(2000, 1, 1), day(2000, 1, 27)), (0, 9));
    }

    #[test]
    fn test_segment_of() {
        let table = scenario_table();
        assert_eq!(segment_of(&table, at(1998, 1, 9, 23, 59, 59)), Ok(1));
        assert_eq!(segment_of(&table, day(1998, 1, 10)), Ok(2));
        assert!(segment_of(&table, supported_max()).is_err());
    }

    #[test]
    fn test_random_partitions_are_total() {
        let mut rng = StdRng::seed_from_u64(42);
        let origin = day(2010, 1, 1);

        for _ in 0..50 {
            // Random non-decreasing table, with occasional duplicates
            let mut table = vec![supported_min()];
            let mut t = origin;
            for _ in 0..rng.gen_range(0..20) {
                t += Duration::seconds(rng.gen_range(0..100_000));
                table.push(t);
            }
            table.push(supported_max());

            let times: Vec<NaiveDateTime> = (0..rng.gen_range(0..200))
                .map(|_| origin + Duration::seconds(rng.gen_range(-50_000..2_500_000)))
                .collect();

            let segments = partition(&table, &times).unwrap();

            let mut seen = vec![0usize; times.len()];
            for segment in &segments {
                assert!(!segment.indices.is_empty());
                assert!(segment.indices.windows(2).all(|w| w[0] < w[1]));
                for &i in &segment.indices {
                    seen[i] += 1;
                    assert!(table[segment.index] <= times[i]);
                    assert!(times[i] < table[segment.index + 1]);
                }
            }
            assert!(seen.iter().all(|&count| count == 1));
            assert!(segments.windows(2).all(|w| w[0].index < w[1].index));
        }
    }
}
