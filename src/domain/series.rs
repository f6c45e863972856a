//! Dated series container and the cumulative-to-daily differencing transform.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ordered `(date, value)` series with strictly increasing dates.
///
/// All three series shapes in the pipeline (cumulative, daily new, trend) use
/// this container; constructors keep the date ordering invariant by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    /// Build from points already sorted ascending by date.
    ///
    /// Callers are responsible for the ordering; aggregation paths go through
    /// `from_map` instead, which sorts by construction.
    pub fn from_sorted(points: Vec<(NaiveDate, f64)>) -> TimeSeries {
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        TimeSeries { points }
    }

    /// Build from a date-keyed map. BTreeMap iteration order gives ascending,
    /// duplicate-free dates.
    pub fn from_map(map: BTreeMap<NaiveDate, f64>) -> TimeSeries {
        TimeSeries {
            points: map.into_iter().collect(),
        }
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|&(d, _)| d)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, v)| v)
    }
}

/// Differencing transform: cumulative counts to daily new counts.
///
/// The output starts at the *second* input date (the first has no
/// predecessor) and has one fewer point than the input; with 0 or 1 input
/// points the output is empty. Negative deltas are passed through unmodified:
/// upstream data revisions can legitimately produce negative "new" counts.
pub fn daily_deltas(cumulative: &TimeSeries) -> TimeSeries {
    let points = cumulative.points();
    if points.len() < 2 {
        return TimeSeries { points: Vec::new() };
    }
    let deltas = points
        .windows(2)
        .map(|w| (w[1].0, w[1].1 - w[0].1))
        .collect();
    TimeSeries { points: deltas }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, n).unwrap()
    }

    fn series(values: &[f64]) -> TimeSeries {
        TimeSeries::from_sorted(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (day(1 + i as u32), v))
                .collect(),
        )
    }

    #[test]
    fn deltas_drop_the_first_date() {
        let cumul = series(&[10.0, 15.0, 15.0, 20.0]);
        let new = daily_deltas(&cumul);

        assert_eq!(new.len(), 3);
        let dates: Vec<NaiveDate> = new.dates().collect();
        assert_eq!(dates, vec![day(2), day(3), day(4)]);
        let values: Vec<f64> = new.values().collect();
        assert_eq!(values, vec![5.0, 0.0, 5.0]);
    }

    #[test]
    fn deltas_match_pairwise_differences() {
        let cumul = series(&[3.0, 7.0, 20.0, 21.0, 40.0]);
        let new = daily_deltas(&cumul);

        assert_eq!(new.len(), cumul.len() - 1);
        for (i, (date, value)) in new.points().iter().enumerate() {
            let (d_next, v_next) = cumul.points()[i + 1];
            let (_, v_prev) = cumul.points()[i];
            assert_eq!(*date, d_next);
            assert_eq!(*value, v_next - v_prev);
        }
    }

    #[test]
    fn deltas_of_short_series_are_empty() {
        assert!(daily_deltas(&series(&[])).is_empty());
        assert!(daily_deltas(&series(&[42.0])).is_empty());
    }

    #[test]
    fn negative_deltas_pass_through() {
        // Upstream revisions can lower a cumulative count.
        let cumul = series(&[100.0, 90.0, 95.0]);
        let values: Vec<f64> = daily_deltas(&cumul).values().collect();
        assert_eq!(values, vec![-10.0, 5.0]);
    }

    #[test]
    fn from_map_orders_dates() {
        let mut map = BTreeMap::new();
        map.insert(day(3), 3.0);
        map.insert(day(1), 1.0);
        map.insert(day(2), 2.0);
        let s = TimeSeries::from_map(map);
        let dates: Vec<NaiveDate> = s.dates().collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
    }
}
