//! Terminal reporting: latest counts and short-run averages per location.
//!
//! Formatting lives in one place so the pipeline code stays clean and output
//! changes are localized.

use chrono::NaiveDate;

use crate::domain::{DataKind, TimeSeries, daily_deltas};

/// Summary numbers for one location's cumulative series.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSummary {
    pub label: String,
    pub latest_date: NaiveDate,
    pub total: f64,
    /// Most recent day-over-day change (0 when only one day exists).
    pub latest_new: f64,
    /// Mean of the trailing (up to) 7 daily changes.
    pub week_avg_new: f64,
}

/// Summarize a cumulative series. Returns `None` for an empty series.
pub fn summarize(label: &str, cumulative: &TimeSeries) -> Option<LocationSummary> {
    let (latest_date, total) = cumulative.last()?;
    let deltas = daily_deltas(cumulative);

    let latest_new = deltas.last().map(|(_, v)| v).unwrap_or(0.0);
    let tail_len = deltas.len().min(7);
    let week_avg_new = if tail_len == 0 {
        0.0
    } else {
        let tail = &deltas.points()[deltas.len() - tail_len..];
        tail.iter().map(|&(_, v)| v).sum::<f64>() / tail_len as f64
    };

    Some(LocationSummary {
        label: label.to_string(),
        latest_date,
        total,
        latest_new,
        week_avg_new,
    })
}

/// One line per location, e.g.
/// `Alabama: 20 total cases as of 2020-01-25. Latest new: +5. 7 day avg: 3.3/day.`
pub fn format_summary(summary: &LocationSummary, kind: DataKind) -> String {
    format!(
        "{}: {:.0} total {} as of {}. Latest new: {:+.0}. 7 day avg: {:.1}/day.",
        summary.label,
        summary.total,
        kind.name(),
        summary.latest_date,
        summary.latest_new,
        summary.week_avg_new,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        TimeSeries::from_sorted(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + chrono::Duration::days(i as i64), v))
                .collect(),
        )
    }

    #[test]
    fn summary_reports_latest_and_average() {
        let s = summarize("Alabama", &series(&[10.0, 15.0, 15.0, 20.0])).unwrap();
        assert_eq!(s.total, 20.0);
        assert_eq!(s.latest_new, 5.0);
        // Deltas are [5, 0, 5]; fewer than 7 days just averages what exists.
        assert!((s.week_avg_new - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.latest_date, NaiveDate::from_ymd_opt(2020, 1, 25).unwrap());
    }

    #[test]
    fn week_average_uses_only_the_trailing_week() {
        // 10 days of cumulative counts rising by 1/day, then by 8/day.
        let values: Vec<f64> = (0..10)
            .map(|i| if i < 5 { i as f64 } else { 4.0 + 8.0 * (i - 4) as f64 })
            .collect();
        let s = summarize("x", &series(&values)).unwrap();
        // 9 deltas total [1,1,1,1,8,8,8,8,8]; the trailing 7 average to 6.
        assert!((s.week_avg_new - 6.0).abs() < 1e-12);
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(summarize("x", &series(&[])).is_none());
    }

    #[test]
    fn single_day_summary_has_zero_new() {
        let s = summarize("x", &series(&[42.0])).unwrap();
        assert_eq!(s.latest_new, 0.0);
        assert_eq!(s.week_avg_new, 0.0);
    }

    #[test]
    fn formatted_line_contains_the_numbers() {
        let s = summarize("Alabama", &series(&[10.0, 15.0, 15.0, 20.0])).unwrap();
        let line = format_summary(&s, DataKind::Cases);
        assert!(line.contains("Alabama"));
        assert!(line.contains("20 total cases"));
        assert!(line.contains("+5"));
        assert!(line.contains("3.3/day"));
    }
}
