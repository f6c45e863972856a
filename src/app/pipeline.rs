//! Shared fetch → resolve → transform pipeline used by both subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! download table -> resolve location -> difference/fit -> labeled series
//!
//! The subcommands then focus on presentation (chart rendering vs printing).

use crate::data::table::CaseTable;
use crate::data::CsseClient;
use crate::domain::{DataKind, Location, LocatedSeries, SeriesKind, daily_deltas};
use crate::error::PlotError;
use crate::trend::TrendFitter;

/// Anything that can produce a cumulative-count table for a data kind.
///
/// The real implementation downloads from the CSSE feeds; tests substitute a
/// fixed in-memory table.
pub trait TableSource {
    fn table(&self, kind: DataKind) -> Result<CaseTable, PlotError>;
}

impl TableSource for CsseClient {
    fn table(&self, kind: DataKind) -> Result<CaseTable, PlotError> {
        self.fetch_table(kind)
    }
}

/// Prepare one location: fetch, resolve, and apply the presentation.
///
/// Each call performs its own fetch; nothing is cached between locations or
/// calls, even when consecutive locations use the same data kind.
pub fn prepare_location(
    source: &dyn TableSource,
    location: &Location,
    data_kind: DataKind,
    series_kind: SeriesKind,
    fitter: &dyn TrendFitter,
) -> Result<LocatedSeries, PlotError> {
    let table = source.table(data_kind)?;
    prepare_from_table(&table, location, series_kind, fitter)
}

/// The fetch-free tail of `prepare_location`.
pub fn prepare_from_table(
    table: &CaseTable,
    location: &Location,
    series_kind: SeriesKind,
    fitter: &dyn TrendFitter,
) -> Result<LocatedSeries, PlotError> {
    let cumulative = table.series_for(location)?;
    let series = match series_kind {
        SeriesKind::Cumulative => cumulative,
        SeriesKind::New => daily_deltas(&cumulative),
        SeriesKind::Trend => fitter.fit_trend(&daily_deltas(&cumulative))?,
    };
    Ok(LocatedSeries {
        label: location.label(),
        location: location.clone(),
        series,
    })
}

/// Prepare every location, strictly in list order.
///
/// The first failure aborts the whole batch. Callers that would rather keep
/// going past a bad location can loop over `prepare_location` themselves and
/// handle each result.
pub fn prepare_all(
    source: &dyn TableSource,
    locations: &[Location],
    data_kind: DataKind,
    series_kind: SeriesKind,
    fitter: &dyn TrendFitter,
) -> Result<Vec<LocatedSeries>, PlotError> {
    locations
        .iter()
        .map(|loc| prepare_location(source, loc, data_kind, series_kind, fitter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeSeries;
    use crate::trend::ChangepointTrend;

    const WIDE_CSV: &str = "\
UID,FIPS,Province_State,1/22/20,1/23/20,1/24/20,1/25/20
84001001,1001.0,Alabama,10,15,15,20
84006037,6037.0,California,5,6,7,8
";

    struct FixedTable(CaseTable);

    impl TableSource for FixedTable {
        fn table(&self, _kind: DataKind) -> Result<CaseTable, PlotError> {
            Ok(self.0.clone())
        }
    }

    /// Identity smoother, used to observe exactly what the trend path feeds
    /// into the fitter.
    struct PassThrough;

    impl TrendFitter for PassThrough {
        fn fit_trend(&self, series: &TimeSeries) -> Result<TimeSeries, PlotError> {
            Ok(series.clone())
        }
    }

    fn source() -> FixedTable {
        FixedTable(CaseTable::from_reader(WIDE_CSV.as_bytes()).unwrap())
    }

    #[test]
    fn cumulative_presentation_is_the_raw_series() {
        let prepared = prepare_location(
            &source(),
            &Location::County(1001),
            DataKind::Cases,
            SeriesKind::Cumulative,
            &PassThrough,
        )
        .unwrap();

        let values: Vec<f64> = prepared.series.values().collect();
        assert_eq!(values, vec![10.0, 15.0, 15.0, 20.0]);
        assert_eq!(prepared.label, "1001");
    }

    #[test]
    fn new_presentation_differences_the_series() {
        let prepared = prepare_location(
            &source(),
            &Location::County(1001),
            DataKind::Cases,
            SeriesKind::New,
            &PassThrough,
        )
        .unwrap();

        let values: Vec<f64> = prepared.series.values().collect();
        assert_eq!(values, vec![5.0, 0.0, 5.0]);
    }

    #[test]
    fn trend_presentation_fits_the_differenced_series() {
        // With the identity smoother the result must equal the deltas,
        // proving the fitter sees daily new counts, not cumulative ones.
        let prepared = prepare_location(
            &source(),
            &Location::County(1001),
            DataKind::Cases,
            SeriesKind::Trend,
            &PassThrough,
        )
        .unwrap();

        let values: Vec<f64> = prepared.series.values().collect();
        assert_eq!(values, vec![5.0, 0.0, 5.0]);
    }

    #[test]
    fn trend_presentation_smooths_with_the_real_fitter() {
        let prepared = prepare_location(
            &source(),
            &Location::State("alabama".to_string()),
            DataKind::Cases,
            SeriesKind::Trend,
            &ChangepointTrend::default(),
        )
        .unwrap();

        // Deltas have 3 points; the trend shares their date domain.
        assert_eq!(prepared.series.len(), 3);
    }

    #[test]
    fn a_bad_location_aborts_the_whole_batch() {
        let locations = vec![
            Location::State("alabama".to_string()),
            Location::State("atlantis".to_string()),
            Location::State("california".to_string()),
        ];
        let err = prepare_all(
            &source(),
            &locations,
            DataKind::Cases,
            SeriesKind::Cumulative,
            &PassThrough,
        )
        .unwrap_err();

        assert!(matches!(err, PlotError::UnknownLocation { .. }));
    }

    #[test]
    fn batch_preserves_caller_order() {
        let locations = vec![Location::National, Location::County(6037)];
        let prepared = prepare_all(
            &source(),
            &locations,
            DataKind::Cases,
            SeriesKind::Cumulative,
            &PassThrough,
        )
        .unwrap();

        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].label, "US");
        assert_eq!(prepared[1].label, "6037");
        // National sums every county row.
        assert_eq!(prepared[0].series.first().unwrap().1, 15.0);
    }
}
