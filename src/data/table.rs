//! Wide-CSV parsing and location resolution.
//!
//! The upstream feed is one row per county with one column per date. This
//! module turns that into a clean table keyed by state name and FIPS code:
//!
//! - identifying/geographic metadata columns (UID, iso2, Admin2, Lat, ...)
//!   are dropped; only `Province_State`, `FIPS`, and the date columns survive
//! - rows whose FIPS is missing, non-numeric, or a synthetic
//!   "unassigned"/"out of state" code (>= 80000) are excluded
//! - state names are lowercased so matching is case-insensitive
//!
//! The table can then be reshaped into long `(date, state, fips, value)`
//! observations and aggregated for a requested location.

use std::collections::BTreeMap;
use std::io;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use itertools::Itertools;

use crate::domain::{FIPS_SYNTHETIC_MIN, Location, TimeSeries};
use crate::error::PlotError;

/// Date format of the feed's column headers, e.g. `1/22/20`.
const HEADER_DATE_FORMAT: &str = "%m/%d/%y";

const STATE_COLUMN: &str = "Province_State";
const FIPS_COLUMN: &str = "FIPS";

/// One long-form observation produced by `CaseTable::melt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    pub date: NaiveDate,
    pub state: &'a str,
    pub fips: u32,
    pub value: f64,
}

/// A cleaned cumulative-count table: one row per county, one value per date.
#[derive(Debug, Clone)]
pub struct CaseTable {
    dates: Vec<NaiveDate>,
    rows: Vec<CountyRow>,
}

#[derive(Debug, Clone)]
struct CountyRow {
    /// Lowercased state name.
    state: String,
    fips: u32,
    /// Aligned with `CaseTable::dates`.
    values: Vec<f64>,
}

impl CaseTable {
    /// Parse a wide CSV from any reader.
    ///
    /// Column layout is discovered from the header row: `Province_State` and
    /// `FIPS` are matched by name, every header that parses as a `%m/%d/%y`
    /// date is a date column, and everything else is dropped. Cells beyond
    /// the FIPS filter are taken leniently; an unparseable count reads as 0.
    pub fn from_reader(reader: impl io::Read) -> Result<CaseTable, PlotError> {
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| PlotError::csv(format!("failed to read headers: {e}")))?
            .clone();

        let state_idx = headers
            .iter()
            .position(|h| h == STATE_COLUMN)
            .ok_or_else(|| PlotError::csv(format!("missing '{STATE_COLUMN}' column")))?;
        let fips_idx = headers
            .iter()
            .position(|h| h == FIPS_COLUMN)
            .ok_or_else(|| PlotError::csv(format!("missing '{FIPS_COLUMN}' column")))?;

        let mut date_cols: Vec<(usize, NaiveDate)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| {
                NaiveDate::parse_from_str(h, HEADER_DATE_FORMAT)
                    .ok()
                    .map(|d| (idx, d))
            })
            .collect();
        if date_cols.is_empty() {
            return Err(PlotError::csv("no date columns in header row"));
        }
        date_cols.sort_by_key(|&(_, d)| d);

        let dates: Vec<NaiveDate> = date_cols.iter().map(|&(_, d)| d).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| PlotError::csv(format!("bad record: {e}")))?;

            let Some(fips) = parse_fips(record.get(fips_idx).unwrap_or("")) else {
                continue;
            };
            if fips >= FIPS_SYNTHETIC_MIN {
                continue;
            }
            let state = record.get(state_idx).unwrap_or("").to_lowercase();

            let values = date_cols
                .iter()
                .map(|&(idx, _)| parse_count(record.get(idx).unwrap_or("")))
                .collect();

            rows.push(CountyRow {
                state,
                fips,
                values,
            });
        }

        Ok(CaseTable { dates, rows })
    }

    /// Ascending column dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of retained county rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Distinct lowercased state names, sorted.
    pub fn states(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.state.as_str())
            .unique()
            .sorted()
            .collect()
    }

    /// Reshape into long-form observations: one `(date, state, fips, value)`
    /// row per county per date.
    pub fn melt(&self) -> impl Iterator<Item = Observation<'_>> + '_ {
        self.rows.iter().flat_map(move |row| {
            self.dates
                .iter()
                .zip(row.values.iter())
                .map(move |(&date, &value)| Observation {
                    date,
                    state: &row.state,
                    fips: row.fips,
                    value,
                })
        })
    }

    /// Resolve a location to its cumulative series.
    ///
    /// `National` sums all rows per date; `State` sums that state's counties
    /// per date; `County` returns the county row unaggregated. An unknown
    /// state name or FIPS code is `PlotError::UnknownLocation`.
    pub fn series_for(&self, location: &Location) -> Result<TimeSeries, PlotError> {
        match location {
            Location::National => Ok(self.sum_observations(|_| true)),
            Location::State(name) => {
                if !self.rows.iter().any(|r| r.state == *name) {
                    return Err(PlotError::UnknownLocation {
                        given: location.describe(),
                    });
                }
                Ok(self.sum_observations(|obs| obs.state == name))
            }
            Location::County(fips) => {
                let row = self
                    .rows
                    .iter()
                    .find(|r| r.fips == *fips)
                    .ok_or_else(|| PlotError::UnknownLocation {
                        given: location.describe(),
                    })?;
                Ok(TimeSeries::from_sorted(
                    self.dates
                        .iter()
                        .copied()
                        .zip(row.values.iter().copied())
                        .collect(),
                ))
            }
        }
    }

    fn sum_observations(&self, keep: impl Fn(&Observation<'_>) -> bool) -> TimeSeries {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for obs in self.melt().filter(|o| keep(o)) {
            *by_date.entry(obs.date).or_insert(0.0) += obs.value;
        }
        TimeSeries::from_map(by_date)
    }
}

/// FIPS cells are float-formatted in the feed (`"1001.0"`); empty or
/// non-numeric cells mean the row has no usable county code.
fn parse_fips(cell: &str) -> Option<u32> {
    if cell.is_empty() {
        return None;
    }
    let v = cell.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 {
        Some(v as u32)
    } else {
        None
    }
}

fn parse_count(cell: &str) -> f64 {
    cell.parse::<f64>().unwrap_or(0.0)
}
