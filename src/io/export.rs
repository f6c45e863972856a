//! Export plotted series to CSV or JSON.
//!
//! The CSV export is long-form (`location,date,value`), easy to consume in
//! spreadsheets or downstream scripts. The JSON export is the "portable"
//! representation: run metadata plus every located series, schema defined by
//! `SeriesFile`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DataKind, LocatedSeries, SeriesKind};
use crate::error::PlotError;

/// JSON export schema: run metadata plus the prepared series per location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFile {
    pub tool: String,
    pub data: DataKind,
    pub series: SeriesKind,
    /// Date the feed was downloaded.
    pub fetched: NaiveDate,
    pub locations: Vec<LocatedSeries>,
}

/// Write long-form `location,date,value` rows.
pub fn write_series_csv(path: &Path, prepared: &[LocatedSeries]) -> Result<(), PlotError> {
    let mut file = File::create(path)
        .map_err(|e| PlotError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "location,date,value")
        .map_err(|e| PlotError::io(format!("Failed to write export CSV header: {e}")))?;

    for loc in prepared {
        for (date, value) in loc.series.points() {
            writeln!(file, "{},{},{}", loc.label, date, value)
                .map_err(|e| PlotError::io(format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Write the JSON export.
pub fn write_series_json(
    path: &Path,
    prepared: &[LocatedSeries],
    data: DataKind,
    series: SeriesKind,
) -> Result<(), PlotError> {
    let file = File::create(path)
        .map_err(|e| PlotError::io(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let out = SeriesFile {
        tool: "cvt".to_string(),
        data,
        series,
        fetched: chrono::Utc::now().date_naive(),
        locations: prepared.to_vec(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| PlotError::io(format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
