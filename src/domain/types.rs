//! Shared domain types.
//!
//! These types are intentionally lightweight and (where useful) serializable
//! so they can be:
//!
//! - used in-memory while resolving and transforming series
//! - exported to JSON/CSV
//! - parsed once at the CLI boundary and passed around by value

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::series::TimeSeries;
use crate::error::PlotError;

/// County FIPS codes at or above this value denote the synthetic
/// "unassigned" / "out of state" rows in the upstream feed and are excluded.
pub const FIPS_SYNTHETIC_MIN: u32 = 80_000;

/// Which upstream time-series feed to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Cases,
    Deaths,
}

impl DataKind {
    /// Lowercase name used in labels and exports.
    pub fn name(self) -> &'static str {
        match self {
            DataKind::Cases => "cases",
            DataKind::Deaths => "deaths",
        }
    }
}

impl FromStr for DataKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cases" => Ok(DataKind::Cases),
            "deaths" => Ok(DataKind::Deaths),
            _ => Err(PlotError::InvalidDataKind { given: s.to_string() }),
        }
    }
}

/// How the aggregated cumulative series is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// The raw cumulative counts.
    Cumulative,
    /// Day-over-day differences of the cumulative counts.
    New,
    /// Smoothed trend of the day-over-day differences.
    Trend,
}

impl SeriesKind {
    pub fn name(self) -> &'static str {
        match self {
            SeriesKind::Cumulative => "cumulative",
            SeriesKind::New => "new",
            SeriesKind::Trend => "trend",
        }
    }
}

impl FromStr for SeriesKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cumulative" => Ok(SeriesKind::Cumulative),
            "new" => Ok(SeriesKind::New),
            "trend" => Ok(SeriesKind::Trend),
            _ => Err(PlotError::InvalidSeriesKind { given: s.to_string() }),
        }
    }
}

/// A requested geographic location, resolved once at the call boundary.
///
/// Resolution against the *downloaded table* (does this state/county exist?)
/// happens later and can fail with `PlotError::UnknownLocation`; parsing the
/// user's text into a variant cannot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// Full national aggregate (`us` / `usa` / `america`).
    National,
    /// A state, matched case-insensitively; stored lowercase.
    State(String),
    /// A county FIPS code.
    County(u32),
}

impl Location {
    /// Parse user text into a location variant.
    ///
    /// All-digit input is a county FIPS code; the national aliases map to
    /// `National`; everything else is treated as a (lowercased) state name.
    pub fn parse(input: &str) -> Location {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(fips) = trimmed.parse::<u32>() {
                return Location::County(fips);
            }
        }
        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "us" | "usa" | "america" => Location::National,
            _ => Location::State(lower),
        }
    }

    /// Chart label: capitalized state name, `US` for the national aggregate,
    /// the bare code for a county.
    pub fn label(&self) -> String {
        match self {
            Location::National => "US".to_string(),
            Location::State(name) => capitalize(name),
            Location::County(fips) => fips.to_string(),
        }
    }

    /// The original-ish user input, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Location::National => "us".to_string(),
            Location::State(name) => name.clone(),
            Location::County(fips) => fips.to_string(),
        }
    }
}

/// Uppercase the first character, leaving the rest as-is.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Chart line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// An RGB color for chart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Result<Rgb, String> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{s}': expected #rrggbb"));
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|e| e.to_string())?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|e| e.to_string())?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|e| e.to_string())?;
        Ok(Rgb(r, g, b))
    }
}

/// A resolved location together with its prepared series and chart label.
///
/// This is what the pipeline hands to the renderer and the exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedSeries {
    pub location: Location,
    pub label: String,
    pub series: TimeSeries,
}

/// Per-call presentation options for the render step.
///
/// Legend font size lives here, not in process-global styling state: two
/// calls with different options never interfere.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Draw a legend box.
    pub legend: bool,
    /// Line stroke width in pixels.
    pub line_width: u32,
    pub line_style: LineStyle,
    /// Legend label font size in points.
    pub legend_font_size: u32,
    /// Color cycle, assigned round-robin per location. Empty means "use the
    /// built-in palette".
    pub colors: Vec<Rgb>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            legend: true,
            line_width: 2,
            line_style: LineStyle::Solid,
            legend_font_size: 18,
            colors: Vec::new(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub locations: Vec<Location>,
    pub data_kind: DataKind,
    pub series_kind: SeriesKind,
    pub style: PlotStyle,

    /// Output PNG path.
    pub out: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Chart caption; a default is derived from the selectors when absent.
    pub title: Option<String>,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl PlotConfig {
    /// Caption for the chart: the explicit title, or `"New cases"` style text
    /// derived from the selectors.
    pub fn caption(&self) -> String {
        match &self.title {
            Some(t) => t.clone(),
            None => match self.series_kind {
                SeriesKind::Cumulative => format!("Cumulative {}", self.data_kind.name()),
                SeriesKind::New => format!("Daily new {}", self.data_kind.name()),
                SeriesKind::Trend => format!("Trend of daily new {}", self.data_kind.name()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parse_national_aliases() {
        for alias in ["us", "US", "Usa", "AMERICA"] {
            assert_eq!(Location::parse(alias), Location::National);
        }
    }

    #[test]
    fn location_parse_is_case_insensitive_for_states() {
        let a = Location::parse("California");
        let b = Location::parse("california");
        let c = Location::parse("CALIFORNIA");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, Location::State("california".to_string()));
    }

    #[test]
    fn location_parse_digits_are_fips() {
        assert_eq!(Location::parse("42003"), Location::County(42003));
        assert_eq!(Location::parse(" 1001 "), Location::County(1001));
    }

    #[test]
    fn location_labels_are_capitalized() {
        assert_eq!(Location::parse("new york").label(), "New york");
        assert_eq!(Location::National.label(), "US");
        assert_eq!(Location::County(42003).label(), "42003");
    }

    #[test]
    fn selector_parsing_rejects_unknown_text() {
        assert!(matches!(
            "foobar".parse::<DataKind>(),
            Err(PlotError::InvalidDataKind { .. })
        ));
        assert!(matches!(
            "foobar".parse::<SeriesKind>(),
            Err(PlotError::InvalidSeriesKind { .. })
        ));
        assert_eq!("Deaths".parse::<DataKind>().unwrap(), DataKind::Deaths);
        assert_eq!("TREND".parse::<SeriesKind>().unwrap(), SeriesKind::Trend);
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(Rgb::parse_hex("#ff8000").unwrap(), Rgb(255, 128, 0));
        assert_eq!(Rgb::parse_hex("0000ff").unwrap(), Rgb(0, 0, 255));
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("zzzzzz").is_err());
    }
}
