//! Command-line parsing for the COVID-19 series plotter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DataKind, LineStyle, Rgb, SeriesKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "cvt",
    version,
    about = "Plot COVID-19 case/death series from the JHU CSSE feeds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the selected feed and render one line per location to a PNG.
    Plot(PlotArgs),
    /// Print latest totals, new counts, and 7-day averages per location.
    Report(ReportArgs),
}

/// Options for plotting.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Location to plot: US/USA, a state name, or a county FIPS code.
    /// Repeat the flag for multiple lines.
    #[arg(short, long = "location", required = true)]
    pub locations: Vec<String>,

    /// Which feed to use.
    #[arg(short, long, value_enum, default_value_t = DataKind::Cases)]
    pub data: DataKind,

    /// How to present the series.
    #[arg(short, long, value_enum, default_value_t = SeriesKind::Cumulative)]
    pub series: SeriesKind,

    /// Output PNG path.
    #[arg(short, long, default_value = "chart.png")]
    pub out: PathBuf,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Chart title; derived from the selectors when omitted.
    #[arg(long)]
    pub title: Option<String>,

    /// Disable the legend.
    #[arg(long)]
    pub no_legend: bool,

    /// Line stroke width (pixels).
    #[arg(long, default_value_t = 2)]
    pub line_width: u32,

    /// Line style.
    #[arg(long, value_enum, default_value_t = LineStyle::Solid)]
    pub line_style: LineStyle,

    /// Legend label font size (points).
    #[arg(long, default_value_t = 18)]
    pub legend_font_size: u32,

    /// Line color as #rrggbb, assigned round-robin; repeat for a cycle.
    /// Defaults to the built-in palette.
    #[arg(long = "color", value_parser = Rgb::parse_hex)]
    pub colors: Vec<Rgb>,

    /// Export the plotted series to long-form CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the plotted series (plus run metadata) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for the terminal report.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Location to report on; repeatable.
    #[arg(short, long = "location", required = true)]
    pub locations: Vec<String>,

    /// Which feed to use.
    #[arg(short, long, value_enum, default_value_t = DataKind::Cases)]
    pub data: DataKind,
}
