//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fetch/resolve/transform pipeline per location
//! - renders the chart or prints the report
//! - writes optional exports

use clap::Parser;
use plotters::prelude::*;

use crate::cli::{Command, PlotArgs, ReportArgs};
use crate::data::CsseClient;
use crate::domain::{Location, PlotConfig, PlotStyle};
use crate::error::PlotError;
use crate::trend::ChangepointTrend;

pub mod pipeline;

/// Entry point for the `cvt` binary.
pub fn run() -> Result<(), PlotError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Plot(args) => handle_plot(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_plot(args: PlotArgs) -> Result<(), PlotError> {
    let config = plot_config_from_args(&args);
    let client = CsseClient::new();
    let fitter = ChangepointTrend::default();

    let prepared = pipeline::prepare_all(
        &client,
        &config.locations,
        config.data_kind,
        config.series_kind,
        &fitter,
    )?;

    let root = BitMapBackend::new(&config.out, (config.chart_width, config.chart_height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::render(e.to_string()))?;
    crate::plot::draw_lines(&root, &config.caption(), &prepared, &config.style)?;
    root.present()
        .map_err(|e| PlotError::io(format!("Failed to write '{}': {e}", config.out.display())))?;
    println!("Wrote {}", config.out.display());

    if let Some(path) = &config.export_csv {
        crate::io::write_series_csv(path, &prepared)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_series_json(path, &prepared, config.data_kind, config.series_kind)?;
    }

    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<(), PlotError> {
    let locations: Vec<Location> = args.locations.iter().map(|s| Location::parse(s)).collect();
    let client = CsseClient::new();
    let fitter = ChangepointTrend::default();

    let prepared = pipeline::prepare_all(
        &client,
        &locations,
        args.data,
        crate::domain::SeriesKind::Cumulative,
        &fitter,
    )?;

    for loc in &prepared {
        if let Some(summary) = crate::report::summarize(&loc.label, &loc.series) {
            println!("{}", crate::report::format_summary(&summary, args.data));
        }
    }

    Ok(())
}

pub fn plot_config_from_args(args: &PlotArgs) -> PlotConfig {
    PlotConfig {
        locations: args.locations.iter().map(|s| Location::parse(s)).collect(),
        data_kind: args.data,
        series_kind: args.series,
        style: PlotStyle {
            legend: !args.no_legend,
            line_width: args.line_width,
            line_style: args.line_style,
            legend_font_size: args.legend_font_size,
            colors: args.colors.clone(),
        },
        out: args.out.clone(),
        chart_width: args.width,
        chart_height: args.height,
        title: args.title.clone(),
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataKind, LineStyle, SeriesKind};
    use clap::Parser;

    #[test]
    fn config_carries_parsed_locations_and_style() {
        let cli = crate::cli::Cli::try_parse_from([
            "cvt",
            "plot",
            "-l",
            "us",
            "-l",
            "42003",
            "-s",
            "new",
            "--no-legend",
            "--line-style",
            "dashed",
        ])
        .unwrap();
        let Command::Plot(args) = cli.command else {
            panic!("expected plot subcommand");
        };

        let config = plot_config_from_args(&args);
        assert_eq!(
            config.locations,
            vec![Location::National, Location::County(42003)]
        );
        assert_eq!(config.data_kind, DataKind::Cases);
        assert_eq!(config.series_kind, SeriesKind::New);
        assert!(!config.style.legend);
        assert_eq!(config.style.line_style, LineStyle::Dashed);
        assert_eq!(config.caption(), "Daily new cases");
    }
}
