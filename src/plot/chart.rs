//! Plotters rendering of dated series onto a shared drawing area.
//!
//! The renderer is backend-generic: the CLI hands it a PNG-backed drawing
//! area, tests hand it an in-memory pixel buffer. All styling comes from the
//! per-call `PlotStyle`; nothing here touches global state.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{Palette, Palette99};

use crate::domain::{LineStyle, LocatedSeries, PlotStyle};
use crate::error::PlotError;

/// Draw one line per series onto `area`, sharing a single axis.
///
/// Colors are taken round-robin from the style's cycle (or the built-in
/// palette when the cycle is empty); the legend is optional and uses the
/// configured font size.
pub fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    lines: &[LocatedSeries],
    style: &PlotStyle,
) -> Result<(), PlotError> {
    let (x_range, y_range) = axis_ranges(lines)?;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(caption, ("sans-serif", 40))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Right, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(7)
        .x_desc("Date")
        .draw()
        .map_err(|e| PlotError::render(e.to_string()))?;

    for (i, line) in lines.iter().enumerate() {
        let shape = ShapeStyle {
            color: color_for(style, i).to_rgba(),
            filled: false,
            stroke_width: style.line_width,
        };
        let points = line.series.points().iter().copied();

        let anno = match style.line_style {
            LineStyle::Solid => chart
                .draw_series(LineSeries::new(points, shape))
                .map_err(|e| PlotError::render(e.to_string()))?,
            LineStyle::Dashed => chart
                .draw_series(DashedLineSeries::new(points, 10, 5, shape))
                .map_err(|e| PlotError::render(e.to_string()))?,
            LineStyle::Dotted => chart
                .draw_series(DashedLineSeries::new(points, 2, 4, shape))
                .map_err(|e| PlotError::render(e.to_string()))?,
        };
        anno.label(&line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], shape));
    }

    if style.legend {
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", style.legend_font_size as i32))
            .draw()
            .map_err(|e| PlotError::render(e.to_string()))?;
    }

    Ok(())
}

/// Pick the color for the i-th line: the caller's cycle if provided,
/// otherwise the built-in palette.
pub fn color_for(style: &PlotStyle, i: usize) -> RGBColor {
    if style.colors.is_empty() {
        let (r, g, b) = Palette99::COLORS[i % Palette99::COLORS.len()];
        RGBColor(r, g, b)
    } else {
        let c = style.colors[i % style.colors.len()];
        RGBColor(c.0, c.1, c.2)
    }
}

type DateRange = std::ops::Range<chrono::NaiveDate>;

fn axis_ranges(lines: &[LocatedSeries]) -> Result<(DateRange, std::ops::Range<f64>), PlotError> {
    let mut dates: Option<(chrono::NaiveDate, chrono::NaiveDate)> = None;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for line in lines {
        for &(date, value) in line.series.points() {
            dates = Some(match dates {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }

    let Some((d_lo, d_hi)) = dates else {
        return Err(PlotError::render("no points to draw"));
    };
    let d_hi = if d_lo == d_hi {
        d_hi + chrono::Duration::days(1)
    } else {
        d_hi
    };

    // Pad the value axis so lines do not sit on the frame.
    let span = y_max - y_min;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    Ok((d_lo..d_hi, (y_min - pad)..(y_max + pad)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Rgb, TimeSeries};
    use chrono::NaiveDate;

    fn line(label: &str, values: &[f64]) -> LocatedSeries {
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        LocatedSeries {
            location: Location::State(label.to_lowercase()),
            label: label.to_string(),
            series: TimeSeries::from_sorted(
                values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (start + chrono::Duration::days(i as i64), v))
                    .collect(),
            ),
        }
    }

    #[test]
    fn colors_cycle_round_robin() {
        let style = PlotStyle {
            colors: vec![Rgb(255, 0, 0), Rgb(0, 255, 0)],
            ..PlotStyle::default()
        };
        assert_eq!(color_for(&style, 0), RGBColor(255, 0, 0));
        assert_eq!(color_for(&style, 1), RGBColor(0, 255, 0));
        assert_eq!(color_for(&style, 2), RGBColor(255, 0, 0));
    }

    #[test]
    fn draws_two_lines_into_a_buffer() {
        let lines = vec![
            line("Alabama", &[1.0, 5.0, 3.0, 8.0]),
            line("California", &[2.0, 2.0, 6.0, 4.0]),
        ];
        let style = PlotStyle::default();

        let (w, h) = (400u32, 300u32);
        let mut buf = vec![0u8; (w * h * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            area.fill(&WHITE).unwrap();
            draw_lines(&area, "Daily new cases", &lines, &style).unwrap();
            area.present().unwrap();
        }

        // The backend starts zeroed; a rendered chart must have touched it.
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn empty_input_is_a_render_error() {
        let (w, h) = (100u32, 80u32);
        let mut buf = vec![0u8; (w * h * 3) as usize];
        let area = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        let err = draw_lines(&area, "empty", &[], &PlotStyle::default()).unwrap_err();
        assert!(matches!(err, PlotError::Render { .. }));
    }
}
