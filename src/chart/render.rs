// src/chart/render.rs
//
// Two stacked panels over a shared time axis:
//   top    glucose per event group + reference bands + legend
//   bottom weight + least-squares trend
// X is measured in days since the epoch so ticks fall on midnights.

use std::{error::Error, ops::Range};

use chrono::{DateTime, NaiveDateTime};
use plotters::coord::combinators::BindKeyPoints;
use plotters::prelude::*;

use crate::config::consts::{AXIS_MARGIN, CHART_TITLE, HIGH_BAND, NORMAL_BAND};
use crate::readings::trend::ordinal;
use crate::readings::{ParseError, Readings, TrendLine, group_by_event};

use super::ChartImage;

const SECS_PER_DAY: f64 = 86_400.0;

/// A shaded horizontal range across the whole time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    /// Cycled per event group; more groups than entries reuse colors.
    pub palette: Vec<RGBColor>,
    pub bands: Vec<Band>,
    pub band_alpha: f64,
    pub weight_color: RGBColor,
    pub trend_color: RGBColor,
    /// Fraction of the data span added on each side of both axes.
    pub margin: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: s!(CHART_TITLE),
            palette: vec![
                RGBColor(0, 0, 255),
                RGBColor(0xee, 0x76, 0x00),
                RGBColor(255, 0, 255),
                RGBColor(0, 128, 0),
            ],
            bands: vec![
                Band { low: HIGH_BAND.0, high: HIGH_BAND.1, color: RGBColor(255, 0, 0) },
                Band { low: NORMAL_BAND.0, high: NORMAL_BAND.1, color: RGBColor(0, 128, 0) },
            ],
            band_alpha: 0.1,
            weight_color: RGBColor(0, 0, 0),
            trend_color: RGBColor(0x80, 0x80, 0x80),
            margin: AXIS_MARGIN,
        }
    }
}

impl ChartStyle {
    pub fn series_color(&self, idx: usize) -> RGBColor {
        if self.palette.is_empty() {
            return BLACK;
        }
        self.palette[idx % self.palette.len()]
    }
}

pub fn day_number(t: NaiveDateTime) -> f64 {
    ordinal(t) / SECS_PER_DAY
}

/// Tick label as month/day, e.g. `1/02`.
pub fn day_label(x: &f64) -> String {
    DateTime::from_timestamp((x * SECS_PER_DAY).round() as i64, 0)
        .map(|d| d.format("%-m/%d").to_string())
        .unwrap_or_default()
}

/// `lo..hi` widened by `margin` of its span; a zero span widens by `flat` instead.
pub fn padded(lo: f64, hi: f64, margin: f64, flat: f64) -> Range<f64> {
    let span = hi - lo;
    if span > 0.0 {
        let pad = span * margin;
        (lo - pad)..(hi + pad)
    } else {
        (lo - flat)..(hi + flat)
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Every midnight inside `x`, one tick per day.
fn day_ticks(x: &Range<f64>) -> Vec<f64> {
    let (first, last) = (x.start.ceil() as i64, x.end.floor() as i64);
    (first..=last).map(|d| d as f64).collect()
}

/// Glucose axis extent: the readings plus every band, so all bands show.
fn glucose_extent(readings: &Readings, bands: &[Band]) -> Option<(f64, f64)> {
    let values = readings.glucose.iter().map(|g| g.concentration);
    value_range(values.chain(bands.iter().flat_map(|b| [b.low, b.high])))
}

pub fn render(
    readings: &Readings,
    trend: &TrendLine,
    style: &ChartStyle,
    width: u32,
    height: u32,
) -> Result<ChartImage, Box<dyn Error>> {
    let mut image = ChartImage::blank(width, height);
    draw(&mut image.rgb, (width, height), readings, trend, style)?;
    logd!("Rendered chart {}x{}", width, height);
    Ok(image)
}

fn draw(
    buf: &mut [u8],
    size: (u32, u32),
    readings: &Readings,
    trend: &TrendLine,
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>> {
    let (first, last) = readings.time_span().ok_or(ParseError::NoReadings("Weight"))?;
    let x_range = padded(day_number(first), day_number(last), style.margin, 0.5);
    let ticks = day_ticks(&x_range);
    let n_ticks = ticks.len();

    let root = BitMapBackend::with_buffer(buf, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&style.title, ("sans-serif", 26))?;
    let panels = root.split_evenly((2, 1));

    // Glucose
    let (g_lo, g_hi) = glucose_extent(readings, &style.bands).unwrap_or((NORMAL_BAND.0, HIGH_BAND.1));
    let g_range = padded(g_lo, g_hi, style.margin, 10.0);
    let mut upper = ChartBuilder::on(&panels[0])
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone().with_key_points(ticks.clone()), g_range)?;
    upper
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n_ticks)
        .x_label_formatter(&day_label)
        .y_desc("Concentration (mg/dL)")
        .draw()?;

    for band in &style.bands {
        upper.draw_series(std::iter::once(Rectangle::new(
            [(x_range.start, band.low), (x_range.end, band.high)],
            band.color.mix(style.band_alpha).filled(),
        )))?;
    }

    let groups = group_by_event(&readings.glucose);
    for (i, group) in groups.iter().enumerate() {
        let color = style.series_color(i);
        let points: Vec<(f64, f64)> = group
            .readings
            .iter()
            .map(|r| (day_number(r.at), r.concentration))
            .collect();
        upper
            .draw_series(LineSeries::new(points, color.stroke_width(1)).point_size(3))?
            .label(group.event)
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (20, 0)], color.stroke_width(2))
                    + Circle::new((10, 0), 3, color.filled())
            });
    }
    if !groups.is_empty() {
        upper
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    // Weight + trend
    let w_values = readings
        .weight
        .iter()
        .map(|w| w.weight)
        .chain(trend.points.iter().map(|p| p.1));
    let (w_lo, w_hi) = value_range(w_values).ok_or(ParseError::NoReadings("Weight"))?;
    let mut lower = ChartBuilder::on(&panels[1])
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone().with_key_points(ticks), padded(w_lo, w_hi, style.margin, 1.0))?;
    lower
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n_ticks)
        .x_label_formatter(&day_label)
        .y_desc("Weight (lbs)")
        .draw()?;

    let weight_points: Vec<(f64, f64)> = readings
        .weight
        .iter()
        .map(|w| (day_number(w.at), w.weight))
        .collect();
    lower.draw_series(LineSeries::new(weight_points, style.weight_color.stroke_width(1)).point_size(3))?;
    lower.draw_series(DashedLineSeries::new(
        trend.points.iter().map(|&(t, y)| (day_number(t), y)),
        4,
        4,
        style.trend_color.stroke_width(1),
    ))?;

    root.present()?;
    Ok(())
}
