//! PNG price charts on a day-ordinal x axis.

use chrono::NaiveDate;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::config::ChartConfig;
use crate::core::io::{date_from_ordinal, format_day};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to draw")]
    NoData,

    #[error("cannot create chart directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing failed: {0}")]
    Drawing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    /// Thick line through filled points; observed or fitted values.
    Line,
    /// Thin line through hollow points; values past the observed data.
    Projection,
    /// Unconnected filled points.
    Markers,
    /// Unconnected upward triangles.
    Triangles,
}

#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub style: SeriesStyle,
}

impl ChartSeries {
    pub fn new(points: Vec<(f64, f64)>, color: RGBColor, style: SeriesStyle) -> Self {
        Self {
            label: None,
            points,
            color,
            style,
        }
    }

    /// Pair up `x` and `y`; the shorter slice decides the length.
    pub fn from_xy(x: &[f64], y: &[f64], color: RGBColor, style: SeriesStyle) -> Self {
        Self::new(x.iter().copied().zip(y.iter().copied()).collect(), color, style)
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// OHLC candles; rising candles are drawn hollow when `hollow_rising` is set.
#[derive(Debug, Clone)]
pub struct Candles {
    pub x: Vec<f64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub rising: RGBColor,
    pub falling: RGBColor,
    pub hollow_rising: bool,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    /// Date that x = 0 stands for.
    pub origin: NaiveDate,
    pub candles: Option<Candles>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>, origin: NaiveDate) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            origin,
            candles: None,
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_candles(mut self, candles: Candles) -> Self {
        self.candles = Some(candles);
        self
    }
}

/// `Trading Days From 28 Jan 2011 To 31 Mar 2011`
pub fn trading_days_caption(first: NaiveDate, last: NaiveDate) -> String {
    format!("Trading Days From {} To {}", format_day(first), format_day(last))
}

/// Padded x and y ranges covering every finite point of the chart.
pub fn plot_bounds(spec: &ChartSpec) -> Option<(Range<f64>, Range<f64>)> {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();

    for s in &spec.series {
        for &(x, y) in &s.points {
            xs.push(x);
            ys.push(y);
        }
    }
    if let Some(c) = &spec.candles {
        xs.extend_from_slice(&c.x);
        ys.extend_from_slice(&c.high);
        ys.extend_from_slice(&c.low);
    }

    let (x_min, x_max) = finite_extent(&xs)?;
    let (y_min, y_max) = finite_extent(&ys)?;

    let x_pad = ((x_max - x_min) * 0.02).max(0.5);
    let y_span = y_max - y_min;
    let y_pad = if y_span > 0.0 { y_span * 0.05 } else { 1.0 };

    Some((x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad))
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Candle body width in pixels for `count` candles on a chart `width` wide.
pub fn candle_width(width: u32, count: usize) -> u32 {
    if count == 0 {
        return 1;
    }
    ((width as f64 * 0.7) / count as f64).clamp(1.0, 20.0) as u32
}

fn drawing<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

/// Draw `spec` into a PNG at `path`, creating parent directories.
pub fn render_chart<P: AsRef<Path>>(
    path: P,
    config: &ChartConfig,
    spec: &ChartSpec,
) -> Result<(), ChartError> {
    let path = path.as_ref();
    let (x_range, y_range) = plot_bounds(spec).ok_or(ChartError::NoData)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let x_desc = {
        let first = date_from_ordinal(spec.origin, x_range.start.ceil());
        let last = date_from_ordinal(spec.origin, x_range.end.floor());
        match (first, last) {
            (Some(first), Some(last)) => trading_days_caption(first, last),
            _ => String::from("Trading Days"),
        }
    };
    let y_desc = config.y_label.clone().unwrap_or_else(|| spec.y_label.clone());

    let [r, g, b] = config.background;
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&RGBColor(r, g, b)).map_err(drawing)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", config.title_font_size as f64).into_font())
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing)?;

    let origin = spec.origin;
    let date_label = |x: &f64| {
        date_from_ordinal(origin, *x)
            .map(format_day)
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(config.x_labels)
        .y_labels(10)
        .x_label_formatter(&date_label)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(("sans-serif", config.label_font_size as f64))
        .draw()
        .map_err(drawing)?;

    if let Some(c) = &spec.candles {
        let width = candle_width(config.width, c.x.len());
        let rising = if c.hollow_rising {
            c.rising.stroke_width(1)
        } else {
            c.rising.filled()
        };
        let falling = c.falling.filled();
        chart
            .draw_series((0..c.x.len()).map(|i| {
                CandleStick::new(
                    c.x[i], c.open[i], c.high[i], c.low[i], c.close[i], rising, falling, width,
                )
            }))
            .map_err(drawing)?;
    }

    let mut labelled = false;
    for s in &spec.series {
        let color = s.color;
        let points = s.points.iter().copied().filter(|(x, y)| x.is_finite() && y.is_finite());

        let anno = match s.style {
            SeriesStyle::Line => {
                chart
                    .draw_series(points.clone().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(drawing)?;
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(3)))
                    .map_err(drawing)?
            }
            SeriesStyle::Projection => {
                chart
                    .draw_series(points.clone().map(|p| Circle::new(p, 4, color.stroke_width(2))))
                    .map_err(drawing)?;
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(1)))
                    .map_err(drawing)?
            }
            SeriesStyle::Markers => chart
                .draw_series(points.map(|p| Circle::new(p, 4, color.filled())))
                .map_err(drawing)?,
            SeriesStyle::Triangles => chart
                .draw_series(points.map(|p| TriangleMarker::new(p, 8, color.filled())))
                .map_err(drawing)?,
        };

        if let Some(label) = &s.label {
            labelled = true;
            anno.label(label.clone()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(drawing)?;
    }

    root.present().map_err(drawing)?;
    debug!(path = %path.display(), series = spec.series.len(), "chart written");
    Ok(())
}
