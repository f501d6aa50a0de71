//! Line-chart rendering via `plotters`.
//!
//! Charts are single-axis time series: one PNG per metric, plus a
//! `_comparison` variant overlaying reference series from the literature.
//! Non-finite points are dropped before rendering, so the `inf` sentinel in
//! `Min Waiting Time` simply leaves gaps instead of breaking the axis.

use std::error::Error;
use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;

use crate::reference::ReferenceSeries;
use crate::table::{METRICS, MetricDef, ParkingRecord};
use crate::{ReportError, ReportResult};

const CHART_SIZE: (u32, u32) = (1024, 640);
const LABEL_AREA: u32 = 60;

/// One labeled line on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label:  String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Series { label: label.into(), points }
    }

    /// Points with a finite y value, in input order.
    pub fn finite_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|&(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }
}

/// Extract one metric column as a plottable series.
pub fn metric_series(records: &[ParkingRecord], metric: &MetricDef, label: &str) -> Series {
    let points = records
        .iter()
        .map(|r| (r.time, (metric.extract)(r)))
        .collect();
    Series::new(label, points)
}

/// Axis ranges covering every finite point across all series, with a small
/// vertical margin.  Returns `None` when no finite point exists.
pub(crate) fn axis_ranges(series: &[Series]) -> Option<((f64, f64), (f64, f64))> {
    let mut x_lo = f64::INFINITY;
    let mut x_hi = f64::NEG_INFINITY;
    let mut y_lo = f64::INFINITY;
    let mut y_hi = f64::NEG_INFINITY;
    for s in series {
        for (x, y) in s.finite_points() {
            x_lo = x_lo.min(x);
            x_hi = x_hi.max(x);
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }
    }
    if !x_lo.is_finite() {
        return None;
    }
    // Degenerate ranges (single point, constant series) still need a span.
    if x_lo == x_hi {
        x_hi = x_lo + 1.0;
    }
    let y_pad = ((y_hi - y_lo) * 0.05).max(0.1);
    Some(((x_lo, x_hi), (y_lo - y_pad, y_hi + y_pad)))
}

/// Render one line chart to `path`.  With more than one series a legend is
/// drawn; an all-empty series list yields an empty chart frame.
pub fn render_line_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    series: &[Series],
) -> ReportResult<()> {
    draw_chart(path, title, x_desc, y_desc, series)
        .map_err(|e| ReportError::Render(e.to_string()))
}

fn draw_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    series: &[Series],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let ((x_lo, x_hi), (y_lo, y_hi)) =
        axis_ranges(series).unwrap_or(((0.0, 1.0), (0.0, 1.0)));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let points = s.finite_points();
        if points.is_empty() {
            continue;
        }
        let color = Palette99::pick(i).mix(0.9);
        let drawn = chart.draw_series(LineSeries::new(points, &color))?;
        if series.len() > 1 {
            drawn
                .label(s.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

// ── Chart batches ─────────────────────────────────────────────────────────────

/// Render one chart per metric column into `out_dir` (`<slug>.png`).
pub fn render_metric_charts(
    records: &[ParkingRecord],
    out_dir: &Path,
) -> ReportResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut rendered = Vec::with_capacity(METRICS.len());
    for metric in &METRICS {
        let path = out_dir.join(format!("{}.png", metric.slug));
        let series = metric_series(records, metric, metric.title);
        render_line_chart(&path, metric.title, "Time (s)", metric.y_desc, &[series])?;
        rendered.push(path);
    }
    info!("rendered {} metric charts into {}", rendered.len(), out_dir.display());
    Ok(rendered)
}

/// Reference series whose `metric` names the given column header.
pub(crate) fn references_for<'a>(
    references: &'a [ReferenceSeries],
    metric_title: &str,
) -> Vec<&'a ReferenceSeries> {
    references.iter().filter(|r| r.metric == metric_title).collect()
}

/// Render `<slug>_comparison.png` for every metric that has at least one
/// matching reference series; metrics without references are skipped.
pub fn render_comparison_charts(
    records: &[ParkingRecord],
    references: &[ReferenceSeries],
    out_dir: &Path,
) -> ReportResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut rendered = Vec::new();
    for metric in &METRICS {
        let matched = references_for(references, metric.title);
        if matched.is_empty() {
            continue;
        }
        let mut series = vec![metric_series(records, metric, "This Simulation")];
        for reference in matched {
            series.push(Series::new(reference.label.clone(), reference.points()));
        }
        let path = out_dir.join(format!("{}_comparison.png", metric.slug));
        render_line_chart(&path, metric.title, "Time (s)", metric.y_desc, &series)?;
        rendered.push(path);
    }
    info!(
        "rendered {} comparison charts into {}",
        rendered.len(),
        out_dir.display()
    );
    Ok(rendered)
}
