//! `tsh-report` — offline chart rendering from finalized telemetry tables.
//!
//! Reporting is a separate invocation from the run: it reads a parking
//! telemetry CSV (and optionally an external JSON file of reference series
//! from the literature), then renders one single-axis line chart per metric.
//! No computation happens here beyond what is already in the table.
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`table`]     | [`ParkingRecord`], CSV loading, metric definitions   |
//! | [`reference`] | [`ReferenceSeries`], JSON loading                    |
//! | [`chart`]     | [`Series`], line-chart rendering, chart batches      |
//! | [`error`]     | `ReportError`, `ReportResult`                        |

pub mod chart;
pub mod error;
pub mod reference;
pub mod table;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use chart::{Series, render_comparison_charts, render_line_chart, render_metric_charts};
pub use error::{ReportError, ReportResult};
pub use reference::{ReferenceSeries, load_references};
pub use table::{METRICS, MetricDef, ParkingRecord, load_parking_table};
