//! External reference series for chart overlays.
//!
//! Comparison values from the literature used to be literal arrays inside
//! the plotting script; they now live in a JSON file read at report time, so
//! swapping comparison data never touches code:
//!
//! ```json
//! [
//!   {
//!     "label":  "Paper 1",
//!     "metric": "Parking Utilization",
//!     "time":   [0, 1000, 2000],
//!     "values": [0.1, 0.3, 0.5]
//!   }
//! ]
//! ```
//!
//! `metric` matches a parking-table column header.  These series exist only
//! for overlay; they have no relation to live data.

use std::path::Path;

use serde::Deserialize;

use crate::{ReportError, ReportResult};

/// One literature series for one metric.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReferenceSeries {
    pub label:  String,
    pub metric: String,
    pub time:   Vec<f64>,
    pub values: Vec<f64>,
}

impl ReferenceSeries {
    /// Paired `(time, value)` points.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.time.iter().copied().zip(self.values.iter().copied()).collect()
    }
}

/// Load reference series from a JSON file, validating series lengths.
pub fn load_references(path: &Path) -> ReportResult<Vec<ReferenceSeries>> {
    let text = std::fs::read_to_string(path)?;
    parse_references(&text)
}

/// Like [`load_references`] but from a string.
pub fn parse_references(text: &str) -> ReportResult<Vec<ReferenceSeries>> {
    let series: Vec<ReferenceSeries> = serde_json::from_str(text)?;
    for s in &series {
        if s.time.len() != s.values.len() {
            return Err(ReportError::Parse(format!(
                "reference series {:?} for {:?}: {} time points but {} values",
                s.label,
                s.metric,
                s.time.len(),
                s.values.len()
            )));
        }
    }
    Ok(series)
}
