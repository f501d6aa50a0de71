//! Parking telemetry table loading and metric definitions.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::ReportResult;

/// One row of the parking telemetry table, as read back from CSV.
///
/// Field renames match the written headers byte for byte; `Min Waiting Time`
/// round-trips its `inf` sentinel because `"inf".parse::<f64>()` yields
/// `f64::INFINITY`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParkingRecord {
    #[serde(rename = "Time (s)")]
    pub time: f64,
    #[serde(rename = "Total Vehicles")]
    pub total_vehicles: f64,
    #[serde(rename = "Parked Vehicles")]
    pub parked_vehicles: f64,
    #[serde(rename = "Parking Utilization")]
    pub utilization: f64,
    #[serde(rename = "Average Speed (m/s)")]
    pub average_speed: f64,
    #[serde(rename = "Total Waiting Vehicles")]
    pub waiting_vehicles: f64,
    #[serde(rename = "Total Waiting Time")]
    pub total_waiting_time: f64,
    #[serde(rename = "Max Waiting Time (s)")]
    pub max_waiting_time: f64,
    #[serde(rename = "Min Waiting Time (s)")]
    pub min_waiting_time: f64,
}

/// Load a finalized parking telemetry table.
pub fn load_parking_table(path: &Path) -> ReportResult<Vec<ParkingRecord>> {
    let file = std::fs::File::open(path)?;
    load_parking_reader(file)
}

/// Like [`load_parking_table`] but accepts any `Read` source.
pub fn load_parking_reader<R: Read>(reader: R) -> ReportResult<Vec<ParkingRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<ParkingRecord>() {
        rows.push(result?);
    }
    Ok(rows)
}

// ── Metric definitions ────────────────────────────────────────────────────────

/// One plottable metric: a column of the parking table.
pub struct MetricDef {
    /// File-name stem of the rendered chart (`<slug>.png`).
    pub slug: &'static str,
    /// Chart title; also the column header, which is how reference series
    /// are matched to a metric.
    pub title: &'static str,
    pub y_desc: &'static str,
    pub extract: fn(&ParkingRecord) -> f64,
}

/// Every metric column of the parking table, in table order.
pub const METRICS: [MetricDef; 8] = [
    MetricDef {
        slug:    "total_vehicles",
        title:   "Total Vehicles",
        y_desc:  "Total Vehicles",
        extract: |r| r.total_vehicles,
    },
    MetricDef {
        slug:    "parked_vehicles",
        title:   "Parked Vehicles",
        y_desc:  "Parked Vehicles",
        extract: |r| r.parked_vehicles,
    },
    MetricDef {
        slug:    "parking_utilization",
        title:   "Parking Utilization",
        y_desc:  "Parking Utilization",
        extract: |r| r.utilization,
    },
    MetricDef {
        slug:    "average_speed",
        title:   "Average Speed (m/s)",
        y_desc:  "Average Speed (m/s)",
        extract: |r| r.average_speed,
    },
    MetricDef {
        slug:    "total_waiting_vehicles",
        title:   "Total Waiting Vehicles",
        y_desc:  "Total Waiting Vehicles",
        extract: |r| r.waiting_vehicles,
    },
    MetricDef {
        slug:    "total_waiting_time",
        title:   "Total Waiting Time",
        y_desc:  "Total Waiting Time",
        extract: |r| r.total_waiting_time,
    },
    MetricDef {
        slug:    "max_waiting_time",
        title:   "Max Waiting Time (s)",
        y_desc:  "Max Waiting Time (s)",
        extract: |r| r.max_waiting_time,
    },
    MetricDef {
        slug:    "min_waiting_time",
        title:   "Min Waiting Time (s)",
        y_desc:  "Min Waiting Time (s)",
        extract: |r| r.min_waiting_time,
    },
];
