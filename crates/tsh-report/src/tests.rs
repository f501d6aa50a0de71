use crate::chart::{Series, axis_ranges, metric_series, references_for};
use crate::reference::{ReferenceSeries, parse_references};
use crate::table::{METRICS, load_parking_reader};
use crate::{ReportError, load_references};

fn sample_csv() -> &'static str {
    "Time (s),Total Vehicles,Parked Vehicles,Parking Utilization,Average Speed (m/s),\
     Total Waiting Vehicles,Total Waiting Time,Max Waiting Time (s),Min Waiting Time (s)\n\
     0,0,0,0,0,0,0,0,inf\n\
     1,4,1,0.3333333333333333,8.25,2,12.5,9,3.5\n"
}

mod table {
    use super::*;

    #[test]
    fn loads_rows_in_order() {
        let rows = load_parking_reader(sample_csv().as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, 0.0);
        assert_eq!(rows[1].total_vehicles, 4.0);
        assert_eq!(rows[1].parked_vehicles, 1.0);
        assert!((rows[1].utilization - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn min_waiting_sentinel_parses_as_infinity() {
        let rows = load_parking_reader(sample_csv().as_bytes()).unwrap();
        assert!(rows[0].min_waiting_time.is_infinite());
        assert_eq!(rows[1].min_waiting_time, 3.5);
    }

    #[test]
    fn metric_extractors_follow_column_order() {
        let rows = load_parking_reader(sample_csv().as_bytes()).unwrap();
        let values: Vec<f64> = METRICS.iter().map(|m| (m.extract)(&rows[1])).collect();
        assert_eq!(values[0], 4.0); // Total Vehicles
        assert_eq!(values[1], 1.0); // Parked Vehicles
        assert_eq!(values[3], 8.25); // Average Speed
        assert_eq!(values[7], 3.5); // Min Waiting Time
    }

    #[test]
    fn metric_slugs_are_unique() {
        for (i, a) in METRICS.iter().enumerate() {
            for b in &METRICS[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let truncated = "Time (s),Total Vehicles\n0,3\n";
        let err = load_parking_reader(truncated.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::Csv(_)));
    }
}

mod reference {
    use super::*;

    #[test]
    fn parses_and_pairs_points() {
        let json = r#"[
            {"label": "Paper 1", "metric": "Parking Utilization",
             "time": [0.0, 100.0], "values": [0.1, 0.4]}
        ]"#;
        let series = parse_references(json).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points(), vec![(0.0, 0.1), (100.0, 0.4)]);
    }

    #[test]
    fn length_mismatch_is_a_parse_error() {
        let json = r#"[
            {"label": "Paper 1", "metric": "Average Speed (m/s)",
             "time": [0.0, 1.0, 2.0], "values": [5.0]}
        ]"#;
        let err = parse_references(json).unwrap_err();
        assert!(matches!(err, ReportError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = parse_references("not json").unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn bundled_reference_file_covers_the_comparison_metrics() {
        let path =
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/references.json");
        let series = load_references(&path).unwrap();
        assert_eq!(series.len(), 4);

        // Every bundled series names a real metric column and pairs cleanly.
        for s in &series {
            assert!(METRICS.iter().any(|m| m.title == s.metric), "unknown metric {:?}", s.metric);
            assert_eq!(s.time.len(), s.values.len());
        }

        // Paper 1 and Paper 2 each overlay both comparison metrics.
        assert_eq!(references_for(&series, "Parking Utilization").len(), 2);
        assert_eq!(references_for(&series, "Average Speed (m/s)").len(), 2);
        let utilization = references_for(&series, "Parking Utilization");
        assert_eq!(utilization[0].label, "Paper 1");
        assert_eq!(utilization[0].values[0], 0.1);
        assert_eq!(utilization[1].label, "Paper 2");
        assert_eq!(utilization[1].values[6], 0.9);
    }

    #[test]
    fn load_from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");
        std::fs::write(
            &path,
            r#"[{"label": "Paper 2", "metric": "Parking Utilization",
                 "time": [0.0], "values": [0.2]}]"#,
        )
        .unwrap();
        let series = load_references(&path).unwrap();
        assert_eq!(series[0].label, "Paper 2");
    }
}

mod chart {
    use super::*;

    #[test]
    fn finite_points_drop_the_sentinel() {
        let s = Series::new(
            "x",
            vec![(0.0, f64::INFINITY), (1.0, 2.0), (2.0, f64::NAN), (3.0, 4.0)],
        );
        assert_eq!(s.finite_points(), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn axis_ranges_cover_all_series() {
        let series = [
            Series::new("a", vec![(0.0, 1.0), (10.0, 5.0)]),
            Series::new("b", vec![(2.0, -1.0), (12.0, 3.0)]),
        ];
        let ((x_lo, x_hi), (y_lo, y_hi)) = axis_ranges(&series).unwrap();
        assert_eq!((x_lo, x_hi), (0.0, 12.0));
        assert!(y_lo < -1.0);
        assert!(y_hi > 5.0);
    }

    #[test]
    fn axis_ranges_widen_degenerate_spans() {
        let series = [Series::new("flat", vec![(3.0, 7.0)])];
        let ((x_lo, x_hi), (y_lo, y_hi)) = axis_ranges(&series).unwrap();
        assert!(x_hi > x_lo);
        assert!(y_hi > y_lo);
    }

    #[test]
    fn axis_ranges_without_finite_points_are_none() {
        let series = [Series::new("inf only", vec![(0.0, f64::INFINITY)])];
        assert!(axis_ranges(&series).is_none());
        assert!(axis_ranges(&[]).is_none());
    }

    #[test]
    fn metric_series_tracks_the_time_column() {
        let rows = load_parking_reader(sample_csv().as_bytes()).unwrap();
        let metric = &METRICS[3]; // Average Speed (m/s)
        let s = metric_series(&rows, metric, metric.title);
        assert_eq!(s.points, vec![(0.0, 0.0), (1.0, 8.25)]);
    }

    #[test]
    fn references_match_by_column_header() {
        let refs = vec![
            ReferenceSeries {
                label:  "Paper 1".into(),
                metric: "Parking Utilization".into(),
                time:   vec![0.0],
                values: vec![0.1],
            },
            ReferenceSeries {
                label:  "Paper 2".into(),
                metric: "Average Speed (m/s)".into(),
                time:   vec![0.0],
                values: vec![6.0],
            },
        ];
        let matched = references_for(&refs, "Parking Utilization");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].label, "Paper 1");
        assert!(references_for(&refs, "Total Vehicles").is_empty());
    }
}
