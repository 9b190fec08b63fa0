//! End-to-end merge semantics: matching, ordering, latest-reading selection
//! and coordinate trimming.

use sce_reconcile::reconcile;
use sce_schemas::{SensorRecord, SeriesDocument};

fn sensor(id: i32, lat: &str, lon: &str) -> SensorRecord {
    SensorRecord {
        source_id: id,
        latitude: lat.to_string(),
        longitude: lon.to_string(),
    }
}

fn doc(json: &str) -> SeriesDocument {
    serde_json::from_str(json).unwrap()
}

#[test]
fn matched_rows_build_history_and_coordinates_are_trimmed() {
    let sensors = vec![sensor(1, "45.0 ", " 3.0")];
    let doc = doc(
        r#"{"results":[{"series":[{"values":[
            ["2024-01-01", 0, "1", "kWh", 5.0],
            ["2024-01-02", 0, "2", "kWh", 9.0]
        ]}]}]}"#,
    );

    let out = reconcile(&sensors, &doc);

    assert_eq!(out.features.len(), 1);
    let f = &out.features[0];
    assert_eq!(f.source_id, 1);
    assert_eq!(f.source, "PRODUCTION PHOTOVOLTAÏQUE");
    assert_eq!(f.geometry.kind, "Point");
    assert_eq!(f.geometry.coordinates, vec!["45.0", "3.0"]);
    assert_eq!(f.history.len(), 1);
    assert_eq!(f.history[0].time, "2024-01-01");
    assert_eq!(f.history[0].value, 5.0);
    assert_eq!(f.history[0].symbol, "kWh");
    assert_eq!(f.properties, f.history[0]);
    assert_eq!(f.last_updated, "N/A");
}

#[test]
fn feature_order_follows_sensor_order_not_document_order() {
    // Document mentions sensor 2 before sensor 1.
    let sensors = vec![sensor(1, "45.0", "3.0"), sensor(2, "46.0", "4.0")];
    let doc = doc(
        r#"{"results":[{"series":[{"values":[
            ["2024-01-01", 0, "2", "kWh", 9.0],
            ["2024-01-02", 0, "1", "kWh", 5.0]
        ]}]}]}"#,
    );

    let out = reconcile(&sensors, &doc);

    assert_eq!(out.features[0].source_id, 1);
    assert_eq!(out.features[1].source_id, 2);
}

#[test]
fn latest_reading_is_first_history_entry_not_chronologically_earliest() {
    // Rows deliberately out of chronological order: the merge must not sort.
    let doc = doc(
        r#"{"results":[{"series":[{"values":[
            ["2024-03-01", 0, "1", "kWh", 3.0],
            ["2024-01-01", 0, "1", "kWh", 1.0],
            ["2024-02-01", 0, "1", "kWh", 2.0]
        ]}]}]}"#,
    );

    let out = reconcile(&[sensor(1, "45.0", "3.0")], &doc);
    let f = &out.features[0];

    assert_eq!(f.history.len(), 3);
    assert_eq!(f.history[0].time, "2024-03-01");
    assert_eq!(f.history[1].time, "2024-01-01");
    assert_eq!(f.history[2].time, "2024-02-01");
    assert_eq!(f.properties.time, "2024-03-01");
}

#[test]
fn rows_are_collected_across_all_groups_in_document_order() {
    let doc = doc(
        r#"{"results":[
            {"series":[
                {"values":[["2024-01-01", 0, "1", "kWh", 1.0]]},
                {"values":[["2024-01-02", 0, "1", "kWh", 2.0]]}
            ]},
            {"series":[{"values":[["2024-01-03", 0, "1", "kWh", 3.0]]}]}
        ]}"#,
    );

    let out = reconcile(&[sensor(1, "45.0", "3.0")], &doc);
    let times: Vec<&str> = out.features[0]
        .history
        .iter()
        .map(|r| r.time.as_str())
        .collect();

    assert_eq!(times, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
}

#[test]
fn string_encoded_value_matches_reference_scenario() {
    let doc = doc(
        r#"{"results":[{"series":[{"values":[
            ["2024-01-01", 0, "1", "kWh", "5.0"]
        ]}]}]}"#,
    );

    let out = reconcile(&[sensor(1, "45.0", "3.0")], &doc);

    assert_eq!(out.features[0].history.len(), 1);
    assert_eq!(out.features[0].history[0].value, 5.0);
}

#[test]
fn identical_inputs_give_identical_output() {
    let sensors = vec![sensor(1, "45.0", "3.0"), sensor(2, "46.0", "4.0")];
    let doc = doc(
        r#"{"results":[{"series":[{"values":[
            ["2024-01-01", 0, "1", "kWh", 5.0],
            ["2024-01-01", 0, "2", "kWh", 6.0]
        ]}]}]}"#,
    );

    assert_eq!(reconcile(&sensors, &doc), reconcile(&sensors, &doc));
}
