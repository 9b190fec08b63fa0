//! Every sensor must yield exactly one feature even when the series document
//! carries no data at all.

use sce_reconcile::reconcile;
use sce_schemas::{Reading, SensorRecord, SeriesDocument};

fn sensor(id: i32, lat: &str, lon: &str) -> SensorRecord {
    SensorRecord {
        source_id: id,
        latitude: lat.to_string(),
        longitude: lon.to_string(),
    }
}

#[test]
fn empty_document_gives_placeholder_readings() {
    let sensors = vec![sensor(1, "45.0", "3.0"), sensor(2, "46.0", "4.0")];
    let doc = SeriesDocument::default();

    let out = reconcile(&sensors, &doc);

    assert_eq!(out.kind, "FeatureCollection");
    assert_eq!(out.features.len(), 2);
    for feature in &out.features {
        assert!(feature.history.is_empty());
        assert_eq!(feature.properties, Reading::placeholder());
        assert_eq!(feature.properties.time, "N/A");
        assert_eq!(feature.properties.value, 0.0);
        assert_eq!(feature.properties.symbol, "N/A");
        assert_eq!(feature.last_updated, "N/A");
    }
}

#[test]
fn document_with_empty_groups_behaves_like_empty_document() {
    let sensors = vec![sensor(1, "45.0", "3.0")];
    let doc: SeriesDocument =
        serde_json::from_str(r#"{"results":[{"series":[{"columns":[],"values":[]}]},{}]}"#)
            .unwrap();

    let out = reconcile(&sensors, &doc);

    assert_eq!(out.features.len(), 1);
    assert!(out.features[0].history.is_empty());
    assert_eq!(out.features[0].properties, Reading::placeholder());
}

#[test]
fn empty_sensor_list_still_returns_a_collection() {
    let doc: SeriesDocument = serde_json::from_str(
        r#"{"results":[{"series":[{"values":[["2024-01-01",0,"1","kWh",5.0]]}]}]}"#,
    )
    .unwrap();

    let out = reconcile(&[], &doc);

    assert_eq!(out.kind, "FeatureCollection");
    assert!(out.features.is_empty());
}
