use std::collections::HashMap;

use sce_schemas::{
    Feature, FeatureCollection, Geometry, Reading, SensorRecord, SeriesDocument, SeriesRow,
    NOT_AVAILABLE, SOURCE_LABEL,
};
use tracing::warn;

/// Rows with fewer cells than this carry no usable observation.
const MIN_ROW_CELLS: usize = 5;

// Positional layout of a series row.
const TIME_CELL: usize = 0;
const SOURCE_ID_CELL: usize = 2;
const SYMBOL_CELL: usize = 3;
const VALUE_CELL: usize = 4;

/// Join sensors with the series document into a GeoJSON feature collection.
///
/// Valid rows are bucketed by source id in a single pass over the document
/// (document order preserved per bucket), then each sensor picks up its
/// bucket as history. A sensor with no matched rows still yields a feature,
/// carrying the placeholder reading.
///
/// Total function: malformed rows never fail the merge.
pub fn reconcile(sensors: &[SensorRecord], doc: &SeriesDocument) -> FeatureCollection {
    let buckets = bucket_readings(doc);

    let features = sensors
        .iter()
        .map(|sensor| {
            let history = buckets
                .get(&sensor.source_id)
                .cloned()
                .unwrap_or_default();
            let properties = history
                .first()
                .cloned()
                .unwrap_or_else(Reading::placeholder);

            Feature {
                source: SOURCE_LABEL.to_string(),
                source_id: sensor.source_id,
                geometry: Geometry::point(
                    sensor.latitude.trim().to_string(),
                    sensor.longitude.trim().to_string(),
                ),
                properties,
                history,
                // Never derived from history; fixed placeholder.
                last_updated: NOT_AVAILABLE.to_string(),
            }
        })
        .collect();

    FeatureCollection::new(features)
}

/// Single scan over every row of every group, keyed by parsed source id.
fn bucket_readings(doc: &SeriesDocument) -> HashMap<i32, Vec<Reading>> {
    let mut buckets: HashMap<i32, Vec<Reading>> = HashMap::new();

    for group in doc.results.iter().flat_map(|r| r.series.iter()) {
        for row in &group.values {
            if let Some((source_id, reading)) = normalize_row(row) {
                buckets.entry(source_id).or_default().push(reading);
            }
        }
    }

    buckets
}

/// Validate one positional row and normalize it to `(source_id, Reading)`.
///
/// Returns `None` on any anomaly; the skip is logged at warn level and the
/// row simply contributes nothing. Check order matches the feed contract:
/// length, source id, value, then time/symbol.
fn normalize_row(row: &SeriesRow) -> Option<(i32, Reading)> {
    if row.len() < MIN_ROW_CELLS {
        warn!(cells = row.len(), "series row skipped: too few cells");
        return None;
    }

    let Some(id_text) = row[SOURCE_ID_CELL].as_text() else {
        warn!("series row skipped: source id cell is not a string");
        return None;
    };
    let source_id = match id_text.parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            warn!(source_id = id_text, "series row skipped: source id is not numeric");
            return None;
        }
    };

    let Some(value) = row[VALUE_CELL].to_f64() else {
        warn!(source_id, "series row skipped: value cell is neither number nor numeric string");
        return None;
    };

    // Non-string time/symbol cells are undefined by the row format; treat
    // them as one more skip case rather than failing the merge.
    let (Some(time), Some(symbol)) = (row[TIME_CELL].as_text(), row[SYMBOL_CELL].as_text())
    else {
        warn!(source_id, "series row skipped: time or symbol cell is not a string");
        return None;
    };

    Some((
        source_id,
        Reading {
            time: time.to_string(),
            value,
            symbol: symbol.to_string(),
        },
    ))
}
