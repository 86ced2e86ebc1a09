//! Tabular JSON frames as written by the route generator.
//!
//! Two layouts are accepted: a record array (`[{"src": 0, ...}, ...]`) and the
//! column object written by dataframe tooling (`{"src": {"0": 0, ...}, ...}`).
//! Both are normalised into records ordered by row index before typed
//! decoding, so every later stage sees dataset order.

use crate::error::DataLoadError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatasetKind {
    Destinations,
    FullPaths,
    Sources,
}

impl DatasetKind {
    pub fn frame_name(&self) -> &'static str {
        match self {
            DatasetKind::Destinations => "destdf",
            DatasetKind::FullPaths => "fulldf",
            DatasetKind::Sources => "srcdf",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Destinations => &["coordinates", "labels"],
            DatasetKind::FullPaths => &["src", "type", "veh", "path"],
            DatasetKind::Sources => &["coordinates"],
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.frame_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum RowKey {
    Position(u64),
    Label(String),
}

impl RowKey {
    fn parse(raw: &str) -> Self {
        raw.parse::<u64>()
            .map(RowKey::Position)
            .unwrap_or_else(|_| RowKey::Label(raw.to_string()))
    }
}

pub fn records_from_value(kind: DatasetKind, value: Value) -> Result<Vec<Record>, DataLoadError> {
    match value {
        Value::Array(rows) => rows
            .into_iter()
            .map(|row| match row {
                Value::Object(record) => Ok(record),
                _ => Err(DataLoadError::UnsupportedLayout { dataset: kind }),
            })
            .collect(),
        Value::Object(columns) => pivot_columns(kind, columns),
        _ => Err(DataLoadError::UnsupportedLayout { dataset: kind }),
    }
}

fn pivot_columns(kind: DatasetKind, columns: Map<String, Value>) -> Result<Vec<Record>, DataLoadError> {
    let mut rows: BTreeMap<RowKey, Record> = BTreeMap::new();

    for (column, cells) in columns {
        let Value::Object(cells) = cells else {
            return Err(DataLoadError::UnsupportedLayout { dataset: kind });
        };

        for (index, cell) in cells {
            rows.entry(RowKey::parse(&index))
                .or_default()
                .insert(column.clone(), cell);
        }
    }

    Ok(rows.into_values().collect())
}

fn is_empty_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Checks the column set and required fields, then decodes each record.
pub fn decode_rows<T: DeserializeOwned>(
    kind: DatasetKind,
    records: Vec<Record>,
) -> Result<Vec<T>, DataLoadError> {
    let required = kind.required_columns();

    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let missing: Vec<&'static str> = required
                .iter()
                .copied()
                .filter(|column| !record.contains_key(*column))
                .collect();

            if !missing.is_empty() {
                return Err(DataLoadError::MissingColumns {
                    dataset: kind,
                    columns: missing,
                });
            }

            if let Some(column) = required
                .iter()
                .copied()
                .find(|column| record.get(*column).is_some_and(is_empty_cell))
            {
                return Err(DataLoadError::EmptyField {
                    dataset: kind,
                    row,
                    column,
                });
            }

            serde_json::from_value(Value::Object(record)).map_err(|source| {
                DataLoadError::InvalidRow {
                    dataset: kind,
                    row,
                    source,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DestinationPoint, Route};
    use serde_json::json;

    #[test]
    fn test_column_layout_is_ordered_by_row_index() {
        let frame = json!({
            "coordinates": {"10": [72.9, 19.1], "2": [72.8, 19.0]},
            "labels": {"2": 0, "10": 1}
        });

        let records = records_from_value(DatasetKind::Destinations, frame).unwrap();
        let points: Vec<DestinationPoint> =
            decode_rows(DatasetKind::Destinations, records).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].coordinates, [72.8, 19.0]);
        assert_eq!(points[1].cluster_label, 1);
    }

    #[test]
    fn test_record_layout_keeps_dataset_order() {
        let frame = json!([
            {"src": 3, "type": 1, "veh": 0, "path": [[1.0, 1.0], [2.0, 2.0]]},
            {"src": 0, "type": 0, "veh": 4, "path": [[3.0, 3.0], [4.0, 4.0]]}
        ]);

        let records = records_from_value(DatasetKind::FullPaths, frame).unwrap();
        let routes: Vec<Route> = decode_rows(DatasetKind::FullPaths, records).unwrap();

        assert_eq!(routes[0].src, 3);
        assert_eq!(routes[1].vehicle_slot, 4);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let frame = json!([{"src": 0, "type": 0, "path": [[1.0, 1.0], [2.0, 2.0]]}]);
        let records = records_from_value(DatasetKind::FullPaths, frame).unwrap();
        let err = decode_rows::<Route>(DatasetKind::FullPaths, records).unwrap_err();

        match err {
            DataLoadError::MissingColumns { columns, .. } => assert_eq!(columns, vec!["veh"]),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_null_required_field_is_reported() {
        let frame = json!([{"coordinates": null, "labels": 0}]);
        let records = records_from_value(DatasetKind::Destinations, frame).unwrap();
        let err = decode_rows::<DestinationPoint>(DatasetKind::Destinations, records).unwrap_err();

        assert!(matches!(
            err,
            DataLoadError::EmptyField {
                row: 0,
                column: "coordinates",
                ..
            }
        ));
    }

    #[test]
    fn test_scalar_frame_is_rejected() {
        let err = records_from_value(DatasetKind::Sources, json!(42)).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedLayout { .. }));
    }
}
