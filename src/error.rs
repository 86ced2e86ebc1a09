use crate::frame::DatasetKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("I/O error reading {dataset} at '{path}': {source}")]
    Io {
        dataset: DatasetKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{dataset} at '{path}' is not valid JSON: {source}")]
    Malformed {
        dataset: DatasetKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{dataset} must be a record array or a column object")]
    UnsupportedLayout { dataset: DatasetKind },
    #[error("{dataset} is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        dataset: DatasetKind,
        columns: Vec<&'static str>,
    },
    #[error("{dataset} row {row} has an empty '{column}' field")]
    EmptyField {
        dataset: DatasetKind,
        row: usize,
        column: &'static str,
    },
    #[error("{dataset} row {row} failed validation: {source}")]
    InvalidRow {
        dataset: DatasetKind,
        row: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{dataset} row {row} has a path of {len} points, at least 2 are required")]
    ShortPath {
        dataset: DatasetKind,
        row: usize,
        len: usize,
    },
    #[error("{dataset} row {row} has route type {value}, expected 0 or 1")]
    InvalidCategory {
        dataset: DatasetKind,
        row: usize,
        value: u8,
    },
    #[error("{dataset} row {row} declares depot id {id}, depot ids must match row position")]
    SparseDepotId {
        dataset: DatasetKind,
        row: usize,
        id: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("depot {0} is not present in the source dataset")]
    UnknownDepot(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown depot '{0}'")]
    UnknownDepot(String),
    #[error("unknown vehicle class '{0}'")]
    UnknownVehicleClass(String),
    #[error("unknown view '{0}'")]
    UnknownView(String),
}

/// Raised instead of failing when a single-route query matches no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyResultSignal {
    pub depot_id: usize,
    pub category: u8,
    pub vehicle_slot: u32,
}

impl EmptyResultSignal {
    pub const ADVISORY: &'static str = "No route found for selected combination.";
}

impl std::fmt::Display for EmptyResultSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Self::ADVISORY)
    }
}
