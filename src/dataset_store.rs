use crate::config::ViewerConfig;
use crate::error::DataLoadError;
use crate::frame::{self, DatasetKind};
use crate::models::{
    Datasets, Depot, DestinationDataset, DestinationPoint, FullPathDataset, IconSpec, LngLat,
    Route, SourceDataset,
};
use crate::selection::DepotLocation;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct SourceRow {
    coordinates: LngLat,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<usize>,
}

/// Loads the three generator outputs once and hands out the parsed result.
///
/// The first successful `load` is kept for the lifetime of the store and is
/// never invalidated. A failed load caches nothing.
#[derive(Debug)]
pub struct DatasetStore {
    destinations_path: PathBuf,
    full_paths_path: PathBuf,
    sources_path: PathBuf,
    icon: IconSpec,
    loaded: RwLock<Option<Arc<Datasets>>>,
}

impl DatasetStore {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::from_paths(
            config.destinations_path(),
            config.full_paths_path(),
            config.sources_path(),
        )
    }

    pub fn from_paths(
        destinations_path: PathBuf,
        full_paths_path: PathBuf,
        sources_path: PathBuf,
    ) -> Self {
        Self {
            destinations_path,
            full_paths_path,
            sources_path,
            icon: IconSpec::default(),
            loaded: RwLock::new(None),
        }
    }

    /// A store that is already loaded, for hosts that parsed the data elsewhere.
    /// The routes go through the same checks as a load from disk.
    pub fn from_datasets(datasets: Datasets) -> Result<Self, DataLoadError> {
        validate_routes(&datasets.full_paths.routes)?;

        let store = Self::from_paths(PathBuf::new(), PathBuf::new(), PathBuf::new());
        *store.loaded.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(datasets));
        Ok(store)
    }

    pub fn load(&self) -> Result<Arc<Datasets>, DataLoadError> {
        if let Some(cached) = self
            .loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            debug!("dataset store hit");
            return Ok(Arc::clone(cached));
        }

        let mut slot = self.loaded.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let datasets = Arc::new(self.parse_all()?);
        for (kind, rows) in datasets.row_counts() {
            info!(dataset = %kind, rows, "loaded dataset");
        }

        *slot = Some(Arc::clone(&datasets));
        Ok(datasets)
    }

    fn parse_all(&self) -> Result<Datasets, DataLoadError> {
        let destinations = DestinationDataset {
            points: read_frame::<DestinationPoint>(DatasetKind::Destinations, &self.destinations_path)?,
        };

        let routes = read_frame::<Route>(DatasetKind::FullPaths, &self.full_paths_path)?;
        validate_routes(&routes)?;

        let source_rows = read_frame::<SourceRow>(DatasetKind::Sources, &self.sources_path)?;
        let sources = attach_icons(source_rows, &self.icon)?;

        Ok(Datasets {
            destinations,
            full_paths: FullPathDataset { routes },
            sources,
        })
    }
}

fn read_frame<T: serde::de::DeserializeOwned>(
    kind: DatasetKind,
    path: &Path,
) -> Result<Vec<T>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        dataset: kind,
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| DataLoadError::Malformed {
            dataset: kind,
            path: path.to_path_buf(),
            source,
        })?;

    let records = frame::records_from_value(kind, value)?;
    frame::decode_rows(kind, records)
}

fn validate_routes(routes: &[Route]) -> Result<(), DataLoadError> {
    for (row, route) in routes.iter().enumerate() {
        if route.path.len() < 2 {
            return Err(DataLoadError::ShortPath {
                dataset: DatasetKind::FullPaths,
                row,
                len: route.path.len(),
            });
        }

        if route.category > 1 {
            return Err(DataLoadError::InvalidCategory {
                dataset: DatasetKind::FullPaths,
                row,
                value: route.category,
            });
        }
    }

    Ok(())
}

fn attach_icons(rows: Vec<SourceRow>, icon: &IconSpec) -> Result<SourceDataset, DataLoadError> {
    let depots = rows
        .into_iter()
        .enumerate()
        .map(|(row, source)| {
            if let Some(id) = source.id {
                if id != row {
                    return Err(DataLoadError::SparseDepotId {
                        dataset: DatasetKind::Sources,
                        row,
                        id,
                    });
                }
            }

            let name = source.name.unwrap_or_else(|| {
                DepotLocation::from_index(row)
                    .map(|depot| depot.label().to_string())
                    .unwrap_or_else(|| format!("Depot {}", row))
            });

            Ok(Depot {
                id: row,
                name,
                coordinates: source.coordinates,
                icon: icon.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SourceDataset { depots })
}
