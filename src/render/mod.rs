pub mod cluster_overview;
pub mod network_overview;
pub mod single_route;

#[cfg(test)]
mod scenario_tests;

use crate::config::ViewerConfig;
use crate::dataset_store::DatasetStore;
use crate::error::{DataLoadError, EmptyResultSignal, QueryError};
use crate::layers::{Deck, IconDatum, PointDatum};
use crate::models::{Datasets, Depot, LngLat};
use crate::palette::Palette;
use crate::selection::{Selection, ViewMode};
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

pub use cluster_overview::ClusterOverview;
pub use network_overview::NetworkOverview;
pub use single_route::{RouteView, SingleRouteEngine};

/// Basemap and citywide framing shared by the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMap {
    pub map_style: String,
    pub city_center: LngLat,
}

impl From<&ViewerConfig> for BaseMap {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            map_style: config.map_style.clone(),
            city_center: config.city_center,
        }
    }
}

impl Default for BaseMap {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

/// Rendered output keyed by a renderer's selection arguments.
///
/// Append-only: an entry is computed once and kept until the renderer is
/// dropped. The datasets behind a renderer never change, so entries never go
/// stale. Concurrent misses on the same key may both render; the first
/// insertion is the one every caller gets back.
#[derive(Debug)]
pub struct RenderCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, Arc<V>>,
}

impl<K: Eq + Hash, V> Default for RenderCache<K, V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> RenderCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_or_insert_with(&self, key: K, render: impl FnOnce() -> V) -> Arc<V> {
        match self.get_or_try_insert_with(key, || Ok::<V, std::convert::Infallible>(render())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        render: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(hit) = self.entries.get(&key) {
            debug!("render cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        let rendered = Arc::new(render()?);
        let entry = self.entries.entry(key).or_insert(rendered);
        Ok(Arc::clone(entry.value()))
    }
}

pub(crate) fn depot_points(depots: &[Depot]) -> Vec<PointDatum> {
    depots
        .iter()
        .map(|depot| PointDatum {
            position: depot.coordinates,
            name: Some(depot.name.clone()),
        })
        .collect()
}

pub(crate) fn depot_icons(depots: &[Depot]) -> Vec<IconDatum> {
    depots
        .iter()
        .map(|depot| IconDatum {
            position: depot.coordinates,
            name: depot.name.clone(),
            icon_data: depot.icon.clone(),
        })
        .collect()
}

/// What a selection event resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Overview(Arc<Deck>),
    Network(Arc<Deck>),
    Route(Arc<RouteView>),
}

impl View {
    pub fn deck(&self) -> &Deck {
        match self {
            View::Overview(deck) | View::Network(deck) => deck,
            View::Route(route) => &route.deck,
        }
    }

    pub fn advisory(&self) -> Option<EmptyResultSignal> {
        match self {
            View::Overview(_) | View::Network(_) => None,
            View::Route(route) => route.advisory,
        }
    }

    /// Route views carry their advisory alongside the deck.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            View::Overview(deck) | View::Network(deck) => serde_json::to_string_pretty(&**deck),
            View::Route(route) => serde_json::to_string_pretty(&**route),
        }
    }
}

/// All three renderers over one loaded dataset.
#[derive(Debug)]
pub struct RouteViewer {
    overview: ClusterOverview,
    network: NetworkOverview,
    routes: SingleRouteEngine,
}

impl RouteViewer {
    pub fn new(data: Arc<Datasets>, palette: Palette, base: BaseMap) -> Self {
        Self {
            overview: ClusterOverview::new(Arc::clone(&data), palette, base.clone()),
            network: NetworkOverview::new(Arc::clone(&data), palette, base.clone()),
            routes: SingleRouteEngine::new(data, palette, base),
        }
    }

    pub fn from_store(store: &DatasetStore, config: &ViewerConfig) -> Result<Self, DataLoadError> {
        let data = store.load()?;
        Ok(Self::new(data, Palette::default(), BaseMap::from(config)))
    }

    pub fn overview(&self) -> Arc<Deck> {
        self.overview.render()
    }

    pub fn network(&self) -> Arc<Deck> {
        self.network.render()
    }

    pub fn routes(&self) -> &SingleRouteEngine {
        &self.routes
    }

    /// Full-network mode ignores the depot and vehicle selectors.
    pub fn select(&self, selection: &Selection) -> Result<View, QueryError> {
        match selection.mode {
            ViewMode::FullNetwork => Ok(View::Network(self.network())),
            ViewMode::SingleVehicle => self
                .routes
                .query(selection.depot, selection.vehicle)
                .map(View::Route),
        }
    }
}
