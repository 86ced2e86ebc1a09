use super::{BaseMap, RenderCache};
use crate::layers::{Deck, Layer, PathDatum, PathLayer, ViewState};
use crate::models::Datasets;
use crate::palette::Palette;
use std::sync::Arc;
use tracing::{info, warn};

pub const NETWORK_ZOOM: f64 = 11.0;

/// Every route from every depot, one path layer per depot.
#[derive(Debug)]
pub struct NetworkOverview {
    data: Arc<Datasets>,
    palette: Palette,
    base: BaseMap,
    cache: RenderCache<(), Deck>,
}

impl NetworkOverview {
    pub fn new(data: Arc<Datasets>, palette: Palette, base: BaseMap) -> Self {
        Self {
            data,
            palette,
            base,
            cache: RenderCache::new(),
        }
    }

    pub fn render(&self) -> Arc<Deck> {
        self.cache.get_or_insert_with((), || self.build())
    }

    fn build(&self) -> Deck {
        let full_paths = &self.data.full_paths;
        let depot_count = full_paths.depot_count();

        let layers: Vec<Layer> = (0..depot_count)
            .map(|depot_id| {
                let routes: Vec<PathDatum> =
                    full_paths.from_depot(depot_id).map(PathDatum::from).collect();

                PathLayer {
                    rounded: true,
                    billboard: true,
                    width_min_pixels: 5,
                    ..PathLayer::new(
                        format!("network-{}", depot_id),
                        routes,
                        self.palette.colour_of(depot_id).into(),
                    )
                }
                .into()
            })
            .collect();

        let unplaced = full_paths.routes.iter().filter(|r| r.src >= depot_count).count();
        if unplaced > 0 {
            warn!(unplaced, depots = depot_count, "routes left out of the network view");
        }

        info!(
            depots = depot_count,
            routes = full_paths.routes.len(),
            "built network overview"
        );

        Deck {
            layers,
            initial_view_state: ViewState::centred_on(self.base.city_center, NETWORK_ZOOM),
            map_style: self.base.map_style.clone(),
            tooltip: None,
        }
    }
}
