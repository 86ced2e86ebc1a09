use super::{BaseMap, RenderCache, depot_icons, depot_points};
use crate::layers::{Colour, Deck, IconLayer, Layer, PointDatum, ScatterplotLayer, ViewState};
use crate::models::Datasets;
use crate::palette::Palette;
use std::sync::Arc;
use tracing::{info, warn};

pub const OVERVIEW_ZOOM: f64 = 10.0;

/// Citywide map of destination clusters with every depot on top.
#[derive(Debug)]
pub struct ClusterOverview {
    data: Arc<Datasets>,
    palette: Palette,
    base: BaseMap,
    cache: RenderCache<(), Deck>,
}

impl ClusterOverview {
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
        let destinations = &self.data.destinations;
        let depots = &self.data.sources.depots;
        let cluster_count = destinations.cluster_count();

        let mut layers: Vec<Layer> = Vec::with_capacity(cluster_count + 2);

        for label in 0..cluster_count {
            let points: Vec<PointDatum> = destinations
                .in_cluster(label as u32)
                .map(|point| PointDatum {
                    position: point.coordinates,
                    name: None,
                })
                .collect();

            layers.push(
                ScatterplotLayer {
                    opacity: 0.2,
                    radius_max_pixels: Some(19),
                    ..ScatterplotLayer::new(
                        format!("cluster-{}", label),
                        points,
                        self.palette.colour_of(label).into(),
                    )
                }
                .into(),
            );
        }

        // labels outside 0..K have no layer
        let unplaced = destinations
            .points
            .iter()
            .filter(|p| p.cluster_label as usize >= cluster_count)
            .count();
        if unplaced > 0 {
            warn!(unplaced, clusters = cluster_count, "destinations left out of the overview");
        }

        layers.push(
            ScatterplotLayer {
                radius_max_pixels: Some(7),
                ..ScatterplotLayer::new("depots", depot_points(depots), Colour::BLACK)
            }
            .into(),
        );
        layers.push(IconLayer::new("depot-icons", depot_icons(depots), 89).into());

        info!(
            clusters = cluster_count,
            depots = depots.len(),
            "built cluster overview"
        );

        Deck {
            layers,
            initial_view_state: ViewState::centred_on(self.base.city_center, OVERVIEW_ZOOM),
            map_style: self.base.map_style.clone(),
            tooltip: None,
        }
    }
}
