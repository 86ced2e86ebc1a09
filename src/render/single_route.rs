//! Drill-down into one depot's routes.
//!
//! The vehicle class picks between two deliberately different views. Light
//! vehicles show every route leaving the depot, framed on the depot. The
//! heavy class shows the one route keyed by `(depot, 1, slot 0)` with its
//! stops marked, framed on the middle element of its path.

use super::{BaseMap, RenderCache};
use crate::error::{EmptyResultSignal, QueryError};
use crate::layers::{
    Colour, Deck, IconDatum, IconLayer, Layer, PathDatum, PathLayer, PointDatum,
    ScatterplotLayer, Tooltip, ViewState,
};
use crate::models::{Datasets, IconSpec, LngLat, Route};
use crate::palette::Palette;
use crate::selection::{Category, DepotLocation, VehicleClass};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{info, warn};

pub const ROUTE_ZOOM: f64 = 12.0;

/// The slot queried for the heavy class.
pub const HEAVY_VEHICLE_SLOT: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RouteKey {
    DepotAggregate {
        depot_id: usize,
    },
    SingleRoute {
        depot_id: usize,
        category: u8,
        vehicle_slot: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    #[serde(flatten)]
    pub deck: Deck,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "advisory_text"
    )]
    pub advisory: Option<EmptyResultSignal>,
}

fn advisory_text<S: Serializer>(
    advisory: &Option<EmptyResultSignal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match advisory {
        Some(signal) => serializer.collect_str(signal),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug)]
pub struct SingleRouteEngine {
    data: Arc<Datasets>,
    palette: Palette,
    base: BaseMap,
    cache: RenderCache<RouteKey, RouteView>,
}

impl SingleRouteEngine {
    pub fn new(data: Arc<Datasets>, palette: Palette, base: BaseMap) -> Self {
        Self {
            data,
            palette,
            base,
            cache: RenderCache::new(),
        }
    }

    #[tracing::instrument(skip(self), fields(category = vehicle.category().as_int()))]
    pub fn query(
        &self,
        depot: DepotLocation,
        vehicle: VehicleClass,
    ) -> Result<Arc<RouteView>, QueryError> {
        match vehicle.category() {
            Category::Light => self.depot_aggregate(depot.index()),
            Category::Heavy => Ok(self.single_route(
                depot.index(),
                Category::Heavy.as_int(),
                HEAVY_VEHICLE_SLOT,
            )),
        }
    }

    /// Every route from `depot_id`, whatever its category or slot.
    pub fn depot_aggregate(&self, depot_id: usize) -> Result<Arc<RouteView>, QueryError> {
        self.cache
            .get_or_try_insert_with(RouteKey::DepotAggregate { depot_id }, || {
                self.build_depot_aggregate(depot_id)
            })
    }

    /// The first route in dataset order matching the full key.
    pub fn single_route(&self, depot_id: usize, category: u8, vehicle_slot: u32) -> Arc<RouteView> {
        let key = RouteKey::SingleRoute {
            depot_id,
            category,
            vehicle_slot,
        };

        self.cache.get_or_insert_with(key, || {
            match self
                .data
                .full_paths
                .find(depot_id, category, vehicle_slot)
                .and_then(|route| self.build_single_route(route))
            {
                Some(view) => view,
                None => {
                    let signal = EmptyResultSignal {
                        depot_id,
                        category,
                        vehicle_slot,
                    };
                    warn!(depot_id, category, vehicle_slot, "{}", signal);
                    self.empty_view(depot_id, signal)
                }
            }
        })
    }

    fn build_depot_aggregate(&self, depot_id: usize) -> Result<RouteView, QueryError> {
        let depot = self
            .data
            .sources
            .get(depot_id)
            .ok_or(QueryError::UnknownDepot(depot_id))?;

        let mut layers: Vec<Layer> = self
            .data
            .full_paths
            .from_depot(depot_id)
            .enumerate()
            .map(|(row, route)| {
                PathLayer {
                    rounded: true,
                    billboard: true,
                    ..PathLayer::new(
                        format!("depot-{}-route-{}", depot_id, row),
                        vec![PathDatum::from(route)],
                        self.palette.colour_of(row).into(),
                    )
                }
                .into()
            })
            .collect();

        let routes = layers.len();

        layers.push(
            ScatterplotLayer {
                radius_max_pixels: Some(12),
                ..ScatterplotLayer::new(
                    format!("depot-{}", depot_id),
                    super::depot_points(std::slice::from_ref(depot)),
                    Colour::BLACK,
                )
            }
            .into(),
        );
        layers.push(
            IconLayer {
                get_color: Some(Colour::GREY),
                ..IconLayer::new(
                    format!("depot-{}-icon", depot_id),
                    super::depot_icons(std::slice::from_ref(depot)),
                    79,
                )
            }
            .into(),
        );

        info!(depot_id, routes, "built depot aggregate view");

        Ok(RouteView {
            deck: Deck {
                layers,
                initial_view_state: ViewState::centred_on(depot.coordinates, ROUTE_ZOOM),
                map_style: self.base.map_style.clone(),
                tooltip: None,
            },
            advisory: None,
        })
    }

    /// `None` when the path has no point to anchor the depot or camera on.
    fn build_single_route(&self, route: &Route) -> Option<RouteView> {
        let depot_id = route.src;
        let origin = route.origin()?;
        let midpoint = route.midpoint()?;
        let depot_name = format!("Depot {}", depot_id);
        let icon = self
            .data
            .sources
            .get(depot_id)
            .map(|depot| depot.icon.clone())
            .unwrap_or_default();

        let stops: Vec<PointDatum> = route
            .intermediate_stops()
            .iter()
            .enumerate()
            .map(|(i, stop)| PointDatum {
                position: *stop,
                name: Some(stop_name(i)),
            })
            .collect();

        let layers: Vec<Layer> = vec![
            PathLayer {
                width_min_pixels: 5,
                ..PathLayer::new(
                    format!("route-{}", depot_id),
                    vec![PathDatum::bare(route.path.clone())],
                    self.palette.colour_of(depot_id).into(),
                )
            }
            .into(),
            depot_icon_layer(depot_id, origin, &depot_name, icon).into(),
            ScatterplotLayer {
                get_radius: 100.0,
                stroked: false,
                ..ScatterplotLayer::new(
                    format!("route-{}-depot", depot_id),
                    vec![PointDatum {
                        position: origin,
                        name: Some(depot_name),
                    }],
                    Colour::BLACK,
                )
            }
            .into(),
            ScatterplotLayer {
                get_radius: 60.0,
                stroked: false,
                ..ScatterplotLayer::new(format!("route-{}-stops", depot_id), stops, Colour::BLUE)
            }
            .into(),
        ];

        info!(
            depot_id,
            points = route.path.len(),
            "built single route view"
        );

        Some(RouteView {
            deck: Deck {
                layers,
                initial_view_state: ViewState::centred_on(midpoint, ROUTE_ZOOM),
                map_style: self.base.map_style.clone(),
                tooltip: Some(Tooltip::name_in_bold()),
            },
            advisory: None,
        })
    }

    fn empty_view(&self, depot_id: usize, signal: EmptyResultSignal) -> RouteView {
        let center = self
            .data
            .sources
            .get(depot_id)
            .map(|depot| depot.coordinates)
            .unwrap_or(self.base.city_center);

        RouteView {
            deck: Deck {
                layers: Vec::new(),
                initial_view_state: ViewState::centred_on(center, ROUTE_ZOOM),
                map_style: self.base.map_style.clone(),
                tooltip: None,
            },
            advisory: Some(signal),
        }
    }
}

fn depot_icon_layer(depot_id: usize, origin: LngLat, name: &str, icon: IconSpec) -> IconLayer {
    IconLayer {
        size_max_pixels: None,
        opacity: 0.8,
        ..IconLayer::new(
            format!("route-{}-depot-icon", depot_id),
            vec![IconDatum {
                position: origin,
                name: name.to_string(),
                icon_data: icon,
            }],
            60,
        )
    }
}

/// `Dest A` .. `Dest Z`, then `Dest AA`, `Dest AB`, ...
pub fn stop_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    format!("Dest {}", letters.into_iter().collect::<String>())
}
