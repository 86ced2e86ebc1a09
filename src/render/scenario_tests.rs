use super::*;
use crate::layers::Layer;
use crate::models::{
    Depot, DestinationDataset, DestinationPoint, FullPathDataset, IconSpec, Route, SourceDataset,
};
use crate::selection::{DepotLocation, VehicleClass};

const DEPOT_COORDS: [LngLat; 5] = [
    [72.8347, 18.9220],
    [72.8479, 19.0178],
    [72.83, 19.05],
    [72.8697, 19.1136],
    [72.9781, 19.2183],
];

fn sources() -> SourceDataset {
    SourceDataset {
        depots: DepotLocation::ALL
            .iter()
            .zip(DEPOT_COORDS)
            .map(|(location, coordinates)| Depot {
                id: location.index(),
                name: location.label().to_string(),
                coordinates,
                icon: IconSpec::default(),
            })
            .collect(),
    }
}

fn route(src: usize, category: u8, vehicle_slot: u32, path: Vec<LngLat>) -> Route {
    Route {
        src,
        category,
        vehicle_slot,
        path,
    }
}

fn viewer(routes: Vec<Route>) -> RouteViewer {
    let data = Datasets {
        destinations: DestinationDataset {
            points: vec![
                DestinationPoint {
                    coordinates: [72.84, 19.06],
                    cluster_label: 0,
                },
                DestinationPoint {
                    coordinates: [72.86, 19.02],
                    cluster_label: 1,
                },
            ],
        },
        full_paths: FullPathDataset { routes },
        sources: sources(),
    };
    RouteViewer::new(Arc::new(data), Palette::default(), BaseMap::default())
}

fn dadar_routes() -> Vec<Route> {
    vec![
        route(1, 0, 0, vec![[72.8479, 19.0178], [72.85, 19.02], [72.8479, 19.0178]]),
        route(0, 0, 0, vec![[72.8347, 18.9220], [72.84, 18.93]]),
        route(1, 0, 1, vec![[72.8479, 19.0178], [72.86, 19.03], [72.8479, 19.0178]]),
        route(1, 1, 0, vec![[72.8479, 19.0178], [72.87, 19.04], [72.8479, 19.0178]]),
    ]
}

#[test]
fn scenario_a_large_truck_renders_one_route_with_markers() {
    let viewer = viewer(vec![route(
        2,
        1,
        0,
        vec![[72.83, 19.05], [72.84, 19.06], [72.83, 19.05]],
    )]);

    let depot: DepotLocation = "Bandra (West)".parse().unwrap();
    assert_eq!(depot.index(), 2);

    let view = viewer
        .routes()
        .query(depot, VehicleClass::LargeTruck)
        .unwrap();

    assert!(view.advisory.is_none());
    let layers = &view.deck.layers;
    assert_eq!(layers.len(), 4);

    assert!(matches!(layers[0], Layer::PathLayer(_)));
    assert_eq!(
        layers[0].colour(),
        Some(Palette::default().colour_of(2).into())
    );
    assert!(matches!(layers[1], Layer::IconLayer(_)));
    assert_eq!(layers[1].positions(), vec![[72.83, 19.05]]);
    assert_eq!(layers[2].positions(), vec![[72.83, 19.05]]);
    assert_eq!(layers[3].positions(), vec![[72.84, 19.06]]);

    assert_eq!(view.deck.initial_view_state.center(), [72.84, 19.06]);
    assert_eq!(view.deck.initial_view_state.zoom, 12.0);
    assert_eq!(view.deck.initial_view_state.pitch, 30.0);
    assert!(view.deck.tooltip.is_some());
}

#[test]
fn scenario_b_missing_route_is_an_advisory_not_an_error() {
    let viewer = viewer(vec![route(2, 0, 0, vec![[72.83, 19.05], [72.84, 19.06]])]);

    let view = viewer
        .routes()
        .query(DepotLocation::Bandra, VehicleClass::LargeTruck)
        .unwrap();

    assert!(view.deck.layers.is_empty());
    assert_eq!(
        view.advisory,
        Some(EmptyResultSignal {
            depot_id: 2,
            category: 1,
            vehicle_slot: 0,
        })
    );
}

#[test]
fn scenario_c_light_classes_aggregate_the_depot() {
    let viewer = viewer(dadar_routes());
    let depot: DepotLocation = "Dadar (Central)".parse().unwrap();

    let two_wheeler = viewer
        .routes()
        .query(depot, VehicleClass::TwoWheeler)
        .unwrap();
    let small_van = viewer.routes().query(depot, VehicleClass::SmallVan).unwrap();

    // both classes land on the same cached view
    assert!(Arc::ptr_eq(&two_wheeler, &small_van));

    let layers = &two_wheeler.deck.layers;
    assert_eq!(layers.len(), 3 + 2);

    let palette = Palette::default();
    for row in 0..3 {
        assert_eq!(layers[row].colour(), Some(palette.colour_of(row).into()));
        assert_eq!(layers[row].len(), 1);
    }
    assert_eq!(
        two_wheeler.deck.initial_view_state.center(),
        DEPOT_COORDS[1]
    );
}

#[test]
fn depot_aggregate_markers_sit_on_source_coordinates() {
    let viewer = viewer(dadar_routes());

    for depot in DepotLocation::ALL {
        let view = viewer.routes().query(depot, VehicleClass::SmallVan).unwrap();
        let layers = &view.deck.layers;
        let n = layers.len();

        assert!(matches!(layers[n - 2], Layer::ScatterplotLayer(_)));
        assert!(matches!(layers[n - 1], Layer::IconLayer(_)));
        assert_eq!(layers[n - 2].positions(), vec![DEPOT_COORDS[depot.index()]]);
        assert_eq!(layers[n - 1].positions(), vec![DEPOT_COORDS[depot.index()]]);
        assert_eq!(
            view.deck.initial_view_state.center(),
            DEPOT_COORDS[depot.index()]
        );
    }
}

#[test]
fn single_route_tie_break_takes_first_row() {
    let viewer = viewer(vec![
        route(4, 1, 0, vec![[72.9781, 19.2183], [72.98, 19.22], [72.99, 19.23], [72.9781, 19.2183]]),
        route(4, 1, 0, vec![[72.9781, 19.2183], [73.1, 19.3]]),
    ]);

    let view = viewer
        .routes()
        .query(DepotLocation::Thane, VehicleClass::LargeTruck)
        .unwrap();

    let Layer::ScatterplotLayer(stops) = &view.deck.layers[3] else {
        panic!("expected destination markers");
    };
    let names: Vec<_> = stops.data.iter().filter_map(|d| d.name.clone()).collect();
    assert_eq!(names, vec!["Dest A", "Dest B"]);
    assert_eq!(view.deck.initial_view_state.center(), [72.99, 19.23]);
}

#[test]
fn overviews_are_deterministic_across_viewers() {
    let first = viewer(dadar_routes());
    let second = viewer(dadar_routes());

    assert_eq!(*first.overview(), *second.overview());
    assert_eq!(*first.network(), *second.network());
    assert_eq!(first.network().layers.len(), 2);
}

#[test]
fn full_network_selection_ignores_depot_and_vehicle() {
    let viewer = viewer(dadar_routes());
    let selection = Selection {
        mode: ViewMode::FullNetwork,
        depot: DepotLocation::Thane,
        vehicle: VehicleClass::LargeTruck,
    };

    let view = viewer.select(&selection).unwrap();
    assert!(matches!(view, View::Network(_)));
    assert_eq!(view.deck().initial_view_state.zoom, 11.0);
    assert!(view.advisory().is_none());
}

#[test]
fn depot_name_round_trips_to_source_row() {
    let data = sources();
    for name in DepotLocation::ALL.map(|d| d.label()) {
        let index = name.parse::<DepotLocation>().unwrap().index();
        assert_eq!(data.get(index).map(|d| d.name.as_str()), Some(name));
    }
}
