use crate::layers::{Deck, Layer};
use crate::models::LngLat;
use geo::BoundingRect;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;

fn properties(layer: &Layer, name: Option<&str>) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("layer".to_string(), json!(layer.id()));
    if let Some(colour) = layer.colour() {
        props.insert("color".to_string(), json!(colour.to_hex()));
    }
    if let Some(name) = name {
        props.insert("name".to_string(), json!(name));
    }
    props
}

fn feature(geometry: geojson::Geometry, props: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn point(position: LngLat) -> geojson::Geometry {
    geojson::Geometry::from(&geo_types::Point::new(position[0], position[1]))
}

/// Flattens a deck into plain GeoJSON: paths as LineStrings, markers as Points.
pub fn deck_to_feature_collection(deck: &Deck) -> FeatureCollection {
    let mut features = Vec::new();
    let mut all_coords: Vec<geo_types::Point<f64>> = Vec::new();

    for layer in &deck.layers {
        match layer {
            Layer::PathLayer(path_layer) => {
                for datum in &path_layer.data {
                    let line: geo_types::LineString<f64> = datum
                        .path
                        .iter()
                        .map(|p| (p[0], p[1]))
                        .collect::<Vec<_>>()
                        .into();
                    all_coords.extend(line.points());

                    let mut props = properties(layer, None);
                    if let Some(src) = datum.src {
                        props.insert("src".to_string(), json!(src));
                    }
                    features.push(feature(geojson::Geometry::from(&line), props));
                }
            }
            Layer::ScatterplotLayer(points) => {
                for datum in &points.data {
                    all_coords.push(geo_types::Point::new(datum.position[0], datum.position[1]));
                    features.push(feature(
                        point(datum.position),
                        properties(layer, datum.name.as_deref()),
                    ));
                }
            }
            Layer::IconLayer(icons) => {
                for datum in &icons.data {
                    all_coords.push(geo_types::Point::new(datum.position[0], datum.position[1]));
                    let mut props = properties(layer, Some(&datum.name));
                    props.insert("icon".to_string(), json!(datum.icon_data.url));
                    features.push(feature(point(datum.position), props));
                }
            }
        }
    }

    let bbox = geo_types::MultiPoint::new(all_coords)
        .bounding_rect()
        .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

    FeatureCollection {
        bbox,
        features,
        foreign_members: None,
    }
}
