//! Renderable output: layers plus the camera they are framed with.
//!
//! Serialises to the JSON deck vocabulary understood by the host map surface:
//! layers are tagged with `@@type`, props are camelCase and accessors are
//! `@@=` expressions over each datum.

use crate::models::{IconSpec, LngLat, Route};
use rgb::RGB8;
use serde::{Serialize, Serializer};

pub const DEFAULT_PITCH: f64 = 30.0;

/// Serialised as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour(pub RGB8);

impl Colour {
    pub const BLACK: Colour = Colour(RGB8 { r: 0, g: 0, b: 0 });
    pub const BLUE: Colour = Colour(RGB8 { r: 0, g: 0, b: 255 });
    pub const GREY: Colour = Colour(RGB8 { r: 155, g: 155, b: 155 });

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
    }
}

impl From<RGB8> for Colour {
    fn from(rgb: RGB8) -> Self {
        Colour(rgb)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.0.r, self.0.g, self.0.b].serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl ViewState {
    pub fn centred_on(center: LngLat, zoom: f64) -> Self {
        Self {
            longitude: center[0],
            latitude: center[1],
            zoom,
            pitch: DEFAULT_PITCH,
        }
    }

    pub fn center(&self) -> LngLat {
        [self.longitude, self.latitude]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub html: String,
    pub style: TooltipStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipStyle {
    pub color: String,
}

impl Tooltip {
    pub fn name_in_bold() -> Self {
        Self {
            html: "<b>{name}</b>".to_string(),
            style: TooltipStyle {
                color: "white".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathDatum {
    pub path: Vec<LngLat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<usize>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<u8>,
    #[serde(rename = "veh", skip_serializing_if = "Option::is_none")]
    pub vehicle_slot: Option<u32>,
}

impl PathDatum {
    pub fn bare(path: Vec<LngLat>) -> Self {
        Self {
            path,
            src: None,
            category: None,
            vehicle_slot: None,
        }
    }
}

impl From<&Route> for PathDatum {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path.clone(),
            src: Some(route.src),
            category: Some(route.category),
            vehicle_slot: Some(route.vehicle_slot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointDatum {
    pub position: LngLat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconDatum {
    pub position: LngLat,
    pub name: String,
    pub icon_data: IconSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLayer {
    pub id: String,
    pub data: Vec<PathDatum>,
    pub get_path: &'static str,
    pub get_color: Colour,
    pub width_min_pixels: u32,
    pub rounded: bool,
    pub billboard: bool,
    pub pickable: bool,
    pub auto_highlight: bool,
}

impl PathLayer {
    pub fn new(id: impl Into<String>, data: Vec<PathDatum>, colour: Colour) -> Self {
        Self {
            id: id.into(),
            data,
            get_path: "@@=path",
            get_color: colour,
            width_min_pixels: 3,
            rounded: false,
            billboard: false,
            pickable: true,
            auto_highlight: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterplotLayer {
    pub id: String,
    pub data: Vec<PointDatum>,
    pub get_position: &'static str,
    pub get_fill_color: Colour,
    pub get_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_max_pixels: Option<u32>,
    pub opacity: f64,
    pub stroked: bool,
    pub filled: bool,
    pub pickable: bool,
}

impl ScatterplotLayer {
    pub fn new(id: impl Into<String>, data: Vec<PointDatum>, colour: Colour) -> Self {
        Self {
            id: id.into(),
            data,
            get_position: "@@=position",
            get_fill_color: colour,
            get_radius: 3999.0,
            radius_max_pixels: None,
            opacity: 1.0,
            stroked: true,
            filled: true,
            pickable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconLayer {
    pub id: String,
    pub data: Vec<IconDatum>,
    pub get_icon: &'static str,
    pub get_position: &'static str,
    pub get_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_color: Option<Colour>,
    pub size_scale: f64,
    pub size_min_pixels: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_max_pixels: Option<u32>,
    pub opacity: f64,
    pub billboard: bool,
    pub pickable: bool,
}

impl IconLayer {
    pub fn new(id: impl Into<String>, data: Vec<IconDatum>, size: u32) -> Self {
        Self {
            id: id.into(),
            data,
            get_icon: "@@=icon_data",
            get_position: "@@=position",
            get_size: size,
            get_color: None,
            size_scale: 1.0,
            size_min_pixels: 10,
            size_max_pixels: Some(100),
            opacity: 0.6,
            billboard: true,
            pickable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@@type")]
pub enum Layer {
    PathLayer(PathLayer),
    ScatterplotLayer(ScatterplotLayer),
    IconLayer(IconLayer),
}

impl Layer {
    pub fn id(&self) -> &str {
        match self {
            Layer::PathLayer(l) => &l.id,
            Layer::ScatterplotLayer(l) => &l.id,
            Layer::IconLayer(l) => &l.id,
        }
    }

    /// Rows in the layer's data slice.
    pub fn len(&self) -> usize {
        match self {
            Layer::PathLayer(l) => l.data.len(),
            Layer::ScatterplotLayer(l) => l.data.len(),
            Layer::IconLayer(l) => l.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn colour(&self) -> Option<Colour> {
        match self {
            Layer::PathLayer(l) => Some(l.get_color),
            Layer::ScatterplotLayer(l) => Some(l.get_fill_color),
            Layer::IconLayer(l) => l.get_color,
        }
    }

    /// Every position the layer anchors a marker at.
    pub fn positions(&self) -> Vec<LngLat> {
        match self {
            Layer::PathLayer(_) => Vec::new(),
            Layer::ScatterplotLayer(l) => l.data.iter().map(|d| d.position).collect(),
            Layer::IconLayer(l) => l.data.iter().map(|d| d.position).collect(),
        }
    }
}

impl From<PathLayer> for Layer {
    fn from(layer: PathLayer) -> Self {
        Layer::PathLayer(layer)
    }
}

impl From<ScatterplotLayer> for Layer {
    fn from(layer: ScatterplotLayer) -> Self {
        Layer::ScatterplotLayer(layer)
    }
}

impl From<IconLayer> for Layer {
    fn from(layer: IconLayer) -> Self {
        Layer::IconLayer(layer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub layers: Vec<Layer>,
    pub initial_view_state: ViewState,
    pub map_style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layer_json_shape() {
        let layer: Layer = PathLayer::new(
            "route-0",
            vec![PathDatum::bare(vec![[72.8, 19.0], [72.9, 19.1]])],
            Colour(RGB8 { r: 1, g: 2, b: 3 }),
        )
        .into();

        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["@@type"], json!("PathLayer"));
        assert_eq!(value["getColor"], json!([1, 2, 3]));
        assert_eq!(value["getPath"], json!("@@=path"));
        assert_eq!(value["widthMinPixels"], json!(3));
        assert_eq!(value["data"][0], json!({"path": [[72.8, 19.0], [72.9, 19.1]]}));
    }

    #[test]
    fn test_view_state_center_and_json() {
        let view = ViewState::centred_on([72.84, 19.06], 12.0);
        assert_eq!(view.center(), [72.84, 19.06]);
        assert_eq!(view.pitch, 30.0);
        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({"longitude": 72.84, "latitude": 19.06, "zoom": 12.0, "pitch": 30.0})
        );
    }

    #[test]
    fn test_colour_hex() {
        assert_eq!(Colour(RGB8 { r: 255, g: 87, b: 51 }).to_hex(), "#ff5733");
    }
}
