use crate::frame::DatasetKind;

/// `[longitude, latitude]`, the ordering used by every dataset and every layer.
pub type LngLat = [f64; 2];

pub const MAP_PIN_ICON_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/d/d1/Google_Maps_pin.svg/137px-Google_Maps_pin.svg.png";

/// Icon atlas entry attached to every depot at load time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub anchor_y: u32,
    pub mask: bool,
}

impl Default for IconSpec {
    fn default() -> Self {
        Self {
            url: MAP_PIN_ICON_URL.to_string(),
            width: 137,
            height: 240,
            anchor_y: 240,
            mask: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Depot {
    pub id: usize,
    pub name: String,
    pub coordinates: LngLat,
    #[serde(rename = "icon_data")]
    pub icon: IconSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DestinationPoint {
    pub coordinates: LngLat,
    #[serde(rename = "labels")]
    pub cluster_label: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub src: usize,
    #[serde(rename = "type")]
    pub category: u8,
    #[serde(rename = "veh")]
    pub vehicle_slot: u32,
    pub path: Vec<LngLat>,
}

impl Route {
    pub fn origin(&self) -> Option<LngLat> {
        self.path.first().copied()
    }

    /// Interior stops. The terminal point stays out of this slice.
    pub fn intermediate_stops(&self) -> &[LngLat] {
        let len = self.path.len();
        if len < 2 { &[] } else { &self.path[1..len - 1] }
    }

    /// Midpoint-index camera anchor, `path[len / 2]`.
    pub fn midpoint(&self) -> Option<LngLat> {
        self.path.get(self.path.len() / 2).copied()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DestinationDataset {
    pub points: Vec<DestinationPoint>,
}

impl DestinationDataset {
    /// Number of distinct cluster labels.
    pub fn cluster_count(&self) -> usize {
        use itertools::Itertools;
        self.points.iter().map(|p| p.cluster_label).unique().count()
    }

    pub fn in_cluster(&self, label: u32) -> impl Iterator<Item = &DestinationPoint> {
        self.points.iter().filter(move |p| p.cluster_label == label)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FullPathDataset {
    pub routes: Vec<Route>,
}

impl FullPathDataset {
    /// Number of distinct `src` values.
    pub fn depot_count(&self) -> usize {
        use itertools::Itertools;
        self.routes.iter().map(|r| r.src).unique().count()
    }

    pub fn from_depot(&self, depot_id: usize) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |r| r.src == depot_id)
    }

    /// First row in dataset order matching the full key.
    pub fn find(&self, depot_id: usize, category: u8, vehicle_slot: u32) -> Option<&Route> {
        self.routes.iter().find(|r| {
            r.src == depot_id && r.category == category && r.vehicle_slot == vehicle_slot
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceDataset {
    pub depots: Vec<Depot>,
}

impl SourceDataset {
    pub fn get(&self, depot_id: usize) -> Option<&Depot> {
        self.depots.get(depot_id)
    }
}

/// The three datasets produced together by the route generator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Datasets {
    pub destinations: DestinationDataset,
    pub full_paths: FullPathDataset,
    pub sources: SourceDataset,
}

impl Datasets {
    pub fn row_counts(&self) -> [(DatasetKind, usize); 3] {
        [
            (DatasetKind::Destinations, self.destinations.points.len()),
            (DatasetKind::FullPaths, self.full_paths.routes.len()),
            (DatasetKind::Sources, self.sources.depots.len()),
        ]
    }
}

/// `{ fulldf, destdf, srcdf }`, records orient.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<'a> {
    pub fulldf: &'a [Route],
    pub destdf: &'a [DestinationPoint],
    pub srcdf: &'a [Depot],
}

impl<'a> From<&'a Datasets> for DataEnvelope<'a> {
    fn from(data: &'a Datasets) -> Self {
        Self {
            fulldf: &data.full_paths.routes,
            destdf: &data.destinations.points,
            srcdf: &data.sources.depots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(src: usize, category: u8, vehicle_slot: u32, path: Vec<LngLat>) -> Route {
        Route {
            src,
            category,
            vehicle_slot,
            path,
        }
    }

    #[test]
    fn test_intermediate_stops_drop_terminal_point() {
        let r = route(
            0,
            1,
            0,
            vec![[72.8, 19.0], [72.81, 19.01], [72.82, 19.02], [72.8, 19.0]],
        );
        assert_eq!(r.intermediate_stops(), &[[72.81, 19.01], [72.82, 19.02]]);
        assert_eq!(r.origin(), Some([72.8, 19.0]));

        let short = route(0, 1, 0, vec![[72.8, 19.0], [72.9, 19.1]]);
        assert!(short.intermediate_stops().is_empty());
    }

    #[test]
    fn test_midpoint_uses_floor_of_half_length() {
        let r = route(0, 1, 0, vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
        assert_eq!(r.midpoint(), Some([2.0, 2.0]));
    }

    #[test]
    fn test_empty_path_has_no_anchor() {
        let r = route(0, 1, 0, Vec::new());
        assert_eq!(r.origin(), None);
        assert_eq!(r.midpoint(), None);
        assert!(r.intermediate_stops().is_empty());
    }

    #[test]
    fn test_find_returns_first_match_in_dataset_order() {
        let data = FullPathDataset {
            routes: vec![
                route(1, 1, 0, vec![[1.0, 1.0], [1.5, 1.5]]),
                route(1, 1, 0, vec![[2.0, 2.0], [2.5, 2.5]]),
            ],
        };
        assert_eq!(data.find(1, 1, 0).map(|r| r.path[0]), Some([1.0, 1.0]));
        assert!(data.find(1, 0, 0).is_none());
    }

    #[test]
    fn test_distinct_counts() {
        let dests = DestinationDataset {
            points: vec![
                DestinationPoint {
                    coordinates: [0.0, 0.0],
                    cluster_label: 0,
                },
                DestinationPoint {
                    coordinates: [0.1, 0.1],
                    cluster_label: 2,
                },
                DestinationPoint {
                    coordinates: [0.2, 0.2],
                    cluster_label: 0,
                },
            ],
        };
        assert_eq!(dests.cluster_count(), 2);
        assert_eq!(dests.in_cluster(0).count(), 2);
    }
}
