use crate::error::SelectionError;
use std::fmt;
use std::str::FromStr;

/// Internal two-valued reduction of the vehicle class selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Light,
    Heavy,
}

impl Category {
    pub fn as_int(&self) -> u8 {
        match self {
            Category::Light => 0,
            Category::Heavy => 1,
        }
    }
}

/// Vehicle classes offered to the user.
///
/// | label         | category |
/// |---------------|----------|
/// | `Two-wheeler` | 0        |
/// | `Small van`   | 0        |
/// | `Large truck` | 1        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VehicleClass {
    TwoWheeler,
    #[default]
    SmallVan,
    LargeTruck,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::TwoWheeler,
        VehicleClass::SmallVan,
        VehicleClass::LargeTruck,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::TwoWheeler => "Two-wheeler",
            VehicleClass::SmallVan => "Small van",
            VehicleClass::LargeTruck => "Large truck",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            VehicleClass::TwoWheeler | VehicleClass::SmallVan => Category::Light,
            VehicleClass::LargeTruck => Category::Heavy,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleClass {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
                "twowheeler" => Some(VehicleClass::TwoWheeler),
                "smallvan" => Some(VehicleClass::SmallVan),
                "largetruck" => Some(VehicleClass::LargeTruck),
                _ => None,
            })
            .ok_or_else(|| SelectionError::UnknownVehicleClass(s.to_string()))
    }
}

/// The five depots, in the order the source dataset addresses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DepotLocation {
    #[default]
    SouthMumbai,
    Dadar,
    Bandra,
    Andheri,
    Thane,
}

impl DepotLocation {
    pub const ALL: [DepotLocation; 5] = [
        DepotLocation::SouthMumbai,
        DepotLocation::Dadar,
        DepotLocation::Bandra,
        DepotLocation::Andheri,
        DepotLocation::Thane,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DepotLocation::SouthMumbai => "South Mumbai (Gateway)",
            DepotLocation::Dadar => "Dadar (Central)",
            DepotLocation::Bandra => "Bandra (West)",
            DepotLocation::Andheri => "Andheri (North West)",
            DepotLocation::Thane => "Thane (East)",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for DepotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the display label or the numeric index.
impl FromStr for DepotLocation {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(index) = wanted.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| SelectionError::UnknownDepot(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|depot| depot.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SelectionError::UnknownDepot(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    SingleVehicle,
    FullNetwork,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::SingleVehicle, ViewMode::FullNetwork];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::SingleVehicle => "Single vehicle",
            ViewMode::FullNetwork => "Full network",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
                "single" | "singlevehicle" => Some(ViewMode::SingleVehicle),
                "network" | "fullnetwork" => Some(ViewMode::FullNetwork),
                _ => None,
            })
            .ok_or_else(|| SelectionError::UnknownView(s.to_string()))
    }
}

/// One state of the selection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Selection {
    pub mode: ViewMode,
    pub depot: DepotLocation,
    pub vehicle: VehicleClass,
}
