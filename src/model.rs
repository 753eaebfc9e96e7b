//! Core data model for the flood hazard dashboard.
//! Scenario dimensions are field-less enums with fixed token sets so the
//! resolved raster identifier can never fall out of step with the naming
//! convention of the pre-rendered overlay files.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Coastal,
    River,
}

impl HazardKind {
    pub const ALL: [HazardKind; 2] = [HazardKind::Coastal, HazardKind::River];

    /// Token used in the raster file naming convention.
    pub fn flood_type(self) -> &'static str {
        match self {
            HazardKind::Coastal => "inuncoast",
            HazardKind::River => "inunriver",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HazardKind::Coastal => "Coastal flooding",
            HazardKind::River => "River flooding",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            HazardKind::Coastal => "Flooding resulting from storm surges along coastlines",
            HazardKind::River => "Flooding originating from river overflow",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioYear {
    Y2030,
    Y2050,
    Y2080,
}

impl ScenarioYear {
    pub const ALL: [ScenarioYear; 3] =
        [ScenarioYear::Y2030, ScenarioYear::Y2050, ScenarioYear::Y2080];

    pub fn as_u16(self) -> u16 {
        match self {
            ScenarioYear::Y2030 => 2030,
            ScenarioYear::Y2050 => 2050,
            ScenarioYear::Y2080 => 2080,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pathway {
    Rcp4p5,
    Rcp8p5,
}

impl Pathway {
    pub const ALL: [Pathway; 2] = [Pathway::Rcp4p5, Pathway::Rcp8p5];

    pub fn token(self) -> &'static str {
        match self {
            Pathway::Rcp4p5 => "rcp4p5",
            Pathway::Rcp8p5 => "rcp8p5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pathway::Rcp4p5 => "RCP 4.5",
            Pathway::Rcp8p5 => "RCP 8.5",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Pathway::Rcp4p5 => {
                "Optimistic climate scenario assuming declining emissions from 2040 to 2100"
            }
            Pathway::Rcp8p5 => {
                "Pessimistic climate scenario assuming steadily increasing emissions until 2100"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnPeriod {
    Rp2,
    Rp5,
    Rp10,
    Rp25,
    Rp50,
    Rp100,
}

impl ReturnPeriod {
    pub const ALL: [ReturnPeriod; 6] = [
        ReturnPeriod::Rp2,
        ReturnPeriod::Rp5,
        ReturnPeriod::Rp10,
        ReturnPeriod::Rp25,
        ReturnPeriod::Rp50,
        ReturnPeriod::Rp100,
    ];

    pub fn years(self) -> u16 {
        match self {
            ReturnPeriod::Rp2 => 2,
            ReturnPeriod::Rp5 => 5,
            ReturnPeriod::Rp10 => 10,
            ReturnPeriod::Rp25 => 25,
            ReturnPeriod::Rp50 => 50,
            ReturnPeriod::Rp100 => 100,
        }
    }

    /// Slider position for this return period.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|rp| *rp == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> ReturnPeriod {
        *Self::ALL.get(idx).unwrap_or(&ReturnPeriod::Rp100)
    }
}

/// Global climate models behind the pre-rendered riverine rasters.
/// Selecting one appends its token to the scenario identifier; `None`
/// selects the model-free (median) raster set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateModel {
    GfdlEsm2m,
    HadGem2Es,
    IpslCm5aLr,
    MirocEsmChem,
    NorEsm1M,
}

impl ClimateModel {
    pub const ALL: [ClimateModel; 5] = [
        ClimateModel::GfdlEsm2m,
        ClimateModel::HadGem2Es,
        ClimateModel::IpslCm5aLr,
        ClimateModel::MirocEsmChem,
        ClimateModel::NorEsm1M,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ClimateModel::GfdlEsm2m => "gfdl-esm2m",
            ClimateModel::HadGem2Es => "hadgem2-es",
            ClimateModel::IpslCm5aLr => "ipsl-cm5a-lr",
            ClimateModel::MirocEsmChem => "miroc-esm-chem",
            ClimateModel::NorEsm1M => "noresm1-m",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClimateModel::GfdlEsm2m => "GFDL-ESM2M",
            ClimateModel::HadGem2Es => "HadGEM2-ES",
            ClimateModel::IpslCm5aLr => "IPSL-CM5A-LR",
            ClimateModel::MirocEsmChem => "MIROC-ESM-CHEM",
            ClimateModel::NorEsm1M => "NorESM1-M",
        }
    }
}

/// One full set of sidebar hazard selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSelection {
    pub hazard: HazardKind,
    pub year: ScenarioYear,
    pub pathway: Pathway,
    pub return_period: ReturnPeriod,
    pub model: Option<ClimateModel>,
}

impl Default for ScenarioSelection {
    fn default() -> Self {
        Self {
            hazard: HazardKind::Coastal,
            year: ScenarioYear::Y2030,
            pathway: Pathway::Rcp4p5,
            return_period: ReturnPeriod::Rp2,
            model: None,
        }
    }
}

/// Infrastructure asset categories, with their marker color, display name
/// and the token the CSV tables store them under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    FstpSite,
    CityCenter,
    Health,
    Market,
    Education,
    Shelter,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 6] = [
        AssetCategory::FstpSite,
        AssetCategory::CityCenter,
        AssetCategory::Health,
        AssetCategory::Market,
        AssetCategory::Education,
        AssetCategory::Shelter,
    ];

    /// The five categories exposed as sidebar toggles (city centers are
    /// always shown and have no checkbox).
    pub const TOGGLABLE: [AssetCategory; 5] = [
        AssetCategory::Market,
        AssetCategory::Education,
        AssetCategory::Shelter,
        AssetCategory::Health,
        AssetCategory::FstpSite,
    ];

    pub fn color(self) -> &'static str {
        match self {
            AssetCategory::FstpSite => "#388bfd",
            AssetCategory::CityCenter => "#f85149",
            AssetCategory::Health => "#bc8cff",
            AssetCategory::Market => "#2ea043",
            AssetCategory::Education => "#d2b48c",
            AssetCategory::Shelter => "#8b949e",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetCategory::FstpSite => "FSTP Sites",
            AssetCategory::CityCenter => "City Center",
            AssetCategory::Health => "Healthcare institutions",
            AssetCategory::Market => "Market centres",
            AssetCategory::Education => "Educational institutions",
            AssetCategory::Shelter => "Cyclone shelters",
        }
    }

    pub fn csv_token(self) -> &'static str {
        match self {
            AssetCategory::FstpSite => "FSTP Site",
            AssetCategory::CityCenter => "City Center",
            AssetCategory::Health => "health",
            AssetCategory::Market => "growth",
            AssetCategory::Education => "edu",
            AssetCategory::Shelter => "shelter",
        }
    }

    pub fn from_csv_token(token: &str) -> Option<AssetCategory> {
        Self::ALL.iter().copied().find(|c| c.csv_token() == token)
    }
}

/// One row of the asset or city tables. Loaded once at startup, never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub category: AssetCategory,
    pub city: String,
}

/// Sidebar category toggles. City centers are always on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub market: bool,
    pub education: bool,
    pub shelter: bool,
    pub health: bool,
    pub fstp: bool,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            market: true,
            education: true,
            shelter: true,
            health: true,
            fstp: true,
        }
    }
}

impl CategoryFilter {
    pub fn is_enabled(&self, category: AssetCategory) -> bool {
        match category {
            AssetCategory::CityCenter => true,
            AssetCategory::Market => self.market,
            AssetCategory::Education => self.education,
            AssetCategory::Shelter => self.shelter,
            AssetCategory::Health => self.health,
            AssetCategory::FstpSite => self.fstp,
        }
    }

    pub fn toggled(mut self, category: AssetCategory) -> Self {
        match category {
            AssetCategory::CityCenter => {}
            AssetCategory::Market => self.market = !self.market,
            AssetCategory::Education => self.education = !self.education,
            AssetCategory::Shelter => self.shelter = !self.shelter,
            AssetCategory::Health => self.health = !self.health,
            AssetCategory::FstpSite => self.fstp = !self.fstp,
        }
        self
    }
}

/// Everything the sidebar edits: hazard selections, category toggles and
/// the "center on" choice (`None` = all cities).
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub selection: ScenarioSelection,
    pub filter: CategoryFilter,
    pub center_city: Option<String>,
}

#[derive(Clone, Debug)]
pub enum DashboardAction {
    SetHazard(HazardKind),
    SetYear(ScenarioYear),
    SetPathway(Pathway),
    SetReturnPeriod(ReturnPeriod),
    SetModel(Option<ClimateModel>),
    ToggleCategory(AssetCategory),
    SetCenterCity(Option<String>),
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use DashboardAction::*;
        let mut new = (*self).clone();
        match action {
            SetHazard(h) => new.selection.hazard = h,
            SetYear(y) => new.selection.year = y,
            SetPathway(p) => new.selection.pathway = p,
            SetReturnPeriod(rp) => new.selection.return_period = rp,
            SetModel(m) => new.selection.model = m,
            ToggleCategory(c) => new.filter = new.filter.toggled(c),
            SetCenterCity(c) => new.center_city = c,
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_tokens_round_trip() {
        for cat in AssetCategory::ALL {
            assert_eq!(AssetCategory::from_csv_token(cat.csv_token()), Some(cat));
        }
        assert_eq!(AssetCategory::from_csv_token("hospital"), None);
    }

    #[test]
    fn city_centers_cannot_be_toggled_off() {
        let f = CategoryFilter::default().toggled(AssetCategory::CityCenter);
        assert!(f.is_enabled(AssetCategory::CityCenter));
        assert_eq!(f, CategoryFilter::default());
    }

    #[test]
    fn return_period_slider_mapping() {
        assert_eq!(ReturnPeriod::from_index(0), ReturnPeriod::Rp2);
        assert_eq!(ReturnPeriod::from_index(3).years(), 25);
        assert_eq!(ReturnPeriod::Rp100.index(), 5);
        // out-of-range slider values clamp to the largest period
        assert_eq!(ReturnPeriod::from_index(99), ReturnPeriod::Rp100);
    }

    #[test]
    fn reducer_updates_one_field_at_a_time() {
        let state = Rc::new(DashboardState::default());
        let state = state.reduce(DashboardAction::SetHazard(HazardKind::River));
        assert_eq!(state.selection.hazard, HazardKind::River);
        assert_eq!(state.selection.pathway, Pathway::Rcp4p5);

        let state = state.reduce(DashboardAction::ToggleCategory(AssetCategory::FstpSite));
        assert!(!state.filter.fstp);
        assert!(state.filter.health);
    }
}
