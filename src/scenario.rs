//! Scenario Resolver: maps sidebar selections to the identifier of a
//! pre-rendered hazard raster. The token order and separators here must
//! match the naming of the files under `data/aqueduct/` exactly; nothing
//! checks that the resolved file actually exists.

use crate::model::ScenarioSelection;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScenarioIdentifier(String);

impl ScenarioIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the overlay image for this scenario, relative to the page.
    pub fn overlay_path(&self) -> String {
        format!("data/aqueduct/{}.png", self.0)
    }
}

impl fmt::Display for ScenarioIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic, pure. Shape:
/// `{flood_type}__rp{return_period:03}__{pathway}__{year}[__{model}]`.
pub fn resolve(selection: &ScenarioSelection) -> ScenarioIdentifier {
    let mut id = format!(
        "{}__rp{:03}__{}__{}",
        selection.hazard.flood_type(),
        selection.return_period.years(),
        selection.pathway.token(),
        selection.year.as_u16(),
    );
    if let Some(model) = selection.model {
        id.push_str("__");
        id.push_str(model.token());
    }
    ScenarioIdentifier(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClimateModel, HazardKind, Pathway, ReturnPeriod, ScenarioYear};

    #[test]
    fn riverine_rcp8p5_2050_rp25() {
        let sel = ScenarioSelection {
            hazard: HazardKind::River,
            year: ScenarioYear::Y2050,
            pathway: Pathway::Rcp8p5,
            return_period: ReturnPeriod::Rp25,
            model: None,
        };
        assert_eq!(resolve(&sel).as_str(), "inunriver__rp025__rcp8p5__2050");
    }

    #[test]
    fn return_period_is_three_digits_for_every_selection() {
        for hazard in HazardKind::ALL {
            for year in ScenarioYear::ALL {
                for pathway in Pathway::ALL {
                    for rp in ReturnPeriod::ALL {
                        let sel = ScenarioSelection {
                            hazard,
                            year,
                            pathway,
                            return_period: rp,
                            model: None,
                        };
                        let id = resolve(&sel);
                        let field = id
                            .as_str()
                            .split("__")
                            .nth(1)
                            .expect("identifier has a return period field");
                        assert!(field.starts_with("rp"));
                        assert_eq!(field.len(), 5, "bad field {field:?} in {id}");
                    }
                }
            }
        }
    }

    #[test]
    fn smallest_period_is_zero_padded() {
        let sel = ScenarioSelection {
            return_period: ReturnPeriod::Rp2,
            ..ScenarioSelection::default()
        };
        assert!(resolve(&sel).as_str().contains("__rp002__"));
    }

    #[test]
    fn model_suffix_is_appended_last() {
        let sel = ScenarioSelection {
            hazard: HazardKind::River,
            year: ScenarioYear::Y2080,
            pathway: Pathway::Rcp8p5,
            return_period: ReturnPeriod::Rp100,
            model: Some(ClimateModel::NorEsm1M),
        };
        assert_eq!(
            resolve(&sel).as_str(),
            "inunriver__rp100__rcp8p5__2080__noresm1-m"
        );
    }

    #[test]
    fn overlay_path_points_into_the_aqueduct_directory() {
        let id = resolve(&ScenarioSelection::default());
        assert_eq!(
            id.overlay_path(),
            "data/aqueduct/inuncoast__rp002__rcp4p5__2030.png"
        );
    }
}
