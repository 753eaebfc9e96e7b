//! Asset Filter: selects the rows of the two tables that the sidebar
//! toggles allow. City centers are always kept; the city-level FSTP rows
//! are gated by the same toggle as the FSTP asset category.

use crate::model::{AssetCategory, AssetRecord, CategoryFilter};

/// Source order is preserved in both outputs; rows are never reordered.
pub fn filter_assets(
    assets: &[AssetRecord],
    cities: &[AssetRecord],
    filter: &CategoryFilter,
) -> (Vec<AssetRecord>, Vec<AssetRecord>) {
    let kept_assets = assets
        .iter()
        .filter(|a| filter.is_enabled(a.category))
        .cloned()
        .collect();
    let kept_cities = cities
        .iter()
        .filter(|c| match c.category {
            AssetCategory::CityCenter => true,
            AssetCategory::FstpSite => filter.fstp,
            _ => false,
        })
        .cloned()
        .collect();
    (kept_assets, kept_cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: AssetCategory, city: &str) -> AssetRecord {
        AssetRecord {
            latitude: 22.5,
            longitude: 90.0,
            category,
            city: city.to_string(),
        }
    }

    fn sample_tables() -> (Vec<AssetRecord>, Vec<AssetRecord>) {
        let assets = vec![
            record(AssetCategory::Education, "Khulna"),
            record(AssetCategory::Health, "Khulna"),
            record(AssetCategory::Market, "Bhola"),
            record(AssetCategory::Shelter, "Bhola"),
            record(AssetCategory::FstpSite, "Barguna"),
        ];
        let cities = vec![
            record(AssetCategory::CityCenter, "Khulna"),
            record(AssetCategory::FstpSite, "Khulna"),
            record(AssetCategory::CityCenter, "Bhola"),
        ];
        (assets, cities)
    }

    #[test]
    fn all_toggles_on_is_identity() {
        let (assets, cities) = sample_tables();
        let (fa, fc) = filter_assets(&assets, &cities, &CategoryFilter::default());
        assert_eq!(fa, assets);
        assert_eq!(fc, cities);
    }

    #[test]
    fn filtering_is_idempotent() {
        let (assets, cities) = sample_tables();
        let filter = CategoryFilter {
            health: false,
            fstp: false,
            ..CategoryFilter::default()
        };
        let (fa, fc) = filter_assets(&assets, &cities, &filter);
        let (fa2, fc2) = filter_assets(&fa, &fc, &filter);
        assert_eq!(fa, fa2);
        assert_eq!(fc, fc2);
    }

    #[test]
    fn fstp_toggle_gates_both_tables() {
        let (assets, cities) = sample_tables();
        let filter = CategoryFilter {
            fstp: false,
            ..CategoryFilter::default()
        };
        let (fa, fc) = filter_assets(&assets, &cities, &filter);
        assert!(fa.iter().all(|a| a.category != AssetCategory::FstpSite));
        assert!(fc.iter().all(|c| c.category != AssetCategory::FstpSite));
        // city centers survive regardless
        assert_eq!(fc.len(), 2);
    }

    #[test]
    fn order_is_preserved() {
        let (assets, cities) = sample_tables();
        let filter = CategoryFilter {
            education: false,
            ..CategoryFilter::default()
        };
        let (fa, _) = filter_assets(&assets, &cities, &filter);
        let expected: Vec<AssetRecord> = assets
            .iter()
            .filter(|a| a.category != AssetCategory::Education)
            .cloned()
            .collect();
        assert_eq!(fa, expected);
    }
}
