//! Read-only data context, built once at startup from tables embedded in
//! the binary: the infrastructure asset table, the cities/coordinates
//! table, and the shared geographic extent of the pre-rendered hazard
//! rasters. Nothing in here is mutated after `load()` returns.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::geo::{GeoBounds, GeoPoint};
use crate::model::{AssetCategory, AssetRecord};

const ASSETS_CSV: &str = include_str!("../data/assets_filtered.csv");
const CITIES_CSV: &str = include_str!("../data/coordinates.csv");
const BOUNDS_JSON: &str = include_str!("../data/aqueduct_bounds.json");

/// Row shape shared by both CSV tables.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "City")]
    city: String,
}

pub struct DataContext {
    assets: Vec<AssetRecord>,
    cities: Vec<AssetRecord>,
    raster_bounds: GeoBounds,
}

impl DataContext {
    pub fn load() -> Result<Self> {
        let assets = parse_table(ASSETS_CSV, "assets_filtered.csv")?;
        let cities = parse_table(CITIES_CSV, "coordinates.csv")?;
        let raster_bounds: GeoBounds =
            serde_json::from_str(BOUNDS_JSON).context("parsing aqueduct_bounds.json")?;
        Ok(Self {
            assets,
            cities,
            raster_bounds,
        })
    }

    /// Point-like infrastructure assets, in table order.
    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    /// City-level rows (city centers and city FSTP sites), in table order.
    pub fn cities(&self) -> &[AssetRecord] {
        &self.cities
    }

    pub fn city_centers(&self) -> impl Iterator<Item = &AssetRecord> {
        self.cities
            .iter()
            .filter(|r| r.category == AssetCategory::CityCenter)
    }

    /// Coordinate of the named city's center row, if present.
    pub fn center_of(&self, city: &str) -> Option<GeoPoint> {
        self.city_centers().find(|r| r.city == city).map(|r| GeoPoint {
            lat: r.latitude,
            lon: r.longitude,
        })
    }

    /// Unique city names in table order, for the "center on" dropdown.
    pub fn city_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for r in self.city_centers() {
            if !names.iter().any(|n| *n == r.city) {
                names.push(r.city.clone());
            }
        }
        names
    }

    /// Extent of the reference raster. Every per-scenario overlay shares
    /// this extent, so it is read once and reused.
    pub fn raster_bounds(&self) -> GeoBounds {
        self.raster_bounds
    }
}

fn parse_table(raw: &str, name: &str) -> Result<Vec<AssetRecord>> {
    let mut rows = Vec::new();
    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    for (i, row) in reader.deserialize::<RawRow>().enumerate() {
        let row = row.with_context(|| format!("{name}: row {}", i + 1))?;
        let category = AssetCategory::from_csv_token(&row.kind)
            .with_context(|| format!("{name}: row {}: unknown asset type {:?}", i + 1, row.kind))?;
        rows.push(AssetRecord {
            latitude: row.latitude,
            longitude: row.longitude,
            category,
            city: row.city,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_load() {
        let ctx = DataContext::load().expect("embedded data should parse");
        assert!(!ctx.assets().is_empty());
        assert!(!ctx.cities().is_empty());
        assert!(ctx.assets().iter().all(|a| a.category != AssetCategory::CityCenter));
    }

    #[test]
    fn seven_city_centers() {
        let ctx = DataContext::load().unwrap();
        assert_eq!(ctx.city_centers().count(), 7);
        assert_eq!(ctx.city_names().len(), 7);
        assert_eq!(ctx.city_names()[0], "Khulna");
    }

    #[test]
    fn center_lookup() {
        let ctx = DataContext::load().unwrap();
        let khulna = ctx.center_of("Khulna").expect("Khulna has a center row");
        assert!((khulna.lat - 22.8456).abs() < 1e-9);
        assert!(ctx.center_of("Dhaka").is_none());
    }

    #[test]
    fn raster_bounds_cover_the_city_centers() {
        let ctx = DataContext::load().unwrap();
        let b = ctx.raster_bounds();
        assert!(b.north > b.south && b.east > b.west);
        for c in ctx.city_centers() {
            assert!(c.latitude > b.south && c.latitude < b.north, "{}", c.city);
            assert!(c.longitude > b.west && c.longitude < b.east, "{}", c.city);
        }
    }

    #[test]
    fn unknown_category_token_is_a_load_error() {
        let bad = "Type,Latitude,Longitude,City\nhospital,22.0,90.0,Khulna\n";
        let err = parse_table(bad, "bad.csv").unwrap_err();
        assert!(format!("{err:#}").contains("unknown asset type"));
    }
}
