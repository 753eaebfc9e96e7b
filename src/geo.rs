//! Planar geo helpers: city bounding boxes and the canvas viewport
//! projection. Everything here is a flat-earth approximation; it holds up
//! at the scale of the towns this dashboard covers and is not geodesically
//! exact.

use serde::Deserialize;

/// Degrees of latitude per meter, inverted (approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// Default view when no city is selected.
pub const REGION_CENTER: GeoPoint = GeoPoint {
    lat: 23.241346102386135,
    lon: 89.95056152343751,
};
pub const REGION_ZOOM: f64 = 8.0;
pub const CITY_ZOOM: f64 = 11.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Geographic extent. Deserialized field names follow the raster metadata
/// convention (bottom/left/top/right).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct GeoBounds {
    #[serde(rename = "bottom")]
    pub south: f64,
    #[serde(rename = "left")]
    pub west: f64,
    #[serde(rename = "top")]
    pub north: f64,
    #[serde(rename = "right")]
    pub east: f64,
}

impl GeoBounds {
    pub fn south_west(&self) -> GeoPoint {
        GeoPoint {
            lat: self.south,
            lon: self.west,
        }
    }

    pub fn north_east(&self) -> GeoPoint {
        GeoPoint {
            lat: self.north,
            lon: self.east,
        }
    }
}

/// Square box of `half_width_m` meters around a city center, via the
/// planar approximation: one degree of latitude is taken as 111 km and
/// longitude degrees shrink with cos(latitude).
pub fn city_bounding_box(center: GeoPoint, half_width_m: f64) -> GeoBounds {
    let lat_offset = half_width_m / METERS_PER_DEGREE_LAT;
    let lon_offset = lat_offset / center.lat.to_radians().cos();
    GeoBounds {
        south: center.lat - lat_offset,
        west: center.lon - lon_offset,
        north: center.lat + lat_offset,
        east: center.lon + lon_offset,
    }
}

/// Maps lat/lon to canvas pixels around a center point. The scale follows
/// the slippy-map convention (256 px tiles doubling per zoom level),
/// applied to both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl Viewport {
    pub fn px_per_degree(&self) -> f64 {
        256.0 * self.zoom.exp2() / 360.0
    }

    pub fn project(&self, p: GeoPoint) -> (f64, f64) {
        let s = self.px_per_degree();
        (
            self.width_px * 0.5 + (p.lon - self.center.lon) * s,
            self.height_px * 0.5 - (p.lat - self.center.lat) * s,
        )
    }

    pub fn unproject(&self, x: f64, y: f64) -> GeoPoint {
        let s = self.px_per_degree();
        GeoPoint {
            lat: self.center.lat - (y - self.height_px * 0.5) / s,
            lon: self.center.lon + (x - self.width_px * 0.5) / s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn bounding_box_spans_at_lat_23() {
        let b = city_bounding_box(GeoPoint { lat: 23.0, lon: 90.0 }, 10_000.0);
        let lat_span = b.north - b.south;
        let lon_span = b.east - b.west;
        let expected_lat = 2.0 * 10_000.0 / 111_000.0;
        assert!((lat_span - expected_lat).abs() < EPS, "lat span {lat_span}");
        let expected_lon = expected_lat / 23.0_f64.to_radians().cos();
        assert!((lon_span - expected_lon).abs() < EPS, "lon span {lon_span}");
    }

    #[test]
    fn bounding_box_is_centered() {
        let c = GeoPoint { lat: 22.5, lon: 89.9 };
        let b = city_bounding_box(c, 10_000.0);
        assert!(((b.north + b.south) * 0.5 - c.lat).abs() < EPS);
        assert!(((b.east + b.west) * 0.5 - c.lon).abs() < EPS);
    }

    #[test]
    fn projection_puts_the_center_mid_canvas() {
        let vp = Viewport {
            center: REGION_CENTER,
            zoom: 8.0,
            width_px: 800.0,
            height_px: 600.0,
        };
        let (x, y) = vp.project(REGION_CENTER);
        assert!((x - 400.0).abs() < EPS);
        assert!((y - 300.0).abs() < EPS);
    }

    #[test]
    fn project_unproject_round_trip() {
        let vp = Viewport {
            center: REGION_CENTER,
            zoom: 11.0,
            width_px: 1024.0,
            height_px: 768.0,
        };
        let p = GeoPoint { lat: 22.8456, lon: 89.5403 };
        let (x, y) = vp.project(p);
        let back = vp.unproject(x, y);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn north_is_up() {
        let vp = Viewport {
            center: REGION_CENTER,
            zoom: 8.0,
            width_px: 800.0,
            height_px: 600.0,
        };
        let north = GeoPoint {
            lat: REGION_CENTER.lat + 0.5,
            lon: REGION_CENTER.lon,
        };
        let (_, y) = vp.project(north);
        assert!(y < 300.0);
    }
}
