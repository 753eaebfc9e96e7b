use crate::geo::{GeoPoint, REGION_CENTER, REGION_ZOOM};

pub const MIN_ZOOM: f64 = 5.0;
pub const MAX_ZOOM: f64 = 15.0;
pub const ZOOM_STEP: f64 = 0.5;

/// Map camera: geographic center, fractional zoom level and drag state.
#[derive(Debug, Clone)]
pub struct Camera {
    pub center: GeoPoint,
    pub zoom: f64,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: REGION_CENTER,
            zoom: REGION_ZOOM,
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }
}

impl Camera {
    /// Recenter on a new view target (used when the "center on" selection
    /// changes).
    pub fn jump_to(&mut self, center: GeoPoint, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.panning = false;
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.zoom_by(100.0);
        assert_eq!(cam.zoom, MAX_ZOOM);
        cam.zoom_by(-100.0);
        assert_eq!(cam.zoom, MIN_ZOOM);
    }

    #[test]
    fn jump_to_resets_drag_state() {
        let mut cam = Camera {
            panning: true,
            ..Camera::default()
        };
        cam.jump_to(GeoPoint { lat: 22.8, lon: 89.5 }, 11.0);
        assert!(!cam.panning);
        assert_eq!(cam.zoom, 11.0);
    }
}
