use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Coordinate readout shown next to the selected marker.
pub fn format_latlon(lat: f64, lon: f64) -> String {
    format!("{lat:.4}, {lon:.4}")
}
