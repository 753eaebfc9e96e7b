pub mod app;
pub mod legend;
pub mod legend_panel;
pub mod map_controls;
pub mod map_view;
pub mod sidebar;

pub use app::App;
