use yew::prelude::*;

use super::{legend_panel::LegendPanel, map_view::MapView, sidebar::Sidebar};
use crate::data::DataContext;
use crate::filter::filter_assets;
use crate::geo::{CITY_ZOOM, REGION_CENTER, REGION_ZOOM};
use crate::model::{AssetCategory, DashboardState};
use crate::scenario::resolve;
use crate::scene::SceneCache;
use crate::util::clog;

const STORAGE_KEY: &str = "fd_dashboard_state";

fn restore_state() -> DashboardState {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                if let Ok(state) = serde_json::from_str(&raw) {
                    return state;
                }
            }
        }
    }
    DashboardState::default()
}

#[function_component(App)]
pub fn app() -> Html {
    let data = use_memo((), |_| DataContext::load());
    let dashboard = use_reducer(restore_state);
    let scene_cache = use_mut_ref(SceneCache::new);

    // Persist sidebar state changes
    {
        let dashboard = dashboard.clone();
        use_effect_with((*dashboard).clone(), move |state: &DashboardState| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(s) = serde_json::to_string(state) {
                        let _ = store.set_item(STORAGE_KEY, &s);
                    }
                }
            }
            || ()
        });
    }

    let ctx = match &*data {
        Ok(ctx) => ctx,
        Err(e) => {
            clog(&format!("data load failed: {e:#}"));
            return html! {
                <div style="height:100vh; display:flex; align-items:center; justify-content:center; background:#0d1117; color:#f85149; font-family:system-ui,sans-serif;">
                    <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:16px; max-width:480px;">
                        <div style="font-weight:600; margin-bottom:6px;">{"Failed to load dashboard data"}</div>
                        <div style="font-size:13px; opacity:0.8;">{ format!("{e:#}") }</div>
                    </div>
                </div>
            };
        }
    };

    let scenario = resolve(&dashboard.selection);
    let (assets, cities) = filter_assets(ctx.assets(), ctx.cities(), &dashboard.filter);
    let scene = scene_cache
        .borrow_mut()
        .get_or_build(&assets, &cities, &scenario, ctx.raster_bounds());

    let (center, zoom) = dashboard
        .center_city
        .as_deref()
        .and_then(|name| ctx.center_of(name))
        .map(|p| (p, CITY_ZOOM))
        .unwrap_or((REGION_CENTER, REGION_ZOOM));

    let visible_categories: Vec<AssetCategory> = AssetCategory::ALL
        .iter()
        .copied()
        .filter(|&c| dashboard.filter.is_enabled(c))
        .collect();

    html! {
        <div style="display:flex; height:100vh; background:#0d1117; color:#c9d1d9; font-family:system-ui,sans-serif;">
            <Sidebar dashboard={dashboard.clone()} city_names={ctx.city_names()} />
            <div style="position:relative; flex:1; overflow:hidden;">
                <MapView scene={scene} {center} {zoom} />
                <div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:6px 10px; font-size:12px; font-family:monospace;">
                    { scenario.as_str() }
                </div>
                <LegendPanel categories={visible_categories} />
            </div>
        </div>
    }
}
