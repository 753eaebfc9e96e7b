use super::legend::LegendRow;
use crate::model::AssetCategory;
use crate::scene::DEPTH_LEGEND_MAX_M;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    /// Categories currently visible on the map, in render order.
    pub categories: Vec<AssetCategory>,
}

#[function_component(LegendPanel)]
pub fn legend_panel(props: &LegendPanelProps) -> Html {
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:190px; font-size:13px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        { for props.categories.iter().map(|c| html!{ <LegendRow color={c.color()} label={c.label()} /> }) }
        <div style="font-weight:600; margin:8px 0 4px 0;">{"Flood depth (m)"}</div>
        // Fixed-domain ramp; the selected raster's actual depth range does
        // not move it.
        <div style="height:10px; border-radius:2px; background:linear-gradient(to right, #c6dbef, #4292c6, #08306b);"></div>
        <div style="display:flex; justify-content:space-between; font-size:10px; opacity:0.7;">
            <span>{"0"}</span>
            <span>{ format!("{DEPTH_LEGEND_MAX_M:.0}") }</span>
        </div>
    </div>}
}
