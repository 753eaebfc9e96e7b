use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::{
    AssetCategory, ClimateModel, DashboardAction, DashboardState, HazardKind, Pathway,
    ReturnPeriod, ScenarioYear,
};

const ALL_CITIES: &str = "All cities";

#[derive(Properties, PartialEq, Clone)]
pub struct SidebarProps {
    pub dashboard: UseReducerHandle<DashboardState>,
    pub city_names: Vec<String>,
}

fn section_title(text: &str) -> Html {
    html! { <div style="font-weight:600; margin:12px 0 6px 0; border-top:1px solid #30363d; padding-top:10px;">{ text }</div> }
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let dashboard = props.dashboard.clone();
    let state = (*dashboard).clone();

    let on_center_change = {
        let dashboard = dashboard.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let city = if value == ALL_CITIES { None } else { Some(value) };
            dashboard.dispatch(DashboardAction::SetCenterCity(city));
        })
    };

    let on_model_change = {
        let dashboard = dashboard.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let model = ClimateModel::ALL.iter().copied().find(|m| m.token() == value);
            dashboard.dispatch(DashboardAction::SetModel(model));
        })
    };

    let on_rp_input = {
        let dashboard = dashboard.clone();
        Callback::from(move |e: InputEvent| {
            let raw = e.target_unchecked_into::<HtmlInputElement>().value();
            if let Ok(idx) = raw.parse::<usize>() {
                dashboard.dispatch(DashboardAction::SetReturnPeriod(ReturnPeriod::from_index(idx)));
            }
        })
    };

    let hazard_radios = HazardKind::ALL.iter().map(|&hazard| {
        let dashboard = dashboard.clone();
        let onchange = Callback::from(move |_: Event| {
            dashboard.dispatch(DashboardAction::SetHazard(hazard));
        });
        html! {
            <label title={hazard.help()} style="display:flex; gap:6px; align-items:center; margin:2px 0;">
                <input type="radio" name="hazard" checked={state.selection.hazard == hazard} {onchange} />
                { hazard.label() }
            </label>
        }
    });

    let year_radios = ScenarioYear::ALL.iter().map(|&year| {
        let dashboard = dashboard.clone();
        let onchange = Callback::from(move |_: Event| {
            dashboard.dispatch(DashboardAction::SetYear(year));
        });
        html! {
            <label title="Year in which the predicted flooding is going to occur" style="display:flex; gap:6px; align-items:center; margin:2px 0;">
                <input type="radio" name="year" checked={state.selection.year == year} {onchange} />
                { year.as_u16().to_string() }
            </label>
        }
    });

    let pathway_radios = Pathway::ALL.iter().map(|&pathway| {
        let dashboard = dashboard.clone();
        let onchange = Callback::from(move |_: Event| {
            dashboard.dispatch(DashboardAction::SetPathway(pathway));
        });
        html! {
            <label title={pathway.help()} style="display:flex; gap:6px; align-items:center; margin:2px 0;">
                <input type="radio" name="pathway" checked={state.selection.pathway == pathway} {onchange} />
                { pathway.label() }
            </label>
        }
    });

    let category_checkboxes = AssetCategory::TOGGLABLE.iter().map(|&category| {
        let dashboard = dashboard.clone();
        let onchange = Callback::from(move |_: Event| {
            dashboard.dispatch(DashboardAction::ToggleCategory(category));
        });
        html! {
            <label style="display:flex; gap:6px; align-items:center; margin:2px 0;">
                <input type="checkbox" checked={state.filter.is_enabled(category)} {onchange} />
                { category.label() }
            </label>
        }
    });

    let rp = state.selection.return_period;
    let selected_model_token = state.selection.model.map(|m| m.token()).unwrap_or("median");

    html! {
        <div style="width:280px; flex-shrink:0; overflow-y:auto; background:#161b22; border-right:1px solid #30363d; padding:12px; font-size:13px;">
            <h2 style="margin:0 0 12px 0; font-size:17px;">{"7-Towns Flood Dashboard"}</h2>

            <div style="font-weight:600; margin-bottom:6px;">{"Center on"}</div>
            <select onchange={on_center_change} style="width:100%;">
                <option value={ALL_CITIES} selected={state.center_city.is_none()}>{ ALL_CITIES }</option>
                { for props.city_names.iter().map(|name| {
                    let selected = state.center_city.as_deref() == Some(name.as_str());
                    html!{ <option value={name.clone()} selected={selected}>{ name.clone() }</option> }
                }) }
            </select>

            { section_title("Hazards") }
            <div title="Pick which flood hazard map to overlay">{ for hazard_radios }</div>

            <div style="font-weight:600; margin:10px 0 4px 0;">{"Scenario year"}</div>
            { for year_radios }

            <div style="font-weight:600; margin:10px 0 4px 0;">{"Scenario pathway"}</div>
            { for pathway_radios }

            <div style="font-weight:600; margin:10px 0 4px 0;" title="Frequency with which the flooding event will reoccur">{"Return period"}</div>
            <input
                type="range"
                min="0"
                max={(ReturnPeriod::ALL.len() - 1).to_string()}
                step="1"
                value={rp.index().to_string()}
                oninput={on_rp_input}
                style="width:100%;"
            />
            <div style="font-size:11px; opacity:0.7;">{ format!("1 in {} years", rp.years()) }</div>

            <div style="font-weight:600; margin:10px 0 4px 0;">{"Climate model"}</div>
            <select onchange={on_model_change} style="width:100%;">
                <option value="median" selected={state.selection.model.is_none()}>{"Median (all models)"}</option>
                { for ClimateModel::ALL.iter().map(|m| {
                    html!{ <option value={m.token()} selected={selected_model_token == m.token()}>{ m.label() }</option> }
                }) }
            </select>

            { section_title("Assets") }
            { for category_checkboxes }
        </div>
    }
}
