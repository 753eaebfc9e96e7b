mod components;
mod data;
mod filter;
mod geo;
mod model;
mod scenario;
mod scene;
mod state;
mod util;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
