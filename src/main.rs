mod components;
mod config;
mod error;
mod model;
mod state;
mod util;
mod web;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    yew::Renderer::<App>::new().render();
}
