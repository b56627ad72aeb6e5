//! Church administration dashboard, compiled to WASM and mounted client-side.

pub mod app;
pub mod dashboards;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::task::spawn_local(async {
        shared::config::load_config().await;
        leptos::mount::mount_to_body(app::App);
    });
}
