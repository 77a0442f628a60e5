//! # weekly-reports-client
//!
//! Leptos + WASM single-page client for the employee daily-entry and
//! weekly-report backend.
//!
//! The crate splits into a browser-independent core (configuration, REST
//! client, session store, route guard) and a thin Leptos shell behind the
//! `csr` feature. The core runs under native `cargo test` with an in-memory
//! transport and storage; the shell swaps in `fetch` and `localStorage`.

#[cfg(feature = "csr")]
pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod net;
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let config = config::ClientConfig::from_build_env();
    let _ = console_log::init_with_level(config.log_level);
    log::info!("starting weekly-reports client (api {})", config.api_base_url);
    leptos::mount::mount_to_body(app::App);
}
