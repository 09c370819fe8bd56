pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod fetch;
#[cfg(feature = "ssr")]
pub mod middleware;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod services;
pub mod state;
pub mod telemetry;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    use crate::config::ApiConfig;
    use leptos::prelude::provide_context;

    let config = ApiConfig::from_document().unwrap_or_default();
    telemetry::init_client(&config.client_log_level);
    log::info!("hydrating against backend {}", config.base_url);

    leptos::mount::hydrate_body(move || {
        provide_context(config);
        App()
    });
}
