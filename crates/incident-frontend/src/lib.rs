//! # Incident Map Frontend
//!
//! Browser map of Mexico City for reporting incidents, browsing recent
//! reports and querying aggregate statistics.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod components;
pub mod config;
pub mod controllers;
pub mod services;
pub mod state;

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};
use wasm_bindgen::prelude::wasm_bindgen;

use components::*;
use config::ApiConfig;
use controllers::*;
use services::*;
use state::*;

#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    provide_meta_context();
    provide_app_state();
    provide_backend(config);
    provide_reports_controller();

    let state = use_app_state();
    let reports = use_reports();
    let panel_stats = StatsController::new(use_backend());
    let search_stats = StatsController::new(use_backend());

    // Startup: reports and the panel's option lists load concurrently
    {
        let reports = reports.clone();
        let panel_stats = panel_stats.clone();
        spawn_local(async move {
            futures::join!(reports.load_compact(), panel_stats.load_options());
            log::info!("Initial load finished");
        });
    }
    reports.start_refresh();

    let open_search = {
        let search_stats = search_stats.clone();
        Callback::new(move |()| {
            state.open_modal(ModalKind::StatsSearch);
            search_stats.spawn_load_options();
        })
    };

    view! {
        <Title text="Mapa de Incidentes CDMX" />
        <div class="app-container">
            <Header />
            <div class="app-left-panel">
                <ReportForm />
                <StatsPanel stats=panel_stats.clone() on_open_search=open_search />
            </div>
            <div class="app-main">
                <MapPanel />
            </div>
            <div class="app-right-panel">
                <ReportListPanel />
            </div>
            <Footer />
        </div>
        <ReportsModal />
        <StatsSearchModal stats=search_stats />
        <StatsDetailModal stats=panel_stats />
        <ToastContainer />
    }
}

#[component]
fn ToastContainer() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="toast-container">
            <For
                each=move || state.alerts.get()
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    view! {
                        <div class=format!("toast {}", alert.severity.class())>
                            <div class="flex justify-between items-center gap-md">
                                <div class="flex items-center gap-sm">
                                    <span class=format!("status-dot {}", alert.severity.class())></span>
                                    <span class="text-xs text-muted">
                                        {alert.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()}
                                    </span>
                                    <span>{alert.message.clone()}</span>
                                </div>
                                <button class="btn btn-sm" on:click=move |_| state.dismiss(id)>"×"</button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let config = ApiConfig::from_location();
    log::info!(
        "Incident map frontend v{} using API at {}",
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
