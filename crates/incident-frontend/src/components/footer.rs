//! # Footer Component
//!
//! Status bar with the loaded report count and the backend address.

use leptos::prelude::*;

use crate::services::use_backend;
use crate::state::use_app_state;

/// Footer status bar
#[component]
pub fn Footer() -> impl IntoView {
    let state = use_app_state();
    let api_base = use_backend().base_url().to_string();

    let report_count = move || state.reports.with(Vec::len);
    let alert_count = move || state.alerts.with(Vec::len);

    view! {
        <footer class="app-footer">
            <div class="flex items-center gap-lg">
                <span class="text-muted">{concat!("INCIDENTES CDMX v", env!("CARGO_PKG_VERSION"))}</span>
                <span class="text-muted">"|"</span>
                <span>
                    <span class="text-muted">"REPORTES: "</span>
                    <span class="text-accent">{report_count}</span>
                </span>
            </div>

            <div class="flex items-center gap-lg">
                {move || {
                    let count = alert_count();
                    (count > 0).then(|| view! {
                        <span class="status-badge warning">{count}" AVISOS"</span>
                    })
                }}
                <span class="text-muted">"API: "{api_base}</span>
            </div>
        </footer>
    }
}
