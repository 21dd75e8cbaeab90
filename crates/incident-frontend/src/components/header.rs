//! # Header Component
//!
//! Top bar with the title, the local clock and the backend status.

use chrono::{DateTime, Local};
use leptos::prelude::*;

use crate::state::use_app_state;

/// Header with title and live clock
#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();
    let (time, set_time) = signal(Local::now());

    // Update clock every second
    Effect::new(move |_| {
        let handle = gloo_timers::callback::Interval::new(1000, move || {
            set_time.set(Local::now());
        });
        handle.forget();
    });

    let format_clock = |dt: DateTime<Local>| dt.format("%H:%M:%S").to_string();
    let format_date = |dt: DateTime<Local>| dt.format("%d/%m/%Y").to_string();

    let backend_status = move || {
        if state.reports_error.with(Option::is_none) {
            ("nominal", "EN LÍNEA")
        } else {
            ("critical", "SIN CONEXIÓN")
        }
    };

    view! {
        <header class="app-header">
            <div class="logo">
                <svg class="logo-icon" viewBox="0 0 24 24" fill="currentColor">
                    <path d="M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5a2.5 2.5 0 0 1 0-5 2.5 2.5 0 0 1 0 5z"/>
                </svg>
                <div>
                    <div class="logo-text">"MAPA DE INCIDENTES"</div>
                    <div class="logo-subtitle">"CIUDAD DE MÉXICO"</div>
                </div>
            </div>

            <div class="clock">
                <div class="clock-segment">
                    <div class="clock-label">"HORA"</div>
                    <div class="clock-value">{move || format_clock(time.get())}</div>
                </div>
                <div class="clock-segment">
                    <div class="clock-label">"FECHA"</div>
                    <div class="clock-value">{move || format_date(time.get())}</div>
                </div>
            </div>

            <div class=move || format!("status-badge {}", backend_status().0)>
                <span class=move || format!("status-dot {}", backend_status().0)></span>
                {move || backend_status().1}
            </div>
        </header>
    }
}
