//! # Statistics Panel Component
//!
//! Sidebar query form with the cascading borough → neighborhood filter.

use incident_domain::{FilterSelection, NeighborhoodSelector, PANEL_STATS_LIMIT};
use leptos::prelude::*;

use crate::components::{options_status, FilterSelect, QueryResultView};
use crate::controllers::{OptionsState, QueryState, StatsController};
use crate::state::use_app_state;

/// Embedded statistics panel
#[component]
pub fn StatsPanel(stats: StatsController, on_open_search: Callback<()>) -> impl IntoView {
    let state = use_app_state();
    let tipo = RwSignal::new(String::new());
    let alcaldia = RwSignal::new(String::new());
    let colonia = RwSignal::new(String::new());

    let options = stats.options;
    let neighborhoods = stats.neighborhoods;
    let query = stats.query;

    let tipos = Signal::derive(move || match options.get() {
        OptionsState::Loaded(o) => o.tipos_incidente,
        _ => Vec::new(),
    });
    let alcaldias = Signal::derive(move || match options.get() {
        OptionsState::Loaded(o) => o.alcaldias,
        _ => Vec::new(),
    });
    let colonias = Signal::derive(move || neighborhoods.with(|n| n.options().to_vec()));
    let colonia_placeholder = Signal::derive(move || neighborhoods.with(NeighborhoodSelector::placeholder));
    let colonia_disabled = Signal::derive(move || !neighborhoods.with(NeighborhoodSelector::is_enabled));

    let on_borough = {
        let stats = stats.clone();
        Callback::new(move |borough: String| {
            colonia.set(String::new());
            stats.spawn_borough_change(borough);
        })
    };

    let on_query = {
        let stats = stats.clone();
        move |_| {
            stats.spawn_run(FilterSelection {
                tipo: tipo.get_untracked(),
                alcaldia: alcaldia.get_untracked(),
                colonia: colonia.get_untracked(),
                limit: PANEL_STATS_LIMIT,
            });
        }
    };

    let on_details = Callback::new(move |()| {
        stats.show_detailed(state);
    });

    view! {
        <div class="panel">
            <div class="panel-header">
                <span class="panel-title">"ESTADÍSTICAS"</span>
                <button class="btn btn-sm" on:click=move |_| on_open_search.run(())>
                    "Ver Estadísticas"
                </button>
            </div>
            <div class="panel-body stats-panel">
                {move || options.with(options_status)}
                <FilterSelect label="Tipo de incidente" options=tipos value=tipo />
                <FilterSelect label="Alcaldía" options=alcaldias value=alcaldia on_change=on_borough />
                <FilterSelect
                    label="Colonia"
                    options=colonias
                    value=colonia
                    placeholder=colonia_placeholder
                    disabled=colonia_disabled
                />
                <button
                    class="btn btn-primary btn-block"
                    prop:disabled=move || query.get() == QueryState::Running
                    on:click=on_query
                >
                    "Consultar"
                </button>
                <QueryResultView query=query on_details=on_details />
            </div>
        </div>
    }
}
