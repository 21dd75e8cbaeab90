//! # Statistics Modals
//!
//! Standalone search form over the global option lists, and the detail
//! view that replays the panel's last result.

use incident_domain::{
    FilterOptions, FilterSelection, StatsReport, DEFAULT_STATS_LIMIT, STATS_LIMIT_CHOICES,
};
use leptos::prelude::*;

use crate::components::{
    options_status, FilterSelect, Modal, QueryResultView, StatsReportView, TypeRankingChart,
};
use crate::controllers::{OptionsState, QueryState, StatsController};
use crate::state::ModalKind;

/// Statistics search modal
#[component]
pub fn StatsSearchModal(stats: StatsController) -> impl IntoView {
    let tipo = RwSignal::new(String::new());
    let alcaldia = RwSignal::new(String::new());
    let colonia = RwSignal::new(String::new());
    let limit = RwSignal::new(DEFAULT_STATS_LIMIT);

    let options = stats.options;
    let query = stats.query;
    let list = move |pick: fn(FilterOptions) -> Vec<String>| {
        Signal::derive(move || match options.get() {
            OptionsState::Loaded(o) => pick(o),
            _ => Vec::new(),
        })
    };
    let tipos = list(|o| o.tipos_incidente);
    let alcaldias = list(|o| o.alcaldias);
    let colonias = list(|o| o.colonias);

    let on_search = move |_| {
        stats.spawn_run(FilterSelection {
            tipo: tipo.get_untracked(),
            alcaldia: alcaldia.get_untracked(),
            colonia: colonia.get_untracked(),
            limit: limit.get_untracked(),
        });
    };

    view! {
        <Modal kind=ModalKind::StatsSearch title="ESTADÍSTICAS DE INCIDENTES">
            <div id="stats-form" class="stats-form">
                {move || options.with(options_status)}
                <FilterSelect label="Tipo de incidente" options=tipos value=tipo />
                <FilterSelect label="Alcaldía" options=alcaldias value=alcaldia />
                <FilterSelect label="Colonia" options=colonias value=colonia />
                <label class="form-label">
                    "Límite de resultados"
                    <select
                        prop:value=move || limit.get().to_string()
                        on:change=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse() {
                                limit.set(value);
                            }
                        }
                    >
                        {STATS_LIMIT_CHOICES
                            .into_iter()
                            .map(|choice| view! { <option value=choice.to_string()>{choice}</option> })
                            .collect_view()}
                    </select>
                </label>
                <button
                    class="btn btn-primary btn-block"
                    prop:disabled=move || query.get() == QueryState::Running
                    on:click=on_search.clone()
                >
                    "Buscar"
                </button>
            </div>
            <div id="stats-results">
                <QueryResultView query=query />
            </div>
        </Modal>
    }
}

/// Full detail of the last successful panel query
#[component]
pub fn StatsDetailModal(stats: StatsController) -> impl IntoView {
    let last_result = stats.last_result;

    view! {
        <Modal kind=ModalKind::StatsDetail title="RESULTADOS DETALLADOS">
            {move || {
                last_result
                    .get()
                    .detail()
                    .cloned()
                    .map(|result| {
                        let rows = StatsReport::from(&result).by_type;
                        view! {
                            <StatsReportView result=result />
                            <TypeRankingChart rows=rows />
                        }
                    })
            }}
        </Modal>
    }
}
