//! # Statistics Controller
//!
//! Option loading, the cascading borough → neighborhood filter and the
//! filtered query. The standalone modal and the embedded panel each own
//! one instance; both run the same domain workflow for the same input.

use incident_domain::{
    change_borough, run_query, FilterOptions, FilterSelection, Generation, IncidentBackend,
    LastResult, NeighborhoodSelector, QueryOutcome,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::services::HttpBackend;
use crate::state::{AppState, ModalKind};

/// Global vocabulary lifecycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionsState {
    Uninitialized,
    Loading,
    Loaded(FilterOptions),
    Failed(String),
}

/// Query area lifecycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Running,
    Done(QueryOutcome),
}

#[derive(Clone, Debug)]
pub struct StatsController {
    backend: HttpBackend,
    pub options: RwSignal<OptionsState>,
    pub neighborhoods: RwSignal<NeighborhoodSelector>,
    pub query: RwSignal<QueryState>,
    /// Set by every successful query, read by the detail view
    pub last_result: RwSignal<LastResult>,
    /// Only the most recently issued borough fetch may repopulate the
    /// neighborhood selector
    borough_generation: Generation,
}

impl StatsController {
    pub fn new(backend: HttpBackend) -> Self {
        Self {
            backend,
            options: RwSignal::new(OptionsState::Uninitialized),
            neighborhoods: RwSignal::new(NeighborhoodSelector::default()),
            query: RwSignal::new(QueryState::Idle),
            last_result: RwSignal::new(LastResult::default()),
            borough_generation: Generation::default(),
        }
    }

    /// Fetch the global vocabulary; a failure stays on screen until the
    /// user opens the panel again
    pub async fn load_options(&self) {
        self.options.set(OptionsState::Loading);
        let state = match self.backend.filter_options().await {
            Ok(options) => {
                log::info!(
                    "Options loaded: {} tipos, {} alcaldias, {} colonias",
                    options.tipos_incidente.len(),
                    options.alcaldias.len(),
                    options.colonias.len()
                );
                OptionsState::Loaded(options)
            }
            Err(e) => {
                log::error!("Loading filter options failed: {e}");
                OptionsState::Failed(format!("Error al cargar opciones: {e}"))
            }
        };
        self.options.set(state);
    }

    pub fn spawn_load_options(&self) {
        let this = self.clone();
        spawn_local(async move { this.load_options().await });
    }

    pub async fn on_borough_change(&self, borough: String) {
        let neighborhoods = self.neighborhoods;
        change_borough(&self.backend, &borough, &self.borough_generation, |selector| {
            neighborhoods.set(selector);
        })
        .await;
    }

    pub fn spawn_borough_change(&self, borough: String) {
        let this = self.clone();
        spawn_local(async move { this.on_borough_change(borough).await });
    }

    /// Validate and run a query; only a successful one replaces the last
    /// result
    pub async fn run(&self, selection: FilterSelection) {
        if selection.has_filter() {
            self.query.set(QueryState::Running);
        }
        let outcome = run_query(&self.backend, &selection).await;
        self.last_result.update(|last| last.record(&outcome));
        self.query.set(QueryState::Done(outcome));
    }

    pub fn spawn_run(&self, selection: FilterSelection) {
        let this = self.clone();
        spawn_local(async move { this.run(selection).await });
    }

    /// Replay the last result in the statistics modal; a no-op before the
    /// first successful query
    pub fn show_detailed(&self, state: AppState) -> bool {
        let available = self.last_result.with_untracked(|last| last.detail().is_some());
        if available {
            state.open_modal(ModalKind::StatsDetail);
        }
        available
    }
}
