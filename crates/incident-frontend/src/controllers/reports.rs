//! # Report Controller
//!
//! Report form submission, compact/full listings, delete and the periodic
//! refresh. Overlapping loads are not de-duplicated: whichever response
//! resolves last is what the map and the list show.

use incident_domain::{
    delete_and_reload, load_reports, submit_and_reload, DeleteOutcome, Report, SubmitOutcome,
    COMPACT_LIMIT, FULL_LIMIT, MSG_DELETE_CONFIRM, REFRESH_INTERVAL_MS,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::services::{current_position, use_backend, HttpBackend};
use crate::state::{
    use_app_state, AlertSeverity, AppState, FullList, ModalKind, PickerUpdate, FOCUS_ZOOM,
};

#[derive(Clone, Debug)]
pub struct ReportsController {
    state: AppState,
    backend: HttpBackend,
}

impl ReportsController {
    pub const fn new(state: AppState, backend: HttpBackend) -> Self {
        Self { state, backend }
    }

    /// Latest reports for the map and the side list
    pub async fn load_compact(&self) {
        self.apply_compact(load_reports(&self.backend, COMPACT_LIMIT).await);
    }

    fn apply_compact(&self, loaded: Result<Vec<Report>, String>) {
        match loaded {
            Ok(reports) => {
                self.state.reports_error.set(None);
                self.state.reports.set(reports);
            }
            Err(message) => self.state.reports_error.set(Some(message)),
        }
    }

    /// Fire-and-forget compact reload
    pub fn reload(&self) {
        let this = self.clone();
        spawn_local(async move { this.load_compact().await });
    }

    /// Reload the compact set every [`REFRESH_INTERVAL_MS`] for the life of
    /// the page
    pub fn start_refresh(&self) {
        let this = self.clone();
        gloo_timers::callback::Interval::new(REFRESH_INTERVAL_MS, move || this.reload()).forget();
        log::info!("Report refresh every {}s", REFRESH_INTERVAL_MS / 1000);
    }

    pub async fn load_full(&self) {
        self.state.all_reports.set(FullList::Loading);
        let list = match load_reports(&self.backend, FULL_LIMIT).await {
            Ok(reports) => FullList::Loaded(reports),
            Err(message) => FullList::Failed(message),
        };
        self.state.all_reports.set(list);
    }

    /// Open the full-list modal and fetch its content
    pub fn open_full_list(&self) {
        self.state.open_modal(ModalKind::Reports);
        let this = self.clone();
        spawn_local(async move { this.load_full().await });
    }

    /// Recenter on a report and close the modal
    pub fn focus(&self, report: &Report) {
        self.state.close_modal();
        self.state
            .move_picker(PickerUpdate::focus(report.position(), FOCUS_ZOOM));
    }

    pub async fn delete(&self, id: i64) {
        let result = delete_and_reload(&self.backend, id, confirm_delete, COMPACT_LIMIT).await;

        let severity = match result.outcome {
            DeleteOutcome::Deleted => AlertSeverity::Info,
            DeleteOutcome::NotFound => AlertSeverity::Warning,
            _ => AlertSeverity::Critical,
        };
        if let Some(message) = result.outcome.message() {
            self.state.notify(severity, message);
        }

        if let Some(reloaded) = result.reports {
            self.apply_compact(reloaded);
            if self.state.modal.get_untracked() == Some(ModalKind::Reports) {
                self.load_full().await;
            }
        }
    }

    pub fn spawn_delete(&self, id: i64) {
        let this = self.clone();
        spawn_local(async move { this.delete(id).await });
    }

    /// Submit the report form; on success clear what was sent and reload
    /// once
    pub async fn submit(&self) {
        let submitted = self.state.draft.get_untracked();
        let result = submit_and_reload(&self.backend, &submitted, COMPACT_LIMIT).await;

        let severity = match result.outcome {
            SubmitOutcome::Created(_) => AlertSeverity::Info,
            SubmitOutcome::Rejected(_) => AlertSeverity::Warning,
            SubmitOutcome::Failed(_) => AlertSeverity::Critical,
        };
        self.state.notify(severity, result.outcome.message());

        if result.outcome.should_reset_and_reload() {
            self.state.draft.update(|draft| *draft = draft.cleared_after(&submitted));
        }
        if let Some(reloaded) = result.reports {
            self.apply_compact(reloaded);
        }
    }

    /// One-shot geolocation; moves the picker and the form fields
    pub async fn use_current_location(&self) {
        match current_position().await {
            Ok(position) => {
                log::info!("Geolocated at {position}");
                self.state.move_picker(PickerUpdate::located(position));
                self.state.notify(AlertSeverity::Info, "Ubicación obtenida");
            }
            Err(e) => {
                log::warn!("Geolocation failed: {e:?}");
                self.state.notify(AlertSeverity::Warning, e.message());
            }
        }
    }
}

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(MSG_DELETE_CONFIRM).ok())
        .unwrap_or(false)
}

pub fn provide_reports_controller() {
    provide_context(ReportsController::new(use_app_state(), use_backend()));
}

pub fn use_reports() -> ReportsController {
    expect_context::<ReportsController>()
}
