//! # Application State
//!
//! Reactive state shared by the map, the report controllers and the
//! statistics panels. Everything runs on the browser's UI thread; every
//! collection is replaced wholesale on reload rather than patched.

use chrono::{DateTime, Utc};
use incident_domain::{LatLon, ReportDraft, Report, DEFAULT_CENTER};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Toasts disappear on their own after this long
pub const ALERT_TTL_MS: u32 = 5_000;

/// Zoom used when focusing a report from the full list
pub const FOCUS_ZOOM: f64 = 16.0;
/// Zoom used after a successful geolocation
pub const GEOLOCATION_ZOOM: f64 = 15.0;

/// Global application state
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    /// Latest compact load, rendered as map markers and the side list
    pub reports: RwSignal<Vec<Report>>,
    pub reports_error: RwSignal<Option<String>>,
    /// Content of the full-list modal
    pub all_reports: RwSignal<FullList>,
    /// Picker coordinate; the map and the form both follow it
    pub picker: RwSignal<PickerUpdate>,
    pub draft: RwSignal<ReportDraft>,
    pub modal: RwSignal<Option<ModalKind>>,
    pub alerts: RwSignal<Vec<Alert>>,
}

impl AppState {
    pub fn new() -> Self {
        let mut draft = ReportDraft::default();
        draft.set_position(DEFAULT_CENTER);

        Self {
            reports: RwSignal::new(Vec::new()),
            reports_error: RwSignal::new(None),
            all_reports: RwSignal::new(FullList::Loading),
            picker: RwSignal::new(PickerUpdate::initial()),
            draft: RwSignal::new(draft),
            modal: RwSignal::new(None),
            alerts: RwSignal::new(Vec::new()),
        }
    }

    /// Move the picker; the form fields follow
    pub fn move_picker(&self, update: PickerUpdate) {
        self.draft.update(|d| d.set_position(update.position));
        self.picker.set(update);
    }

    pub fn open_modal(&self, kind: ModalKind) {
        self.modal.set(Some(kind));
    }

    pub fn close_modal(&self) {
        self.modal.set(None);
    }

    /// Show a dismissible toast that expires after [`ALERT_TTL_MS`]
    pub fn notify(&self, severity: AlertSeverity, message: impl Into<String>) {
        let alert = Alert {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            timestamp: Utc::now(),
        };
        let id = alert.id;
        self.alerts.update(|alerts| alerts.push(alert));

        let alerts = self.alerts;
        gloo_timers::callback::Timeout::new(ALERT_TTL_MS, move || {
            alerts.try_update(|alerts| alerts.retain(|a| a.id != id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: Uuid) {
        self.alerts.update(|alerts| alerts.retain(|a| a.id != id));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Content of the full report list modal
#[derive(Clone, Debug, PartialEq)]
pub enum FullList {
    Loading,
    Loaded(Vec<Report>),
    Failed(String),
}

/// Which modal is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    /// Every report as a card
    Reports,
    /// Standalone filter form with its own results
    StatsSearch,
    /// Replay of the embedded panel's last result
    StatsDetail,
}

/// Popup to open on the picker after it moves
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerPopup {
    /// Initial hint
    DragHint,
    /// Rounded coordinate after a drag or a click
    Coordinates,
    CurrentLocation,
}

impl PickerPopup {
    pub fn html(&self, position: LatLon) -> String {
        match self {
            Self::DragHint => "Arrastra este marcador".to_string(),
            Self::Coordinates => position.popup_html(),
            Self::CurrentLocation => "Tu ubicación actual".to_string(),
        }
    }
}

/// Coordinate-changed notification emitted by the map, the form and the
/// controllers alike
#[derive(Clone, Debug, PartialEq)]
pub struct PickerUpdate {
    pub position: LatLon,
    pub popup: Option<PickerPopup>,
    /// Recenter the view at this zoom
    pub zoom: Option<f64>,
}

impl PickerUpdate {
    pub const fn initial() -> Self {
        Self {
            position: DEFAULT_CENTER,
            popup: Some(PickerPopup::DragHint),
            zoom: None,
        }
    }

    /// Drag end or map click
    pub const fn picked(position: LatLon) -> Self {
        Self {
            position,
            popup: Some(PickerPopup::Coordinates),
            zoom: None,
        }
    }

    /// Recenter and move the picker without a popup
    pub const fn focus(position: LatLon, zoom: f64) -> Self {
        Self {
            position,
            popup: None,
            zoom: Some(zoom),
        }
    }

    pub const fn located(position: LatLon) -> Self {
        Self {
            position,
            popup: Some(PickerPopup::CurrentLocation),
            zoom: Some(GEOLOCATION_ZOOM),
        }
    }

    /// Typed into the form; marker follows silently
    pub const fn typed(position: LatLon) -> Self {
        Self {
            position,
            popup: None,
            zoom: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

pub fn provide_app_state() {
    let state = AppState::new();
    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
