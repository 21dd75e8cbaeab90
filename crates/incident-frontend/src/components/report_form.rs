//! # Report Form Component
//!
//! New incident form. The coordinate fields mirror the map picker.

use incident_domain::ReportDraft;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::controllers::use_reports;
use crate::state::{use_app_state, PickerUpdate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Tipo,
    Descripcion,
    Lat,
    Lon,
    Alcaldia,
    Colonia,
}

impl Field {
    const fn get(self, draft: &ReportDraft) -> &String {
        match self {
            Self::Tipo => &draft.tipo,
            Self::Descripcion => &draft.descripcion,
            Self::Lat => &draft.lat,
            Self::Lon => &draft.lon,
            Self::Alcaldia => &draft.alcaldia,
            Self::Colonia => &draft.colonia,
        }
    }

    fn get_mut(self, draft: &mut ReportDraft) -> &mut String {
        match self {
            Self::Tipo => &mut draft.tipo,
            Self::Descripcion => &mut draft.descripcion,
            Self::Lat => &mut draft.lat,
            Self::Lon => &mut draft.lon,
            Self::Alcaldia => &mut draft.alcaldia,
            Self::Colonia => &mut draft.colonia,
        }
    }

    const fn is_coordinate(self) -> bool {
        matches!(self, Self::Lat | Self::Lon)
    }
}

/// Report form panel
#[component]
pub fn ReportForm() -> impl IntoView {
    let state = use_app_state();
    let reports = use_reports();
    let (submitting, set_submitting) = signal(false);
    let (locating, set_locating) = signal(false);

    let on_submit = {
        let reports = reports.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            if submitting.get_untracked() {
                return;
            }
            set_submitting.set(true);
            let reports = reports.clone();
            spawn_local(async move {
                reports.submit().await;
                set_submitting.set(false);
            });
        }
    };

    let on_locate = move |_| {
        set_locating.set(true);
        let reports = reports.clone();
        spawn_local(async move {
            reports.use_current_location().await;
            set_locating.set(false);
        });
    };

    view! {
        <div class="panel">
            <div class="panel-header">
                <span class="panel-title">"NUEVO REPORTE"</span>
            </div>
            <div class="panel-body">
                <form id="report-form" class="report-form" on:submit=on_submit>
                    <DraftInput field=Field::Tipo label="Tipo de incidente" required=true />
                    <label class="form-label">
                        "Descripción"
                        <textarea
                            rows="3"
                            prop:value=move || state.draft.with(|d| d.descripcion.clone())
                            on:input=move |ev| {
                                state.draft.update(|d| d.descripcion = event_target_value(&ev));
                            }
                        ></textarea>
                    </label>
                    <div class="form-row">
                        <DraftInput field=Field::Lat label="Latitud" required=true />
                        <DraftInput field=Field::Lon label="Longitud" required=true />
                    </div>
                    <button
                        type="button"
                        id="btn-use-current-location"
                        class="btn btn-secondary"
                        prop:disabled=move || locating.get()
                        on:click=on_locate
                    >
                        {move || if locating.get() { "Obteniendo ubicación..." } else { "📍 Usar mi ubicación actual" }}
                    </button>
                    <DraftInput field=Field::Alcaldia label="Alcaldía (opcional)" />
                    <DraftInput field=Field::Colonia label="Colonia (opcional)" />
                    <button type="submit" class="btn btn-primary" prop:disabled=move || submitting.get()>
                        {move || if submitting.get() { "Enviando..." } else { "Enviar Reporte" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

/// Single-line input bound to one draft field.
///
/// Coordinate fields push a parseable value back to the picker when the
/// user commits the edit.
#[component]
fn DraftInput(field: Field, label: &'static str, #[prop(optional)] required: bool) -> impl IntoView {
    let state = use_app_state();
    let inputmode = if field.is_coordinate() { "decimal" } else { "text" };

    let on_change = move |_| {
        if !field.is_coordinate() {
            return;
        }
        if let Some(position) = state.draft.with_untracked(ReportDraft::position) {
            state.picker.set(PickerUpdate::typed(position));
        }
    };

    view! {
        <label class="form-label">
            {label}
            <input
                type="text"
                inputmode=inputmode
                required=required
                prop:value=move || state.draft.with(|d| field.get(d).clone())
                on:input=move |ev| {
                    state.draft.update(|d| *field.get_mut(d) = event_target_value(&ev));
                }
                on:change=on_change
            />
        </label>
    }
}
