//! # Report List Components
//!
//! Compact recent-reports panel next to the map and the full-list modal.

use chrono::Local;
use incident_domain::{compact_entries, Report};
use leptos::prelude::*;

use crate::components::Modal;
use crate::controllers::use_reports;
use crate::state::{use_app_state, FullList, ModalKind};

/// Recent reports panel
#[component]
pub fn ReportListPanel() -> impl IntoView {
    let state = use_app_state();
    let reports = use_reports();

    let body = move || {
        if let Some(error) = state.reports_error.get() {
            return view! { <p class="list-message error">{error}</p> }.into_any();
        }
        let entries = state.reports.with(|all| compact_entries(all).to_vec());
        if entries.is_empty() {
            return view! { <p class="list-message">"No hay reportes"</p> }.into_any();
        }
        view! {
            <For
                each=move || entries.clone()
                key=|report| report.id
                children=move |report| view! { <ReportItem report=report /> }
            />
        }
        .into_any()
    };

    view! {
        <div class="panel">
            <div class="panel-header">
                <span class="panel-title">"REPORTES RECIENTES"</span>
                <span class="panel-badge">{move || state.reports.with(Vec::len)}</span>
            </div>
            <div class="panel-body">
                <button
                    id="btn-view-all-reports"
                    class="btn btn-secondary btn-block"
                    on:click=move |_| reports.open_full_list()
                >
                    "Ver Todos los Reportes"
                </button>
                <div id="reports-list" class="report-list">{body}</div>
            </div>
        </div>
    }
}

#[component]
fn ReportItem(report: Report) -> impl IntoView {
    let reports = use_reports();
    let id = report.id;

    view! {
        <div class="report-item">
            <div class="report-item-main">
                <strong>{report.tipo.clone()}</strong>
                <span class="text-muted">{report.location_label().to_string()}</span>
                <span class="text-xs text-muted">{report.created_at_label(&Local)}</span>
            </div>
            <button
                class="btn btn-danger btn-sm"
                title="Eliminar reporte"
                on:click=move |_| reports.spawn_delete(id)
            >
                "Eliminar"
            </button>
        </div>
    }
}

/// Every stored report as clickable cards
#[component]
pub fn ReportsModal() -> impl IntoView {
    let state = use_app_state();

    let body = move || match state.all_reports.get() {
        FullList::Loading => view! { <p class="list-message">"Cargando reportes..."</p> }.into_any(),
        FullList::Failed(message) => view! { <p class="list-message error">{message}</p> }.into_any(),
        FullList::Loaded(list) if list.is_empty() => {
            view! { <p class="list-message">"No hay reportes registrados."</p> }.into_any()
        }
        FullList::Loaded(list) => list
            .into_iter()
            .map(|report| view! { <ReportCard report=report /> })
            .collect_view()
            .into_any(),
    };

    view! {
        <Modal kind=ModalKind::Reports title="TODOS LOS REPORTES">
            <div id="modal-reports-list" class="report-grid">{body}</div>
        </Modal>
    }
}

/// Clicking the card recenters the map; the delete button does not
#[component]
fn ReportCard(report: Report) -> impl IntoView {
    let reports = use_reports();
    let id = report.id;
    let position = report.position();
    let created = report.created_at_label(&Local);
    let description = report.description().map(str::to_string);

    let on_focus = {
        let reports = reports.clone();
        let report = report.clone();
        move |_| reports.focus(&report)
    };

    view! {
        <div class="report-card" on:click=on_focus>
            <div class="report-card-header">
                <strong>{report.tipo.clone()}</strong>
                <button
                    class="btn btn-danger btn-sm"
                    title="Eliminar reporte"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        reports.spawn_delete(id);
                    }
                >
                    "Eliminar"
                </button>
            </div>
            {description.map(|text| view! { <p class="report-card-description">{text}</p> })}
            <div class="report-card-meta">
                <span>{report.location_label().to_string()}</span>
                <span>{created}</span>
                <span class="text-muted">
                    {format!("Lat: {} | Lon: {}", position.lat_field(), position.lon_field())}
                </span>
            </div>
        </div>
    }
}
