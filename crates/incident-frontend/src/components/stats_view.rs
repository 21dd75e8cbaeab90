//! # Statistics Views
//!
//! Filter selects and the result rendering shared by the statistics panel
//! and the statistics modal.

use incident_domain::{
    QueryOutcome, RankedRow, StatsReport, StatsResult, ValidationError, UNSELECTED_LABEL,
};
use leptos::prelude::*;

use crate::controllers::{OptionsState, QueryState};

/// Select with a leading empty "(Opcional)" entry
#[component]
pub fn FilterSelect(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<String>>,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: Option<Signal<&'static str>>,
    #[prop(optional, into)] disabled: Option<Signal<bool>>,
    #[prop(optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let placeholder = move || placeholder.map_or(UNSELECTED_LABEL, |p| p.get());
    let disabled = move || disabled.is_some_and(|d| d.get());

    view! {
        <label class="form-label">
            {label}
            <select
                prop:disabled=disabled
                prop:value=move || value.get()
                on:change=move |ev| {
                    let selected = event_target_value(&ev);
                    value.set(selected.clone());
                    if let Some(callback) = on_change {
                        callback.run(selected);
                    }
                }
            >
                <option value="">{placeholder}</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|option| { let value = option.clone(); view! { <option value=value>{option}</option> } })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

/// Loading/error line for the global option lists
pub fn options_status(state: &OptionsState) -> Option<AnyView> {
    match state {
        OptionsState::Loading => Some(view! { <p class="list-message">"Cargando opciones..."</p> }.into_any()),
        OptionsState::Failed(message) => {
            Some(view! { <p class="list-message error">{message.clone()}</p> }.into_any())
        }
        OptionsState::Uninitialized | OptionsState::Loaded(_) => None,
    }
}

/// Query area: progress, inline warning, error text or the result.
///
/// With `on_details` a successful result is summarized and the full
/// tables are left to the detail view.
#[component]
pub fn QueryResultView(
    query: RwSignal<QueryState>,
    #[prop(optional)] on_details: Option<Callback<()>>,
) -> impl IntoView {
    move || match query.get() {
        QueryState::Idle => ().into_any(),
        QueryState::Running => view! { <p class="list-message">"Consultando..."</p> }.into_any(),
        QueryState::Done(outcome) => match outcome {
            QueryOutcome::MissingFilter => view! {
                <p class="list-message warning">{ValidationError::NoFilterSelected.to_string()}</p>
            }
            .into_any(),
            QueryOutcome::Failed(message) => {
                view! { <p class="list-message error">{message}</p> }.into_any()
            }
            QueryOutcome::Results(result) => match on_details {
                Some(callback) => view! {
                    <CompactSummary result=result />
                    <button class="btn btn-secondary btn-block" on:click=move |_| callback.run(())>
                        "Ver Detalles Completos"
                    </button>
                }
                .into_any(),
                None => view! { <StatsReportView result=result /> }.into_any(),
            },
        },
    }
}

/// Summary counts, the applied filters and both ranked tables
#[component]
pub fn StatsReportView(result: StatsResult) -> impl IntoView {
    let report = StatsReport::from(&result);

    view! {
        <div class="stats-report">
            <div class="stats-summary">
                <SummaryCell label="TOTAL" value=report.total accent=true />
                <SummaryCell label="C5" value=report.c5 />
                <SummaryCell label="USUARIOS" value=report.usuarios />
            </div>
            {(!report.filters_line.is_empty())
                .then(|| view! { <p class="stats-filters text-muted">{report.filters_line.clone()}</p> })}
            <RankingTable title="Top colonias" column="Colonia" rows=report.by_neighborhood />
            <RankingTable title="Top tipos de incidente" column="Tipo" rows=report.by_type />
        </div>
    }
}

/// `Total` line plus the per-source counts
#[component]
pub fn CompactSummary(result: StatsResult) -> impl IntoView {
    let report = StatsReport::from(&result);

    view! {
        <div class="stats-compact">
            <div>
                <span class="text-muted">"Total: "</span>
                <span class="text-accent font-bold">{report.total}</span>
            </div>
            <div class="text-xs">{format!("C5: {} | Usuarios: {}", report.c5, report.usuarios)}</div>
            {(!report.filters_line.is_empty())
                .then(|| view! { <div class="text-xs text-muted">{report.filters_line.clone()}</div> })}
        </div>
    }
}

#[component]
fn SummaryCell(label: &'static str, value: u64, #[prop(optional)] accent: bool) -> impl IntoView {
    let class = if accent { "text-xl font-bold text-accent" } else { "text-xl font-bold" };

    view! {
        <div class="stats-cell">
            <div class="text-xs text-muted uppercase tracking-wide">{label}</div>
            <div class=class>{value}</div>
        </div>
    }
}

#[component]
fn RankingTable(title: &'static str, column: &'static str, rows: Vec<RankedRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="list-message">{format!("{title}: sin datos")}</p> }.into_any();
    }

    view! {
        <table class="stats-table">
            <caption>{title}</caption>
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>{column}</th>
                    <th>"Total"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <tr>
                            <td>{row.position}</td>
                            <td>{row.label}</td>
                            <td>{row.total}</td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
