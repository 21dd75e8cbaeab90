//! # Client Workflows
//!
//! Controller logic that does not depend on how results are displayed.
//! Each workflow talks to the backend only through [`IncidentBackend`] and
//! reports back with an outcome value. Failures come back as user-facing
//! messages, never as errors to propagate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::{IncidentBackend, ReportQuery};
use crate::error::{ApiError, ValidationError};
use crate::stats::{FilterSelection, StatsResponse, StatsResult, UNSELECTED_LABEL};
use crate::{Report, ReportDraft};

/// Reports fetched by the periodic/compact load
pub const COMPACT_LIMIT: u32 = 200;
/// Entries shown in the side list
pub const COMPACT_LIST_CAP: usize = 10;
/// Reports fetched for the full-list modal
pub const FULL_LIMIT: u32 = 1000;
/// Background refresh period of the compact load
pub const REFRESH_INTERVAL_MS: u32 = 30_000;

pub const MSG_REPORT_CREATED: &str = "Reporte creado exitosamente";
pub const MSG_CREATE_FAILED: &str = "Error al crear reporte";
pub const MSG_REPORT_DELETED: &str = "Reporte eliminado exitosamente";
pub const MSG_REPORT_NOT_FOUND: &str = "Reporte no encontrado";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar reporte";
pub const MSG_LOAD_FAILED: &str = "Error al cargar reportes";
pub const MSG_QUERY_FAILED: &str = "Error al consultar";
pub const MSG_DELETE_CONFIRM: &str = "¿Estás seguro de que quieres eliminar este reporte?";

/// First `COMPACT_LIST_CAP` reports, in backend order
#[must_use]
pub fn compact_entries(reports: &[Report]) -> &[Report] {
    &reports[..reports.len().min(COMPACT_LIST_CAP)]
}

/// Fetch the latest `limit` reports.
///
/// # Errors
///
/// Returns the user-facing load failure message.
pub async fn load_reports<B: IncidentBackend>(
    backend: &B,
    limit: u32,
) -> Result<Vec<Report>, String> {
    match backend.list_reports(&ReportQuery::latest(limit)).await {
        Ok(reports) => {
            log::info!("Loaded {} reports", reports.len());
            Ok(reports)
        }
        Err(e) => {
            log::error!("Report load failed: {e}");
            Err(MSG_LOAD_FAILED.to_string())
        }
    }
}

/// Outcome of a user action plus the compact reload it triggered.
///
/// `reports` is `None` when the outcome does not call for a reload.
#[derive(Debug, Clone, PartialEq)]
pub struct Reloaded<O> {
    pub outcome: O,
    pub reports: Option<Result<Vec<Report>, String>>,
}

// =============================================================================
// SUBMIT
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Backend accepted the report; reset the form and reload
    Created(Report),
    /// Form failed validation; nothing was sent
    Rejected(ValidationError),
    /// Backend or network failure
    Failed(String),
}

impl SubmitOutcome {
    /// Only a created report clears the form and reloads the list
    #[must_use]
    pub const fn should_reset_and_reload(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Created(_) => MSG_REPORT_CREATED.to_string(),
            Self::Rejected(e) => format!("Error: {e}"),
            Self::Failed(detail) => format!("Error: {detail}"),
        }
    }
}

/// Validate the form and create the report
pub async fn submit_report<B: IncidentBackend>(backend: &B, draft: &ReportDraft) -> SubmitOutcome {
    let payload = match draft.to_new_report() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Report form rejected: {e}");
            return SubmitOutcome::Rejected(e);
        }
    };

    match backend.create_report(&payload).await {
        Ok(report) => {
            log::info!("Report {} created", report.id);
            SubmitOutcome::Created(report)
        }
        Err(e) => {
            log::error!("Report creation failed: {e}");
            SubmitOutcome::Failed(e.user_message(MSG_CREATE_FAILED))
        }
    }
}

/// Submit, then reload the latest `limit` reports exactly once on success
pub async fn submit_and_reload<B: IncidentBackend>(
    backend: &B,
    draft: &ReportDraft,
    limit: u32,
) -> Reloaded<SubmitOutcome> {
    let outcome = submit_report(backend, draft).await;
    let reports = if outcome.should_reset_and_reload() {
        Some(load_reports(backend, limit).await)
    } else {
        None
    };
    Reloaded { outcome, reports }
}

// =============================================================================
// DELETE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// User declined the confirmation; nothing was sent
    Cancelled,
    Deleted,
    NotFound,
    Failed(String),
}

impl DeleteOutcome {
    /// Only a successful delete triggers a reload
    #[must_use]
    pub const fn should_reload(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Cancelled => None,
            Self::Deleted => Some(MSG_REPORT_DELETED.to_string()),
            Self::NotFound => Some(MSG_REPORT_NOT_FOUND.to_string()),
            Self::Failed(message) => Some(message.clone()),
        }
    }
}

/// Ask for confirmation, then delete
pub async fn delete_report<B, F>(backend: &B, id: i64, confirm: F) -> DeleteOutcome
where
    B: IncidentBackend,
    F: FnOnce() -> bool,
{
    if !confirm() {
        return DeleteOutcome::Cancelled;
    }

    match backend.delete_report(id).await {
        Ok(()) => {
            log::info!("Report {id} deleted");
            DeleteOutcome::Deleted
        }
        Err(e) if e.is_not_found() => {
            log::warn!("Report {id} was already gone");
            DeleteOutcome::NotFound
        }
        Err(e) => {
            log::error!("Deleting report {id} failed: {e}");
            DeleteOutcome::Failed(match e {
                ApiError::Transport(detail) => format!("{MSG_DELETE_FAILED}: {detail}"),
                _ => MSG_DELETE_FAILED.to_string(),
            })
        }
    }
}

/// Confirm and delete, then reload the latest `limit` reports on success
pub async fn delete_and_reload<B, F>(
    backend: &B,
    id: i64,
    confirm: F,
    limit: u32,
) -> Reloaded<DeleteOutcome>
where
    B: IncidentBackend,
    F: FnOnce() -> bool,
{
    let outcome = delete_report(backend, id, confirm).await;
    let reports = if outcome.should_reload() {
        Some(load_reports(backend, limit).await)
    } else {
        None
    };
    Reloaded { outcome, reports }
}

// =============================================================================
// CASCADING NEIGHBORHOOD FILTER
// =============================================================================

/// State of the borough-dependent neighborhood selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NeighborhoodSelector {
    /// No borough chosen yet
    #[default]
    AwaitingBorough,
    Loading,
    Ready(Vec<String>),
    Failed,
}

impl NeighborhoodSelector {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Text of the leading option
    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::AwaitingBorough => "Primero selecciona alcaldía",
            Self::Loading => "Cargando...",
            Self::Ready(_) => UNSELECTED_LABEL,
            Self::Failed => "Error al cargar",
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        match self {
            Self::Ready(options) => options,
            _ => &[],
        }
    }
}

/// Monotonic request counter shared by clones.
///
/// Each request takes a ticket with [`Generation::next`]; a response may
/// only be applied while its ticket is still the latest one issued.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Relaxed) == ticket
    }
}

/// React to a borough change.
///
/// `apply` sees the disabled loading state before the scoped fetch is
/// issued and the repopulated (or failed) state once it resolves. An empty
/// borough resets the selector without touching the network. Once a newer
/// change has taken a ticket from `generation`, this one applies nothing
/// more.
pub async fn change_borough<B, F>(
    backend: &B,
    borough: &str,
    generation: &Generation,
    mut apply: F,
) where
    B: IncidentBackend,
    F: FnMut(NeighborhoodSelector),
{
    let ticket = generation.next();
    let mut apply_current = |selector: NeighborhoodSelector| {
        if generation.is_current(ticket) {
            apply(selector);
        } else {
            log::debug!("Dropping stale neighborhood state for {borough}");
        }
    };

    if borough.trim().is_empty() {
        apply_current(NeighborhoodSelector::AwaitingBorough);
        return;
    }

    apply_current(NeighborhoodSelector::Loading);
    match backend.neighborhoods(borough).await {
        Ok(list) => {
            log::debug!("{} neighborhoods in {borough}", list.colonias.len());
            apply_current(NeighborhoodSelector::Ready(list.colonias));
        }
        Err(e) => {
            log::warn!("Neighborhoods for {borough} failed: {e}");
            apply_current(NeighborhoodSelector::Failed);
        }
    }
}

// =============================================================================
// FILTERED QUERY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// No filter selected; show the inline warning, nothing was sent
    MissingFilter,
    /// Transport/status/shape failure, or an explicit `error` body
    Failed(String),
    Results(StatsResult),
}

impl QueryOutcome {
    #[must_use]
    pub const fn result(&self) -> Option<&StatsResult> {
        match self {
            Self::Results(result) => Some(result),
            _ => None,
        }
    }
}

/// Validate the selection and fetch the aggregate statistics
pub async fn run_query<B: IncidentBackend>(backend: &B, selection: &FilterSelection) -> QueryOutcome {
    let query = match selection.to_query() {
        Ok(query) => query,
        Err(_) => return QueryOutcome::MissingFilter,
    };

    match backend.filtered_stats(&query).await {
        Ok(StatsResponse::Success(result)) => {
            log::info!("Stats query returned {} incidents", result.total_incidentes);
            QueryOutcome::Results(result)
        }
        Ok(StatsResponse::Failure { error }) => {
            log::warn!("Stats query rejected: {error}");
            QueryOutcome::Failed(error)
        }
        Err(e) => {
            log::error!("Stats query failed: {e}");
            QueryOutcome::Failed(e.user_message(MSG_QUERY_FAILED))
        }
    }
}

/// Last successful statistics result.
///
/// Set on every successful query, never cleared; the detail view replays
/// it without a new fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastResult(Option<StatsResult>);

impl LastResult {
    /// Keep the result of `outcome` if it has one
    pub fn record(&mut self, outcome: &QueryOutcome) {
        if let Some(result) = outcome.result() {
            self.0 = Some(result.clone());
        }
    }

    /// What the detail view should render; `None` means do nothing
    #[must_use]
    pub const fn detail(&self) -> Option<&StatsResult> {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use fake::faker::address::en::CityName;
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use futures::executor::block_on;

    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::stats::NeighborhoodList;
    use crate::NewReport;

    fn fake_reports(n: usize) -> Vec<Report> {
        (0..n)
            .map(|i| Report {
                id: i64::try_from(i).unwrap() + 1,
                tipo: Word().fake(),
                descripcion: None,
                lat: (19.2..19.6).fake(),
                lon: (-99.3..-98.9).fake(),
                alcaldia: Some(CityName().fake()),
                colonia: None,
                created_at: "2025-05-01T10:00:00".into(),
            })
            .collect()
    }

    fn sample_result() -> StatsResult {
        serde_json::from_value(serde_json::json!({
            "total_incidentes": 12, "incidentes_c5": 7, "incidentes_usuarios": 5,
            "top_colonias": [{"colonia": "Centro", "total": 4}],
            "top_tipos": [{"tipo": "bache", "total": 8}]
        }))
        .unwrap()
    }

    #[test]
    fn test_compact_list_is_capped() {
        for n in [0, 3, 10, 11, 200] {
            let reports = fake_reports(n);
            assert_eq!(compact_entries(&reports).len(), n.min(10));
        }
        let reports = fake_reports(25);
        assert_eq!(compact_entries(&reports)[0].id, 1);
    }

    #[test]
    fn test_load_failure_is_a_message() {
        let backend = MockBackend::default();
        *backend.reports.borrow_mut() = Err(ApiError::Transport("offline".into()));
        assert_eq!(block_on(load_reports(&backend, COMPACT_LIMIT)), Err(MSG_LOAD_FAILED.into()));
        assert_eq!(backend.calls(), vec!["GET /reports?limit=200"]);
    }

    #[test]
    fn test_submit_sends_normalized_body_once() {
        let backend = MockBackend::default();
        let created = Report {
            id: 41,
            tipo: "bache".into(),
            descripcion: None,
            lat: 19.4,
            lon: -99.1,
            alcaldia: None,
            colonia: None,
            created_at: "2025-05-01T10:00:00".into(),
        };
        *backend.create.borrow_mut() = Ok(created.clone());

        let draft = ReportDraft {
            tipo: "bache".into(),
            lat: "19.4".into(),
            lon: "-99.1".into(),
            ..ReportDraft::default()
        };
        let outcome = block_on(submit_report(&backend, &draft));

        assert_eq!(outcome, SubmitOutcome::Created(created));
        assert_eq!(backend.calls(), vec!["POST /reports"]);
        assert_eq!(
            backend.created.borrow()[0],
            NewReport {
                tipo: "bache".into(),
                descripcion: None,
                lat: 19.4,
                lon: -99.1,
                alcaldia: None,
                colonia: None,
            }
        );
    }

    #[test]
    fn test_created_report_clears_form_and_reloads_once() {
        let backend = MockBackend::default();
        let created = fake_reports(1).remove(0);
        *backend.create.borrow_mut() = Ok(created.clone());
        *backend.reports.borrow_mut() = Ok(vec![created.clone()]);

        let draft = ReportDraft {
            tipo: "bache".into(),
            lat: "19.4".into(),
            lon: "-99.1".into(),
            ..ReportDraft::default()
        };
        let result = block_on(submit_and_reload(&backend, &draft, COMPACT_LIMIT));

        assert!(result.outcome.should_reset_and_reload());
        assert_eq!(result.reports, Some(Ok(vec![created])));
        assert_eq!(backend.calls(), vec!["POST /reports", "GET /reports?limit=200"]);
        assert_eq!(draft.cleared_after(&draft), ReportDraft::default());
    }

    #[test]
    fn test_failed_submit_does_not_reload() {
        let backend = MockBackend::default();
        let draft = ReportDraft {
            tipo: "bache".into(),
            lat: "19.4".into(),
            lon: "-99.1".into(),
            ..ReportDraft::default()
        };
        let result = block_on(submit_and_reload(&backend, &draft, COMPACT_LIMIT));

        assert!(matches!(result.outcome, SubmitOutcome::Failed(_)));
        assert!(result.reports.is_none());
        assert_eq!(backend.calls(), vec!["POST /reports"]);
    }

    #[test]
    fn test_invalid_coordinates_never_reach_backend() {
        let backend = MockBackend::default();
        let draft = ReportDraft {
            tipo: "bache".into(),
            lat: "abc".into(),
            lon: "-99.1".into(),
            ..ReportDraft::default()
        };
        let outcome = block_on(submit_report(&backend, &draft));
        assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidCoordinate { .. })));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_submit_surfaces_backend_detail() {
        let backend = MockBackend::default();
        *backend.create.borrow_mut() =
            Err(ApiError::from_status(422, r#"{"detail": "Latitud fuera de rango"}"#));
        let draft = ReportDraft {
            tipo: "choque".into(),
            lat: "91".into(),
            lon: "-99.1".into(),
            ..ReportDraft::default()
        };
        let outcome = block_on(submit_report(&backend, &draft));
        assert_eq!(outcome.message(), "Error: Latitud fuera de rango");

        *backend.create.borrow_mut() = Err(ApiError::Status { status: 500, message: None });
        let outcome = block_on(submit_report(&backend, &draft));
        assert_eq!(outcome.message(), format!("Error: {MSG_CREATE_FAILED}"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let backend = MockBackend::default();
        let outcome = block_on(delete_report(&backend, 9, || false));
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(outcome.message().is_none());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_delete_not_found_does_not_reload() {
        let backend = MockBackend::default();
        *backend.delete.borrow_mut() =
            Err(ApiError::from_status(404, r#"{"detail": "Reporte no encontrado"}"#));
        let outcome = block_on(delete_report(&backend, 9, || true));
        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert!(!outcome.should_reload());
        assert_eq!(outcome.message().as_deref(), Some(MSG_REPORT_NOT_FOUND));
        assert_eq!(backend.calls(), vec!["DELETE /reports/9"]);
    }

    #[test]
    fn test_delete_success_reloads() {
        let backend = MockBackend::default();
        let outcome = block_on(delete_report(&backend, 3, || true));
        assert!(outcome.should_reload());

        *backend.delete.borrow_mut() = Err(ApiError::Status { status: 500, message: None });
        let outcome = block_on(delete_report(&backend, 3, || true));
        assert_eq!(outcome.message().as_deref(), Some(MSG_DELETE_FAILED));
        assert!(!outcome.should_reload());
    }

    #[test]
    fn test_deleted_report_is_gone_after_reload() {
        let backend = MockBackend::default();
        *backend.reports.borrow_mut() = Ok(fake_reports(5));

        let result = block_on(delete_and_reload(&backend, 3, || true, COMPACT_LIMIT));

        assert_eq!(result.outcome, DeleteOutcome::Deleted);
        let reloaded = result.reports.unwrap().unwrap();
        assert_eq!(reloaded.len(), 4);
        assert!(reloaded.iter().all(|r| r.id != 3));
        assert_eq!(backend.calls(), vec!["DELETE /reports/3", "GET /reports?limit=200"]);
    }

    #[test]
    fn test_delete_not_found_skips_reload() {
        let backend = MockBackend::default();
        *backend.delete.borrow_mut() = Err(ApiError::from_status(404, "{}"));

        let result = block_on(delete_and_reload(&backend, 77, || true, COMPACT_LIMIT));

        assert_eq!(result.outcome, DeleteOutcome::NotFound);
        assert!(result.reports.is_none());
        assert_eq!(backend.calls(), vec!["DELETE /reports/77"]);
    }

    #[test]
    fn test_superseded_borough_change_is_dropped() {
        let backend = MockBackend::default();
        *backend.neighborhoods.borrow_mut() = Ok(NeighborhoodList {
            colonias: vec!["Del Carmen".into()],
        });
        let generation = Generation::default();

        // a second change is issued while the first fetch is in flight
        let seen = RefCell::new(Vec::new());
        block_on(change_borough(&backend, "Coyoacán", &generation, |state| {
            if state == NeighborhoodSelector::Loading {
                generation.next();
            }
            seen.borrow_mut().push(state);
        }));
        assert_eq!(seen.into_inner(), vec![NeighborhoodSelector::Loading]);

        let mut last = NeighborhoodSelector::default();
        block_on(change_borough(&backend, "Tlalpan", &generation, |state| last = state));
        assert_eq!(last, NeighborhoodSelector::Ready(vec!["Del Carmen".into()]));
    }

    #[test]
    fn test_generation_tickets() {
        let generation = Generation::default();
        let first = generation.next();
        let shared = generation.clone();
        let second = shared.next();
        assert!(second > first);
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_borough_change_orders_states_around_fetch() {
        let backend = MockBackend::default();
        *backend.neighborhoods.borrow_mut() = Ok(NeighborhoodList {
            colonias: vec!["Del Carmen".into(), "Santa Catarina".into()],
        });

        let seen = RefCell::new(Vec::new());
        block_on(change_borough(&backend, "Coyoacán", &Generation::default(), |state| {
            seen.borrow_mut().push((state.is_enabled(), backend.calls().len(), state));
        }));

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        // disabled loading placeholder before the request went out
        assert_eq!(seen[0], (false, 0, NeighborhoodSelector::Loading));
        assert_eq!(seen[0].2.placeholder(), "Cargando...");
        // enabled with data after it resolved
        assert!(seen[1].0);
        assert_eq!(seen[1].1, 1);
        assert_eq!(seen[1].2.options().len(), 2);
    }

    #[test]
    fn test_unselected_borough_resets_without_fetch() {
        let backend = MockBackend::default();
        let mut last = NeighborhoodSelector::Ready(vec!["Centro".into()]);
        assert!(last.is_enabled());
        block_on(change_borough(&backend, "", &Generation::default(), |state| last = state));
        assert_eq!(last, NeighborhoodSelector::AwaitingBorough);
        assert!(!last.is_enabled());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_borough_fetch_failure_degrades_selector() {
        let backend = MockBackend::default();
        *backend.neighborhoods.borrow_mut() = Err(ApiError::Decode("missing colonias".into()));
        let mut last = NeighborhoodSelector::default();
        block_on(change_borough(&backend, "Tlalpan", &Generation::default(), |state| {
            last = state;
        }));
        assert_eq!(last, NeighborhoodSelector::Failed);
        assert_eq!(last.placeholder(), "Error al cargar");
    }

    #[test]
    fn test_query_without_filter_is_local() {
        let backend = MockBackend::default();
        let outcome = block_on(run_query(&backend, &FilterSelection::default()));
        assert_eq!(outcome, QueryOutcome::MissingFilter);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_query_with_one_filter() {
        let backend = MockBackend::default();
        *backend.stats.borrow_mut() = Ok(StatsResponse::Success(sample_result()));
        let selection = FilterSelection {
            alcaldia: "Coyoacan".into(),
            ..FilterSelection::default()
        };

        let outcome = block_on(run_query(&backend, &selection));

        assert_eq!(backend.calls(), vec!["GET /stats/filtradas?limit=50&alcaldia=Coyoacan"]);
        assert_eq!(outcome.result().map(|r| r.total_incidentes), Some(12));
    }

    #[test]
    fn test_error_body_is_a_failure() {
        let backend = MockBackend::default();
        *backend.stats.borrow_mut() = Ok(StatsResponse::Failure {
            error: "Tabla de incidentes vacía".into(),
        });
        let selection = FilterSelection {
            tipo: "bache".into(),
            ..FilterSelection::default()
        };
        assert_eq!(
            block_on(run_query(&backend, &selection)),
            QueryOutcome::Failed("Tabla de incidentes vacía".into())
        );
    }

    #[test]
    fn test_query_failure_message_is_spanish() {
        let backend = MockBackend::default();
        let selection = FilterSelection {
            tipo: "bache".into(),
            ..FilterSelection::default()
        };

        *backend.stats.borrow_mut() = Err(ApiError::Status { status: 500, message: None });
        assert_eq!(
            block_on(run_query(&backend, &selection)),
            QueryOutcome::Failed(MSG_QUERY_FAILED.into())
        );

        *backend.stats.borrow_mut() = Err(ApiError::Transport("offline".into()));
        assert_eq!(
            block_on(run_query(&backend, &selection)),
            QueryOutcome::Failed(format!("{MSG_QUERY_FAILED} (offline)"))
        );
    }

    #[test]
    fn test_last_result_lifecycle() {
        let mut last = LastResult::default();
        assert!(last.detail().is_none());

        last.record(&QueryOutcome::Results(sample_result()));
        assert_eq!(last.detail().map(|r| r.incidentes_c5), Some(7));

        // failures and warnings keep the previous result
        last.record(&QueryOutcome::Failed("timeout".into()));
        last.record(&QueryOutcome::MissingFilter);
        assert_eq!(last.detail(), Some(&sample_result()));
    }
}
