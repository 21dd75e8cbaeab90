//! # Backend Contract
//!
//! One method per REST capability. Implementations issue exactly one
//! request per call and never retry or cache.

use crate::error::ApiError;
use crate::stats::{FilterOptions, NeighborhoodList, StatsQuery, StatsResponse};
use crate::{NewReport, Report};

pub const REPORTS_PATH: &str = "/reports";
pub const OPTIONS_PATH: &str = "/stats/opciones";
pub const FILTERED_STATS_PATH: &str = "/stats/filtradas";

/// Upper bound the backend accepts for `GET /reports?limit=`
pub const MAX_REPORT_LIMIT: u32 = 1000;

/// `GET /reports` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub limit: u32,
    pub tipo: Option<String>,
    pub alcaldia: Option<String>,
    pub colonia: Option<String>,
}

impl ReportQuery {
    /// Plain listing, newest first, clamped to `1..=1000`
    #[must_use]
    pub fn latest(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_REPORT_LIMIT),
            tipo: None,
            alcaldia: None,
            colonia: None,
        }
    }

    #[must_use]
    pub fn path_and_query(&self) -> String {
        let mut path = format!("{REPORTS_PATH}?limit={}", self.limit);
        let filters = [
            ("tipo", &self.tipo),
            ("alcaldia", &self.alcaldia),
            ("colonia", &self.colonia),
        ];
        for (key, value) in filters {
            if let Some(value) = value {
                path.push_str(&format!("&{key}={}", urlencoding::encode(value)));
            }
        }
        path
    }
}

#[must_use]
pub fn report_path(id: i64) -> String {
    format!("{REPORTS_PATH}/{id}")
}

#[must_use]
pub fn neighborhoods_path(alcaldia: &str) -> String {
    format!("/stats/colonias/{}", urlencoding::encode(alcaldia))
}

#[must_use]
pub fn filtered_stats_path(query: &StatsQuery) -> String {
    format!("{FILTERED_STATS_PATH}?{}", query.query_string())
}

/// HTTP client adapter contract.
///
/// Futures are not required to be `Send`; the browser runs everything on
/// one thread.
#[allow(async_fn_in_trait)]
pub trait IncidentBackend {
    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, ApiError>;

    async fn create_report(&self, report: &NewReport) -> Result<Report, ApiError>;

    /// `Ok` on any 2xx (the backend answers 204)
    async fn delete_report(&self, id: i64) -> Result<(), ApiError>;

    async fn filter_options(&self) -> Result<FilterOptions, ApiError>;

    async fn neighborhoods(&self, alcaldia: &str) -> Result<NeighborhoodList, ApiError>;

    async fn filtered_stats(&self, query: &StatsQuery) -> Result<StatsResponse, ApiError>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory backend that records every call.

    use std::cell::RefCell;

    use super::*;

    pub struct MockBackend {
        pub calls: RefCell<Vec<String>>,
        pub reports: RefCell<Result<Vec<Report>, ApiError>>,
        pub create: RefCell<Result<Report, ApiError>>,
        pub created: RefCell<Vec<NewReport>>,
        pub delete: RefCell<Result<(), ApiError>>,
        pub options: RefCell<Result<FilterOptions, ApiError>>,
        pub neighborhoods: RefCell<Result<NeighborhoodList, ApiError>>,
        pub stats: RefCell<Result<StatsResponse, ApiError>>,
    }

    impl Default for MockBackend {
        fn default() -> Self {
            let unscripted = || ApiError::Transport("unscripted".into());
            Self {
                calls: RefCell::new(Vec::new()),
                reports: RefCell::new(Ok(Vec::new())),
                create: RefCell::new(Err(unscripted())),
                created: RefCell::new(Vec::new()),
                delete: RefCell::new(Ok(())),
                options: RefCell::new(Ok(FilterOptions::default())),
                neighborhoods: RefCell::new(Ok(NeighborhoodList::default())),
                stats: RefCell::new(Err(unscripted())),
            }
        }
    }

    impl MockBackend {
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl IncidentBackend for MockBackend {
        async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, ApiError> {
            self.record(format!("GET {}", query.path_and_query()));
            self.reports.borrow().clone()
        }

        async fn create_report(&self, report: &NewReport) -> Result<Report, ApiError> {
            self.record(format!("POST {REPORTS_PATH}"));
            self.created.borrow_mut().push(report.clone());
            self.create.borrow().clone()
        }

        async fn delete_report(&self, id: i64) -> Result<(), ApiError> {
            self.record(format!("DELETE {}", report_path(id)));
            let result = self.delete.borrow().clone();
            if result.is_ok() {
                if let Ok(reports) = self.reports.borrow_mut().as_mut() {
                    reports.retain(|r| r.id != id);
                }
            }
            result
        }

        async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
            self.record(format!("GET {OPTIONS_PATH}"));
            self.options.borrow().clone()
        }

        async fn neighborhoods(&self, alcaldia: &str) -> Result<NeighborhoodList, ApiError> {
            self.record(format!("GET {}", neighborhoods_path(alcaldia)));
            self.neighborhoods.borrow().clone()
        }

        async fn filtered_stats(&self, query: &StatsQuery) -> Result<StatsResponse, ApiError> {
            self.record(format!("GET {}", filtered_stats_path(query)));
            self.stats.borrow().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_query_clamps_limit() {
        assert_eq!(ReportQuery::latest(0).limit, 1);
        assert_eq!(ReportQuery::latest(5000).path_and_query(), "/reports?limit=1000");
    }

    #[test]
    fn test_report_query_filters() {
        let query = ReportQuery {
            tipo: Some("robo a transeúnte".into()),
            colonia: Some("Roma Norte".into()),
            ..ReportQuery::latest(200)
        };
        assert_eq!(
            query.path_and_query(),
            "/reports?limit=200&tipo=robo%20a%20transe%C3%BAnte&colonia=Roma%20Norte"
        );
    }

    #[test]
    fn test_neighborhoods_path_encodes_borough() {
        assert_eq!(neighborhoods_path("Benito Juárez"), "/stats/colonias/Benito%20Ju%C3%A1rez");
    }
}
