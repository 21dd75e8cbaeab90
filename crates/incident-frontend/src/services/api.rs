//! # API Client
//!
//! REST client for the incident backend, built on `gloo-net`.

use gloo_net::http::{Request, Response};
use incident_domain::{
    decode_response, decode_stats_response, filtered_stats_path, neighborhoods_path, report_path,
    status_error, ApiError, FilterOptions, IncidentBackend, NeighborhoodList, NewReport, Report,
    ReportQuery, StatsQuery, StatsResponse, OPTIONS_PATH, REPORTS_PATH,
};
use leptos::prelude::*;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

/// HTTP implementation of [`IncidentBackend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ApiConfig,
}

impl HttpBackend {
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.config.url(path);
        log::debug!("GET {url}");
        Request::get(&url).send().await.map_err(transport)
    }
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Read the body, then map non-2xx to a status error and the rest to `T`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let body = response.text().await.map_err(transport)?;
    decode_response(ok, status, &body)
}

impl IncidentBackend for HttpBackend {
    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, ApiError> {
        let response = self.get(&query.path_and_query()).await?;
        read_json(response).await
    }

    async fn create_report(&self, report: &NewReport) -> Result<Report, ApiError> {
        let url = self.config.url(REPORTS_PATH);
        log::debug!("POST {url}");
        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(report)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn delete_report(&self, id: i64) -> Result<(), ApiError> {
        let url = self.config.url(&report_path(id));
        log::debug!("DELETE {url}");
        let response = Request::delete(&url).send().await.map_err(transport)?;

        if response.ok() {
            return Ok(());
        }
        Err(status_error(response.status(), response.text().await))
    }

    async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        let response = self.get(OPTIONS_PATH).await?;
        read_json(response).await
    }

    async fn neighborhoods(&self, alcaldia: &str) -> Result<NeighborhoodList, ApiError> {
        let response = self.get(&neighborhoods_path(alcaldia)).await?;
        read_json(response).await
    }

    async fn filtered_stats(&self, query: &StatsQuery) -> Result<StatsResponse, ApiError> {
        let response = self.get(&filtered_stats_path(query)).await?;
        let status = response.status();
        let ok = response.ok();
        let body = response.text().await.map_err(transport)?;
        decode_stats_response(ok, status, &body)
    }
}

pub fn provide_backend(config: ApiConfig) {
    provide_context(HttpBackend::new(config));
}

pub fn use_backend() -> HttpBackend {
    expect_context::<HttpBackend>()
}
