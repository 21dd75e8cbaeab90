//! # Incident Map - Domain Model
//!
//! Wire types, client-side validation and the view-agnostic workflows for
//! the urban incident map. These types are shared between the browser
//! front-end and its tests; nothing in this crate touches the DOM.
//!
//! The authoritative copy of every report lives on the backend. The client
//! only ever holds a transient, fully reloadable copy for rendering.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod backend;
pub mod error;
pub mod stats;
pub mod workflow;

pub use backend::*;
pub use error::*;
pub use stats::*;
pub use workflow::*;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Zócalo, Ciudad de México
pub const DEFAULT_CENTER: LatLon = LatLon {
    lat: 19.4326,
    lon: -99.1332,
};

impl LatLon {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Latitude as written into the report form
    #[must_use]
    pub fn lat_field(&self) -> String {
        format!("{:.6}", self.lat)
    }

    /// Longitude as written into the report form
    #[must_use]
    pub fn lon_field(&self) -> String {
        format!("{:.6}", self.lon)
    }

    /// Popup body shown on the picker after a drag or a click
    #[must_use]
    pub fn popup_html(&self) -> String {
        format!("Lat: {:.6}<br>Lon: {:.6}", self.lat, self.lon)
    }
}

impl Default for LatLon {
    fn default() -> Self {
        DEFAULT_CENTER
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

// =============================================================================
// REPORTS
// =============================================================================

pub const NO_LOCATION_LABEL: &str = "Sin ubicación";
pub const NO_DESCRIPTION_LABEL: &str = "Sin descripción";

/// Incident report as returned by `GET /reports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub tipo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub alcaldia: Option<String>,
    #[serde(default)]
    pub colonia: Option<String>,
    pub created_at: String,
}

impl Report {
    #[must_use]
    pub const fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    /// Neighborhood, else borough, else a placeholder
    #[must_use]
    pub fn location_label(&self) -> &str {
        non_blank(self.colonia.as_deref())
            .or_else(|| non_blank(self.alcaldia.as_deref()))
            .unwrap_or(NO_LOCATION_LABEL)
    }

    /// Description text if the reporter wrote one
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_blank(self.descripcion.as_deref())
    }

    #[must_use]
    pub fn description_or_placeholder(&self) -> &str {
        self.description().unwrap_or(NO_DESCRIPTION_LABEL)
    }

    /// Creation time, if the server timestamp parses.
    ///
    /// Timestamps without an offset are taken as UTC.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Creation time rendered `dd/mm/yyyy, HH:MM:SS` in the given zone,
    /// falling back to the raw server string.
    pub fn created_at_label<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.created_at_utc().map_or_else(
            || self.created_at.clone(),
            |ts| format_es_mx(&ts.with_timezone(tz)),
        )
    }
}

/// Parse a backend timestamp (RFC 3339, or naive ISO-8601 assumed UTC)
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// es-MX short date/time format
pub fn format_es_mx<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Body of `POST /reports`.
///
/// Borough and neighborhood are always present in the payload, as `null`
/// when blank. The description is left out entirely when blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub tipo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub alcaldia: Option<String>,
    pub colonia: Option<String>,
}

/// Raw text of the report form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub tipo: String,
    pub descripcion: String,
    pub lat: String,
    pub lon: String,
    pub alcaldia: String,
    pub colonia: String,
}

impl ReportDraft {
    /// Overwrite the coordinate fields from the picker position
    pub fn set_position(&mut self, position: LatLon) {
        self.lat = position.lat_field();
        self.lon = position.lon_field();
    }

    /// Coordinate currently typed into the form, if both fields parse
    #[must_use]
    pub fn position(&self) -> Option<LatLon> {
        let lat = parse_coordinate("lat", &self.lat).ok()?;
        let lon = parse_coordinate("lon", &self.lon).ok()?;
        Some(LatLon::new(lat, lon))
    }

    /// Form content after `submitted` was accepted: every field still
    /// holding the submitted text is cleared, edits made meanwhile stay.
    #[must_use]
    pub fn cleared_after(&self, submitted: &Self) -> Self {
        let keep = |current: &String, sent: &String| {
            if current == sent { String::new() } else { current.clone() }
        };
        Self {
            tipo: keep(&self.tipo, &submitted.tipo),
            descripcion: keep(&self.descripcion, &submitted.descripcion),
            lat: keep(&self.lat, &submitted.lat),
            lon: keep(&self.lon, &submitted.lon),
            alcaldia: keep(&self.alcaldia, &submitted.alcaldia),
            colonia: keep(&self.colonia, &submitted.colonia),
        }
    }

    /// Validate the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank type or a coordinate that
    /// is not a finite number. Nothing is sent to the backend in that case.
    pub fn to_new_report(&self) -> Result<NewReport, ValidationError> {
        let tipo = self.tipo.trim();
        if tipo.is_empty() {
            return Err(ValidationError::MissingIncidentType);
        }

        Ok(NewReport {
            tipo: tipo.to_string(),
            descripcion: optional_text(&self.descripcion),
            lat: parse_coordinate("lat", &self.lat)?,
            lon: parse_coordinate("lon", &self.lon)?,
            alcaldia: optional_text(&self.alcaldia),
            colonia: optional_text(&self.colonia),
        })
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidCoordinate {
            field,
            value: raw.to_string(),
        })
}

/// Blank text becomes `None`
#[must_use]
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Minimal HTML escaping for text interpolated into map popups
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Report {
    /// Popup body of an incident marker
    #[must_use]
    pub fn popup_html(&self) -> String {
        format!(
            "<strong>{}</strong><br>{}<br><small>{}</small>",
            escape_html(&self.tipo),
            escape_html(self.description_or_placeholder()),
            escape_html(self.location_label()),
        )
    }
}
