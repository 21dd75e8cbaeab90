//! # Filtered Statistics
//!
//! Filter vocabularies, the user's filter selection, the query it turns
//! into, and the aggregate result the backend sends back.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::optional_text;

/// Limits offered by the standalone statistics form
pub const STATS_LIMIT_CHOICES: [u32; 3] = [20, 50, 100];
pub const DEFAULT_STATS_LIMIT: u32 = 50;
/// Fixed limit of the embedded statistics panel
pub const PANEL_STATS_LIMIT: u32 = 20;

/// Label of the leading "no filter" option of every selector
pub const UNSELECTED_LABEL: &str = "(Opcional)";

/// Global option vocabulary from `GET /stats/opciones`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub tipos_incidente: Vec<String>,
    pub alcaldias: Vec<String>,
    pub colonias: Vec<String>,
}

/// Borough-scoped neighborhoods from `GET /stats/colonias/{alcaldia}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodList {
    pub colonias: Vec<String>,
}

/// Current values of the filter selectors; empty string means unselected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub tipo: String,
    pub alcaldia: String,
    pub colonia: String,
    pub limit: u32,
}

impl FilterSelection {
    #[must_use]
    pub const fn with_limit(limit: u32) -> Self {
        Self {
            tipo: String::new(),
            alcaldia: String::new(),
            colonia: String::new(),
            limit,
        }
    }

    #[must_use]
    pub fn has_filter(&self) -> bool {
        [&self.tipo, &self.alcaldia, &self.colonia]
            .iter()
            .any(|value| !value.trim().is_empty())
    }

    /// Turn the selection into an executable query.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoFilterSelected`] when type, borough and
    /// neighborhood are all empty.
    pub fn to_query(&self) -> Result<StatsQuery, ValidationError> {
        if !self.has_filter() {
            return Err(ValidationError::NoFilterSelected);
        }
        Ok(StatsQuery {
            limit: self.limit,
            tipo_incidente: optional_text(&self.tipo),
            alcaldia: optional_text(&self.alcaldia),
            colonia: optional_text(&self.colonia),
        })
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::with_limit(DEFAULT_STATS_LIMIT)
    }
}

/// Validated `GET /stats/filtradas` query; at least one filter is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    limit: u32,
    tipo_incidente: Option<String>,
    alcaldia: Option<String>,
    colonia: Option<String>,
}

impl StatsQuery {
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Query parameters in wire order, values not yet encoded
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        let filters = [
            ("tipo_incidente", &self.tipo_incidente),
            ("alcaldia", &self.alcaldia),
            ("colonia", &self.colonia),
        ];
        for (key, value) in filters {
            if let Some(value) = value {
                params.push((key, value.clone()));
            }
        }
        params
    }

    /// Percent-encoded query string, without the leading `?`
    #[must_use]
    pub fn query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Filter tuple echoed back by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilters {
    #[serde(default)]
    pub tipo_incidente: Option<String>,
    #[serde(default)]
    pub alcaldia: Option<String>,
    #[serde(default)]
    pub colonia: Option<String>,
}

impl AppliedFilters {
    /// `Tipo: x | Alcaldía: y | Colonia: z`, skipping unset filters
    #[must_use]
    pub fn describe(&self) -> String {
        [
            ("Tipo", &self.tipo_incidente),
            ("Alcaldía", &self.alcaldia),
            ("Colonia", &self.colonia),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}"))
        })
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodCount {
    pub colonia: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub tipo: String,
    pub total: u64,
}

/// Aggregate result of a filtered statistics query.
///
/// The two source counts are opaque: `incidentes_c5` comes from the city's
/// C5 feed, `incidentes_usuarios` from reports submitted through this map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResult {
    pub total_incidentes: u64,
    pub incidentes_c5: u64,
    pub incidentes_usuarios: u64,
    #[serde(default)]
    pub filtros_aplicados: AppliedFilters,
    #[serde(default)]
    pub top_colonias: Vec<NeighborhoodCount>,
    #[serde(default)]
    pub top_tipos: Vec<TypeCount>,
}

/// Body of `GET /stats/filtradas`: either a result or `{"error": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Failure { error: String },
    Success(StatsResult),
}

/// One row of a ranked table; `position` is 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub position: usize,
    pub label: String,
    pub total: u64,
}

/// Render-ready form of a [`StatsResult`].
///
/// Both the standalone modal and the embedded panel render from this, so
/// the same result always produces the same tables. Rows keep the order
/// the backend returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub total: u64,
    pub c5: u64,
    pub usuarios: u64,
    pub filters_line: String,
    pub by_neighborhood: Vec<RankedRow>,
    pub by_type: Vec<RankedRow>,
}

impl From<&StatsResult> for StatsReport {
    fn from(result: &StatsResult) -> Self {
        Self {
            total: result.total_incidentes,
            c5: result.incidentes_c5,
            usuarios: result.incidentes_usuarios,
            filters_line: result.filtros_aplicados.describe(),
            by_neighborhood: result
                .top_colonias
                .iter()
                .enumerate()
                .map(|(i, row)| RankedRow {
                    position: i + 1,
                    label: row.colonia.clone(),
                    total: row.total,
                })
                .collect(),
            by_type: result
                .top_tipos
                .iter()
                .enumerate()
                .map(|(i, row)| RankedRow {
                    position: i + 1,
                    label: row.tipo.clone(),
                    total: row.total,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_selection_is_rejected() {
        let selection = FilterSelection {
            tipo: " ".into(),
            ..FilterSelection::default()
        };
        assert_eq!(selection.to_query(), Err(ValidationError::NoFilterSelected));
    }

    #[test]
    fn test_single_filter_query_string() {
        let selection = FilterSelection {
            alcaldia: "Coyoacan".into(),
            ..FilterSelection::default()
        };
        let query = selection.to_query().unwrap();
        assert_eq!(query.query_string(), "limit=50&alcaldia=Coyoacan");
        assert_eq!(query.params().len(), 2);
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let selection = FilterSelection {
            tipo: "Choque con lesionados".into(),
            alcaldia: "Álvaro Obregón".into(),
            colonia: "San Ángel & Tizapán".into(),
            limit: 100,
        };
        assert_eq!(
            selection.to_query().unwrap().query_string(),
            "limit=100&tipo_incidente=Choque%20con%20lesionados\
             &alcaldia=%C3%81lvaro%20Obreg%C3%B3n\
             &colonia=San%20%C3%81ngel%20%26%20Tizap%C3%A1n"
        );
    }

    #[test]
    fn test_error_body_decodes_as_failure() {
        let response: StatsResponse =
            serde_json::from_value(json!({"error": "Sin datos C5 cargados"})).unwrap();
        assert_eq!(
            response,
            StatsResponse::Failure {
                error: "Sin datos C5 cargados".into()
            }
        );
    }

    #[test]
    fn test_report_keeps_backend_order() {
        let response: StatsResponse = serde_json::from_value(json!({
            "total_incidentes": 12,
            "incidentes_c5": 7,
            "incidentes_usuarios": 5,
            "filtros_aplicados": {"tipo_incidente": null, "alcaldia": "Coyoacan", "colonia": null},
            "top_colonias": [{"colonia": "Centro", "total": 4}, {"colonia": "Zona Z", "total": 9}],
            "top_tipos": [{"tipo": "bache", "total": 8}]
        }))
        .unwrap();
        let StatsResponse::Success(result) = response else {
            panic!("expected a result");
        };

        let report = StatsReport::from(&result);
        assert_eq!((report.total, report.c5, report.usuarios), (12, 7, 5));
        assert_eq!(report.filters_line, "Alcaldía: Coyoacan");
        assert_eq!(
            report.by_neighborhood[0],
            RankedRow { position: 1, label: "Centro".into(), total: 4 }
        );
        assert_eq!(report.by_neighborhood[1].label, "Zona Z");
        assert_eq!(report.by_type, vec![RankedRow { position: 1, label: "bache".into(), total: 8 }]);
    }

    #[test]
    fn test_missing_rankings_default_to_empty() {
        let result: StatsResult = serde_json::from_value(json!({
            "total_incidentes": 0, "incidentes_c5": 0, "incidentes_usuarios": 0
        }))
        .unwrap();
        let report = StatsReport::from(&result);
        assert!(report.by_neighborhood.is_empty());
        assert!(report.filters_line.is_empty());
    }
}
