//! Client error types.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::stats::StatsResponse;

/// Failures of a single backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced a response (network, CORS, aborted)
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response, with the backend's message when it sent one
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("sin detalle"))]
    Status { status: u16, message: Option<String> },

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from the raw response body
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: message_from_body(body),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Message to show the user: the backend's own text when present,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Status { message: None, .. } | Self::Decode(_) => fallback.to_string(),
            Self::Transport(detail) => format!("{fallback} ({detail})"),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Map a finished response to `T`.
///
/// Non-2xx becomes [`ApiError::Status`] with the body's message, a 2xx body
/// of the wrong shape becomes [`ApiError::Decode`].
///
/// # Errors
///
/// See above; transport failures never get this far.
pub fn decode_response<T: DeserializeOwned>(
    ok: bool,
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    if !ok {
        return Err(ApiError::from_status(status, body));
    }
    Ok(serde_json::from_str(body)?)
}

/// Status error for a non-2xx response whose body may not have been
/// readable; an unreadable body is logged and treated as having no detail
#[must_use]
pub fn status_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> ApiError {
    match body {
        Ok(body) => ApiError::from_status(status, &body),
        Err(e) => {
            log::debug!("Unreadable body of HTTP {status} response: {e}");
            ApiError::Status {
                status,
                message: None,
            }
        }
    }
}

/// Like [`decode_response`], except that an `{"error": ...}` body is a
/// [`StatsResponse::Failure`] whatever the status.
///
/// # Errors
///
/// Status errors for other non-2xx bodies, decode errors for malformed 2xx
/// bodies.
pub fn decode_stats_response(
    ok: bool,
    status: u16,
    body: &str,
) -> Result<StatsResponse, ApiError> {
    match serde_json::from_str::<StatsResponse>(body) {
        Ok(failure @ StatsResponse::Failure { .. }) => Ok(failure),
        Ok(success) if ok => Ok(success),
        Err(e) if ok => Err(ApiError::from(e)),
        _ => Err(ApiError::from_status(status, body)),
    }
}

/// Client-side validation failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Coordenada inválida en '{field}': {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("Selecciona el tipo de incidente")]
    MissingIncidentType,

    #[error("Debes seleccionar al menos un filtro")]
    NoFilterSelected,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Items(Vec<DetailItem>),
}

#[derive(Deserialize)]
struct DetailItem {
    msg: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
    error: Option<String>,
    message: Option<String>,
}

/// Extract a human-readable message from an error body.
///
/// Understands `{"detail": "..."}`, the 422 form
/// `{"detail": [{"msg": "..."}]}`, `{"error": "..."}` and
/// `{"message": "..."}`.
#[must_use]
pub fn message_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Some(Detail::Text(text)) => Some(text),
        Some(Detail::Items(items)) if !items.is_empty() => Some(
            items
                .into_iter()
                .map(|item| item.msg)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => parsed.error.or(parsed.message),
    }
    .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let err = ApiError::from_status(400, r#"{"detail": "Coordenadas fuera de CDMX"}"#);
        assert_eq!(err.user_message("Error al crear reporte"), "Coordenadas fuera de CDMX");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "lat"], "msg": "field required", "type": "missing"},
                                  {"loc": ["body", "tipo"], "msg": "too short", "type": "x"}]}"#;
        assert_eq!(message_from_body(body).as_deref(), Some("field required, too short"));
    }

    #[test]
    fn test_unknown_body_uses_fallback() {
        let err = ApiError::from_status(500, "<html>Internal Server Error</html>");
        assert_eq!(err, ApiError::Status { status: 500, message: None });
        assert_eq!(err.user_message("Error al crear reporte"), "Error al crear reporte");
    }

    #[test]
    fn test_decode_response_keeps_failure_kinds_apart() {
        let reports: Result<Vec<String>, _> = decode_response(true, 200, r#"["a", "b"]"#);
        assert_eq!(reports.unwrap().len(), 2);

        let status: Result<Vec<String>, _> =
            decode_response(false, 503, r#"{"detail": "Base de datos no disponible"}"#);
        assert_eq!(
            status,
            Err(ApiError::Status {
                status: 503,
                message: Some("Base de datos no disponible".into())
            })
        );

        let malformed: Result<Vec<String>, _> = decode_response(true, 200, r#"{"reports": []}"#);
        assert!(matches!(malformed, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_stats_error_body_wins_over_status() {
        let body = r#"{"error": "Sin datos para esos filtros"}"#;
        let expected = StatsResponse::Failure {
            error: "Sin datos para esos filtros".into(),
        };
        assert_eq!(decode_stats_response(true, 200, body), Ok(expected.clone()));
        assert_eq!(decode_stats_response(false, 500, body), Ok(expected));
    }

    #[test]
    fn test_stats_other_failures() {
        assert_eq!(
            decode_stats_response(false, 422, r#"{"detail": "limit inválido"}"#),
            Err(ApiError::Status {
                status: 422,
                message: Some("limit inválido".into())
            })
        );
        assert!(matches!(
            decode_stats_response(true, 200, r#"{"total": "doce"}"#),
            Err(ApiError::Decode(_))
        ));

        let ok = r#"{"total_incidentes": 3, "incidentes_c5": 2, "incidentes_usuarios": 1}"#;
        assert!(matches!(decode_stats_response(true, 200, ok), Ok(StatsResponse::Success(_))));
    }

    #[test]
    fn test_status_error_with_unreadable_body() {
        let unreadable: Result<String, &str> = Err("stream closed");
        let err = status_error(404, unreadable);
        assert_eq!(err, ApiError::Status { status: 404, message: None });
        assert!(err.is_not_found());

        let readable: Result<String, &str> = Ok(r#"{"detail": "Reporte no encontrado"}"#.into());
        assert_eq!(
            status_error(404, readable).user_message("x"),
            "Reporte no encontrado"
        );
    }

    #[test]
    fn test_not_found() {
        assert!(ApiError::from_status(404, r#"{"detail":"Reporte no encontrado"}"#).is_not_found());
        assert!(!ApiError::Transport("offline".into()).is_not_found());
    }
}
