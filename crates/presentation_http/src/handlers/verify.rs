//! Verification handlers
//!
//! `POST /verify/city/{city}` fetches and saves one city for a user.
//! `POST /verify/notification` refreshes every saved city of a user and
//! returns today's severe-weather alerts.

use application::ApplicationError;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use domain::{Alert, ForecastSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::error::{ApiError, INTERNAL_ERROR_MESSAGE};
use crate::state::AppState;

/// Returned when the user id or the city is missing
pub const INVALID_CITY_PARAMS: &str = "Parâmetros inválidos. userId e city são obrigatórios.";

/// Returned when the user id is missing
pub const INVALID_USER_PARAM: &str = "Parâmetro inválido. userId é obrigatório.";

/// Returned when the user has no saved cities
pub const NO_CITIES_MESSAGE: &str = "Nenhuma cidade registrada para este usuário.";

/// Returned after a completed refresh
pub const REFRESH_DONE_MESSAGE: &str = "Atualização e verificação concluídas.";

/// Request body shared by both verification endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Response of `POST /verify/city/{city}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCityResponse {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ForecastSnapshot>,
    /// Upstream error body when it was JSON, otherwise a message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl VerifyCityResponse {
    fn found(snapshot: ForecastSnapshot) -> Self {
        Self {
            exists: true,
            data: Some(snapshot),
            error: None,
        }
    }

    fn failed(error: Value) -> Self {
        Self {
            exists: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Response of `POST /verify/notification`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub message: String,
    pub alerts: Vec<Alert>,
}

/// Take the user id from a body that may be missing or malformed
fn user_id_from(body: Result<Json<VerifyRequest>, JsonRejection>) -> Option<String> {
    match body {
        Ok(Json(request)) => request.user_id,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable request body");
            None
        },
    }
}

/// Translate a city verification failure into a status and error value
///
/// Upstream statuses pass through; the upstream body is returned as JSON
/// when it parses, otherwise as a string.
fn city_failure(err: ApplicationError) -> (StatusCode, Value) {
    if err.is_validation() {
        return (
            StatusCode::BAD_REQUEST,
            Value::String(INVALID_CITY_PARAMS.to_string()),
        );
    }

    match err {
        ApplicationError::Fetch {
            status: Some(status),
            body,
        } => {
            let status = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let error = serde_json::from_str(&body).unwrap_or(Value::String(body));
            (status, error)
        },
        ApplicationError::Fetch { status: None, body } => {
            (StatusCode::INTERNAL_SERVER_ERROR, Value::String(body))
        },
        other => {
            error!(error = %other, "City verification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Value::String(INTERNAL_ERROR_MESSAGE.to_string()),
            )
        },
    }
}

/// Fetch, store and return the forecast for one city
#[instrument(skip(state, body))]
pub async fn verify_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> (StatusCode, Json<VerifyCityResponse>) {
    let user_id = user_id_from(body);

    match state
        .update_service
        .verify_and_save_city(user_id.as_deref(), Some(&city))
        .await
    {
        Ok(snapshot) => (StatusCode::OK, Json(VerifyCityResponse::found(snapshot))),
        Err(e) => {
            warn!(error = %e, "City not verified");
            let (status, error) = city_failure(e);
            (status, Json(VerifyCityResponse::failed(error)))
        },
    }
}

/// Refresh all saved cities for a user and return today's alerts
#[instrument(skip(state, body))]
pub async fn verify_notification(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let user_id = user_id_from(body);

    match state
        .update_service
        .refresh_and_alert(user_id.as_deref())
        .await
    {
        Ok(report) if report.has_no_cities() => Ok(Json(NotificationResponse {
            message: NO_CITIES_MESSAGE.to_string(),
            alerts: Vec::new(),
        })),
        Ok(report) => {
            info!(
                alerts = report.alerts.len(),
                skipped = report.skipped.len(),
                "Notification check completed"
            );
            Ok(Json(NotificationResponse {
                message: REFRESH_DONE_MESSAGE.to_string(),
                alerts: report.alerts,
            }))
        },
        Err(e) if e.is_validation() => Err(ApiError::BadRequest(INVALID_USER_PARAM.to_string())),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}
