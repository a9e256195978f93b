//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::noaa::Fetch;
use crate::observations::YearSummary;
use crate::proximity::NearbyStation;
use crate::service::HistoryError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<F: Fetch + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/stations-within-radius/:latitude/:longitude/:radius/:limit/:start_year/:end_year",
            get(stations_within_radius::<F>),
        )
        .route(
            "/station-data/:station_id/:start_year/:end_year",
            get(station_data::<F>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stations within a radius, closest first.
async fn stations_within_radius<F: Fetch>(
    State(state): State<AppState<F>>,
    path: Result<Path<NearbyPath>, PathRejection>,
) -> Result<Json<Vec<NearbyStation>>, AppError> {
    let Path(params) = path?;
    let stations = state.service.nearby_stations(&params.into()).await;
    Ok(Json(stations))
}

/// Yearly and seasonal averages for one station.
async fn station_data<F: Fetch>(
    State(state): State<AppState<F>>,
    path: Result<Path<HistoryPath>, PathRejection>,
) -> Result<Json<Vec<YearSummary>>, AppError> {
    let Path(params) = path?;
    let summaries = state
        .service
        .station_history(&params.station_id, params.start_year, params.end_year)
        .await?;
    Ok(Json(summaries))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        let message = e.to_string();
        match e {
            HistoryError::InvalidStationId(_) => AppError::BadRequest { message },
            HistoryError::UnknownStation { .. } => AppError::NotFound { message },
            HistoryError::Fetch(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
