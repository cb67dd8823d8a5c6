//! Route table and request handlers for the guest resource.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use guest_core::error::GuestError;
use guest_core::model::{CreateGuestRequest, Guest, UpdateGuestRequest};
use guest_core::service::GuestService;
use guest_core::validation::parse_guest_id;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub guests: GuestService,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Adapter mapping `GuestError` onto an HTTP response, so handlers can
/// use `?` throughout.
pub struct ApiError(GuestError);

impl From<GuestError> for ApiError {
    fn from(err: GuestError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            GuestError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            GuestError::InvalidIdentifier => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: "Invalid identifier".to_string(),
                }),
            )
                .into_response(),
            GuestError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Guest not found".to_string(),
                }),
            )
                .into_response(),
            GuestError::Storage(err) => {
                error!("Storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/guest", post(create_guest))
        .route(
            "/api/guest/:id",
            get(show_guest).put(update_guest).delete(delete_guest),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/guest
async fn create_guest(
    State(state): State<AppState>,
    Json(req): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<Guest>), ApiError> {
    let guest = state.guests.create(req).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

/// GET /api/guest/:id
async fn show_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Guest>, ApiError> {
    let id = parse_guest_id(&id)?;
    let guest = state.guests.fetch(id).await?;
    Ok(Json(guest))
}

/// PUT /api/guest/:id
async fn update_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGuestRequest>,
) -> Result<Json<Guest>, ApiError> {
    let id = parse_guest_id(&id)?;
    let guest = state.guests.update(id, req).await?;
    Ok(Json(guest))
}

/// DELETE /api/guest/:id
async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_guest_id(&id)?;
    state.guests.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Guest deleted successfully",
    }))
}
