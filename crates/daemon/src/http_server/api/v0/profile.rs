use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::ServiceState;

/// The node's own profile, never including its private key
#[tracing::instrument(skip(state))]
pub async fn handler(State(state): State<ServiceState>) -> Response {
    (StatusCode::OK, Json(state.profile().redacted())).into_response()
}
