use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ServiceState;

#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// Base58 peer id of this node
    pub peer_id: String,
    pub peername: String,
}

#[tracing::instrument(skip(state))]
pub async fn handler(State(state): State<ServiceState>) -> Response {
    let profile = state.profile();
    let response = IdentityResponse {
        peer_id: profile.id.clone(),
        peername: profile.peername.clone(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
