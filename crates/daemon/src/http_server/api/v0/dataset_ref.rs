use axum::extract::Json;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use common::prelude::DatasetRef;

use crate::http_server::context::{resolve_dataset_ref, ResolvedRef};
use crate::ServiceState;

/// Routes addressing a dataset by the rest of the request path,
/// e.g. `/peer/cities/at/ipfs/QmHash`
pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(handler))
        .route("/*path", get(handler))
        .route_layer(middleware::from_fn(resolve_dataset_ref))
        .with_state(state)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRefResponse {
    #[serde(rename = "ref")]
    pub dataset_ref: DatasetRef,
    /// Canonical string form of `dataset_ref`
    pub canonical: String,
}

pub async fn handler(ResolvedRef(dataset_ref): ResolvedRef) -> Result<Response, DatasetRefError> {
    let dataset_ref = dataset_ref.ok_or(DatasetRefError::NoReference)?;
    let response = DatasetRefResponse {
        canonical: dataset_ref.to_string(),
        dataset_ref,
    };
    Ok((http::StatusCode::OK, Json(response)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetRefError {
    #[error("no dataset reference in request")]
    NoReference,
}

impl IntoResponse for DatasetRefError {
    fn into_response(self) -> Response {
        match self {
            DatasetRefError::NoReference => (
                http::StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "msg": self.to_string() })),
            )
                .into_response(),
        }
    }
}
