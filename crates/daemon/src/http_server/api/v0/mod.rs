use axum::routing::get;
use axum::Router;

pub mod dataset_ref;
pub mod profile;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/profile", get(profile::handler))
        .nest("/ref", dataset_ref::router(state.clone()))
        .with_state(state)
}
