//! Shared test utilities for daemon integration tests
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use ::common::config::Config;
use ::common::profile::Profile;
use tower::ServiceExt;

use quarry_daemon::{http_server, ServiceState};

pub const PEER_ID: &str = "QmZePf5LeXow3RW5U1AgEiNbW46YnRGhZ7HPvm1UmPFPwt";
pub const PEERNAME: &str = "crisp_gray_newfoundland";
pub const PRIVKEY: &str = "CAASpgkwggSiAgEAAoIBAQC";

/// A valid profile with a placeholder key, no keygen involved
pub fn profile() -> Profile {
    serde_json::from_value(serde_json::json!({
        "id": PEER_ID,
        "privkey": PRIVKEY,
        "peername": PEERNAME,
        "created": "2026-01-01T00:00:00Z",
        "updated": "2026-01-01T00:00:00Z",
        "type": "peer",
        "email": "peer@example.com",
    }))
    .unwrap()
}

/// Build the API router around the test profile
pub fn setup_router() -> Router {
    let state = ServiceState::new(Config::with_profile(profile()));
    let config = http_server::Config::new(SocketAddr::from(([127, 0, 0, 1], 0)));
    http_server::router(config, state)
}

/// Send a GET request, returning the status and the raw body
pub async fn get(router: &Router, uri: &str, accept: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().uri(uri);
    if let Some(accept) = accept {
        builder = builder.header("accept", accept);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// Send a GET request and parse the JSON body
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(router, uri, Some("application/json")).await;
    (status, serde_json::from_slice(&body).unwrap())
}
