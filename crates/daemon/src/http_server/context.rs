//! Per-request dataset reference resolution.
//!
//! A reference is derived from the request path once, by
//! [`resolve_dataset_ref`], and carried in the request extensions for
//! handlers further down the stack to pick up with [`ResolvedRef`].

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::request::Parts;
use http::{Extensions, StatusCode};
use percent_encoding::percent_decode_str;

use common::prelude::{http_path_to_ref_path, DatasetRef, ParseError};

/// Extension slot holding the resolved reference.
///
/// Private so the only way to fill it is through this module.
#[derive(Debug, Clone)]
struct RefSlot(DatasetRef);

/// Resolve the dataset reference addressed by a request's path.
///
/// The path is percent-decoded before translation. A request without a
/// path (the root `/`) addresses no dataset and yields `Ok(None)`.
pub fn dataset_ref_from_req<B>(req: &http::Request<B>) -> Result<Option<DatasetRef>, ParseError> {
    let path = percent_decode_str(req.uri().path())
        .decode_utf8()
        .map_err(|_| ParseError::InvalidEncoding(req.uri().path().to_string()))?;
    if path.is_empty() || path == "/" {
        return Ok(None);
    }
    dataset_ref_from_path(&path).map(Some)
}

/// Translate an HTTP path into canonical form and parse it
pub fn dataset_ref_from_path(path: &str) -> Result<DatasetRef, ParseError> {
    DatasetRef::parse(&http_path_to_ref_path(path))
}

/// The reference stored for this request, if any
pub fn dataset_ref_from_extensions(extensions: &Extensions) -> Option<&DatasetRef> {
    extensions.get::<RefSlot>().map(|slot| &slot.0)
}

fn insert_dataset_ref(extensions: &mut Extensions, dataset_ref: DatasetRef) {
    extensions.insert(RefSlot(dataset_ref));
}

/// Middleware resolving the request path into a [`DatasetRef`].
///
/// Malformed references are answered with a 400; requests that address
/// no dataset pass through untouched.
pub async fn resolve_dataset_ref(mut req: Request, next: Next) -> Response {
    match dataset_ref_from_req(&req) {
        Ok(Some(dataset_ref)) => {
            tracing::debug!(dataset_ref = %dataset_ref, "resolved dataset reference");
            insert_dataset_ref(req.extensions_mut(), dataset_ref);
        }
        Ok(None) => {}
        Err(e) => return ContextError::from(e).into_response(),
    }

    next.run(req).await
}

/// Extractor for the reference resolved by [`resolve_dataset_ref`].
///
/// Never rejects: `None` when nothing was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef(pub Option<DatasetRef>);

#[async_trait]
impl<S> FromRequestParts<S> for ResolvedRef
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(dataset_ref_from_extensions(&parts.extensions).cloned()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("malformed dataset reference: {0}")]
    MalformedRef(#[from] ParseError),
}

impl IntoResponse for ContextError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejecting request");
        match self {
            ContextError::MalformedRef(_) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "msg": self.to_string() })),
            )
                .into_response(),
        }
    }
}
