//! Backend response relay.
//!
//! The client request body goes to the backend as-is (the transport takes an
//! `axum::body::Body`); this module handles the return direction. Both
//! directions are streamed chunk by chunk; nothing here assumes a body fits
//! in memory.

use axum::body::Body;
use axum::response::Response;
use futures_util::TryStreamExt;
use hyper::body::Incoming;

use crate::proxy::error::ProxyError;
use crate::proxy::headers;

/// Build the client response from the backend response.
///
/// Status first, then headers, then the streamed body. A failure while
/// streaming ends the body with an error, which aborts the client connection
/// instead of rewriting a response that is already on the wire.
pub fn to_client(backend: hyper::Response<Incoming>) -> Response {
    let (parts, incoming) = backend.into_parts();

    let mut response = Response::new(Body::empty());
    *response.status_mut() = parts.status;
    headers::merge_from_backend(response.headers_mut(), &parts.headers);

    let stream = Body::new(incoming).into_data_stream().map_err(|e| {
        let err = ProxyError::StreamingIo(Box::new(e));
        tracing::warn!(error = %err, "Backend body aborted mid-stream");
        err
    });
    *response.body_mut() = Body::from_stream(stream);

    response
}
