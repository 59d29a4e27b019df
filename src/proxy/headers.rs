//! Header copy policy.
//!
//! # Responsibilities
//! - Copy client headers to the backend request
//! - Copy backend headers to the client response
//!
//! # Design Decisions
//! - Client → backend: everything passes except `Content-Length`, which the
//!   transport derives from the body it actually streams. `Host`,
//!   credentials, cookies and headers added by filters are kept as-is.
//! - Backend → client: the first value of a name replaces whatever the
//!   response already carries; later values of the same name are appended,
//!   so repeated headers such as `Set-Cookie` all reach the client.
//! - Names match case-insensitively; multi-valued headers keep their order.

use std::collections::HashSet;

use axum::http::header::{HeaderMap, HeaderName, CONTENT_LENGTH};

/// Headers for the backend request, derived from the client request.
pub fn to_backend(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name == CONTENT_LENGTH {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}

/// Merge backend response headers into the client response headers.
pub fn merge_from_backend(client: &mut HeaderMap, backend: &HeaderMap) {
    let mut seen: HashSet<&HeaderName> = HashSet::with_capacity(backend.keys_len());
    for (name, value) in backend {
        if seen.insert(name) {
            client.insert(name.clone(), value.clone());
        } else {
            client.append(name.clone(), value.clone());
        }
    }
}
