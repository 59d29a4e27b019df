//! Forwarding error taxonomy.

use std::error::Error as StdError;
use std::io;

use axum::BoxError;
use hyper_util::client::legacy::Error as ClientError;
use thiserror::Error;

/// Reasons a request could not be relayed.
///
/// An unset target is not represented here; see
/// [`Forwarded::NotConfigured`](crate::proxy::Forwarded::NotConfigured).
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The backend base URI joined with the request path is not a usable URI.
    #[error("invalid target URI {uri:?}: {reason}")]
    InvalidTargetUri { uri: String, reason: String },

    /// The backend could not be reached (refused, DNS failure, timeout).
    #[error("backend unreachable: {}", root_cause(.0))]
    BackendUnreachable(#[source] ClientError),

    /// The backend answered with something that is not valid HTTP.
    #[error("backend protocol error: {}", root_cause(.0))]
    BackendProtocol(#[source] ClientError),

    /// Copying request or response bytes failed.
    #[error("streaming I/O error: {0}")]
    StreamingIo(#[source] BoxError),
}

impl ProxyError {
    /// Classify a failure reported by the outbound transport.
    pub fn from_transport(err: ClientError) -> Self {
        if err.is_connect() {
            ProxyError::BackendUnreachable(err)
        } else if caused_by_inbound_body(&err) {
            ProxyError::StreamingIo(Box::new(err))
        } else {
            ProxyError::BackendProtocol(err)
        }
    }

    /// True for a transport timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            ProxyError::BackendUnreachable(e) => sources(e).any(|cause| {
                cause
                    .downcast_ref::<io::Error>()
                    .is_some_and(|io| io.kind() == io::ErrorKind::TimedOut)
            }),
            _ => false,
        }
    }

    /// Short machine-readable kind for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::InvalidTargetUri { .. } => "invalid_target_uri",
            ProxyError::BackendUnreachable(_) => "backend_unreachable",
            ProxyError::BackendProtocol(_) => "backend_protocol_error",
            ProxyError::StreamingIo(_) => "streaming_io_error",
        }
    }
}

fn sources(err: &ClientError) -> impl Iterator<Item = &(dyn StdError + 'static)> {
    std::iter::successors(err.source(), |&cause| cause.source())
}

// The client's own message only names the failure class ("Connect",
// "SendRequest"); the innermost cause says what actually went wrong.
fn root_cause(err: &ClientError) -> String {
    match sources(err).last() {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    }
}

// The inbound body stream yields `axum::Error`; when reading it fails the
// client reports the failure with that error somewhere in its source chain.
fn caused_by_inbound_body(err: &ClientError) -> bool {
    sources(err).any(|cause| cause.is::<axum::Error>())
}
