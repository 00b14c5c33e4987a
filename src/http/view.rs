use url::Url;

use crate::http::request::{Method, Request};

/// Read-only projection of a request, handed to response filters.
///
/// Filters run after the handler is done with the original request, so they
/// get their own copy of the metadata they may need rather than the request
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestView {
    method: Method,
    uri: Url,
    local_port: Option<u16>,
}

impl RequestView {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Observed connection port: the transport-reported local port, falling
    /// back to the URI port (or the scheme default).
    pub fn port(&self) -> Option<u16> {
        self.local_port.or_else(|| self.uri.port_or_known_default())
    }
}

impl From<&Request> for RequestView {
    fn from(request: &Request) -> Self {
        Self {
            method: request.method(),
            uri: request.uri().clone(),
            local_port: request.local_port(),
        }
    }
}
