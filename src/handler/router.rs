use std::sync::Arc;

use crate::handler::channel::ContentChannel;
use crate::handler::dispatch::ResponseDispatch;
use crate::handler::{RequestHandler, ResponseHandler};
use crate::http::request::Request;
use crate::http::response::StatusCode;

/// Routes requests to handlers by longest matching path prefix.
///
/// A prefix matches whole path segments only: `/search` matches `/search`
/// and `/search/x` but not `/searching`. Unmatched requests get a 404.
#[derive(Default)]
pub struct Router {
    routes: Vec<(String, Arc<dyn RequestHandler>)>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, prefix: impl Into<String>, handler: Arc<dyn RequestHandler>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/').to_string();
        self.routes.push((prefix, handler));
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the handler bound to the longest prefix matching `path`.
    pub fn resolve(&self, path: &str) -> Option<&Arc<dyn RequestHandler>> {
        self.routes
            .iter()
            .filter(|(prefix, _)| prefix_matches(prefix, path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, handler)| handler)
    }
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    // "" is the root route
    match path.strip_prefix(prefix) {
        Some(rest) => prefix.is_empty() || rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl RequestHandler for Router {
    fn handle_request(&self, request: &Request, responder: Arc<dyn ResponseHandler>) -> Option<ContentChannel> {
        match self.resolve(request.path()) {
            Some(handler) => {
                tracing::debug!(method = %request.method(), path = %request.path(), "Routing request");
                handler.handle_request(request, responder)
            }
            None => {
                tracing::debug!(method = %request.method(), path = %request.path(), "No route");
                let result = ResponseDispatch::new_instance(StatusCode::NOT_FOUND)
                    .header("Content-Type", "text/plain")
                    .dispatch(responder.as_ref(), "404 Not Found");
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Failed to dispatch not-found response");
                }
                None
            }
        }
    }
}
