//! Drives a single request through handler, body channel and filters.

use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use tokio::sync::oneshot;

use crate::error::{ProtocolViolationError, ServeError};
use crate::filter::FilterChain;
use crate::handler::channel::{BodyReceiver, ContentChannel};
use crate::handler::{RequestHandler, ResponseHandler};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::view::RequestView;

/// A filtered, complete response ready for the transport.
///
/// Only shared access is offered: once delivered, a response is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    response: Response,
    body: Bytes,
}

impl Delivery {
    pub fn new(response: Response, body: Bytes) -> Self {
        Self { response, body }
    }

    /// 500 delivery used when a request ends in a [`ServeError`].
    pub fn internal_error() -> Self {
        let body = Bytes::from_static(b"500 Internal Server Error");
        let response = Response::internal_error().with_header("Content-Length", body.len().to_string());
        Self { response, body }
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Host-side [`ResponseHandler`]: accepts the first response of a request and
/// rejects every later one.
struct ResponseSlot {
    pending: Mutex<Option<oneshot::Sender<(Response, BodyReceiver)>>>,
    path: String,
}

impl ResponseHandler for ResponseSlot {
    fn handle_response(&self, response: Response) -> Result<ContentChannel, ProtocolViolationError> {
        let sender = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(sender) = sender else {
            tracing::warn!(
                path = %self.path,
                status = response.status().as_u16(),
                "Handler dispatched a second response"
            );
            return Err(ProtocolViolationError::MultipleResponses);
        };

        let (channel, body) = ContentChannel::pair();
        if sender.send((response, body)).is_err() {
            tracing::debug!(path = %self.path, "Caller stopped waiting for the response");
        }
        Ok(channel)
    }
}

/// Runs requests against one handler and one filter chain.
///
/// Cheap to clone; all clones share the same immutable configuration and may
/// serve requests concurrently.
#[derive(Clone)]
pub struct Dispatcher {
    handler: Arc<dyn RequestHandler>,
    filters: Arc<FilterChain>,
}

impl Dispatcher {
    pub fn new(handler: Arc<dyn RequestHandler>, filters: FilterChain) -> Self {
        Self {
            handler,
            filters: Arc::new(filters),
        }
    }

    /// Serves one request.
    ///
    /// The handler is called, the request body (if any, and if the handler
    /// asked for it) is written and closed, then the response is awaited,
    /// its body collected, and the filter chain applied. A handler may finish
    /// the response from another task; no timeout is applied here.
    pub async fn serve(&self, request: Request, body: Option<Bytes>) -> Result<Delivery, ServeError> {
        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(ResponseSlot {
            pending: Mutex::new(Some(tx)),
            path: request.path().to_string(),
        });

        tracing::debug!(method = %request.method(), uri = %request.uri(), "Handling request");

        if let Some(mut request_body) = self.handler.handle_request(&request, slot) {
            let fed = match body {
                Some(bytes) => request_body.write(bytes),
                None => Ok(()),
            }
            .and_then(|()| request_body.close());

            if fed.is_err() {
                tracing::debug!(uri = %request.uri(), "Handler stopped reading the request body");
            }
        }

        let (mut response, receiver) = rx.await.map_err(|_| {
            tracing::error!(uri = %request.uri(), "Handler never dispatched a response");
            ProtocolViolationError::NoResponse
        })?;

        let body = receiver.collect().await.map_err(|e| {
            tracing::warn!(uri = %request.uri(), error = %e, "Response body failed");
            ServeError::BodyFailed(e)
        })?;

        response.set_header_if_absent("Content-Length", body.len().to_string());

        let view = RequestView::from(&request);
        let report = self.filters.apply(&mut response, &view)?;

        tracing::info!(
            method = %request.method(),
            uri = %request.uri(),
            status = response.status().as_u16(),
            bytes = body.len(),
            filters = report.applied.len(),
            skipped_filters = report.skipped.len(),
            "Response delivered"
        );

        Ok(Delivery::new(response, body))
    }

    /// Like [`serve`](Self::serve), mapping any failure to a 500 delivery.
    pub async fn serve_or_error(&self, request: Request, body: Option<Bytes>) -> Delivery {
        let uri = request.uri().clone();
        match self.serve(request, body).await {
            Ok(delivery) => delivery,
            Err(e) => {
                tracing::error!(uri = %uri, error = %e, "Request failed, answering 500");
                Delivery::internal_error()
            }
        }
    }
}
