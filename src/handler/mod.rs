//! Request handlers
//!
//! A [`RequestHandler`] receives each request together with a
//! [`ResponseHandler`] capability. It must dispatch exactly one response
//! through that capability, write the body into the returned
//! [`ContentChannel`] and close it, either before returning or later from
//! another task.

pub mod channel;
pub mod dispatch;
pub mod echo;
pub mod fixed;
pub mod router;

use std::sync::Arc;

use crate::config::ComponentSpec;
use crate::error::ProtocolViolationError;
use crate::http::request::Request;
use crate::http::response::Response;

pub use channel::{BodyReceiver, ChannelEvent, ContentChannel};
pub use dispatch::ResponseDispatch;
pub use echo::EchoHandler;
pub use fixed::FixedResponseHandler;
pub use router::Router;

/// Receives the single response of a request and returns the channel its
/// body is written to.
pub trait ResponseHandler: Send + Sync {
    /// Fails with [`ProtocolViolationError::MultipleResponses`] on any call
    /// after the first; the first response is unaffected.
    fn handle_response(&self, response: Response) -> Result<ContentChannel, ProtocolViolationError>;
}

/// Entry point for a request.
///
/// Implementations are shared across tasks and must not keep per-request
/// state in `self`.
pub trait RequestHandler: Send + Sync {
    /// Returns a channel to receive the request body, or `None` if the body
    /// is ignored.
    fn handle_request(&self, request: &Request, responder: Arc<dyn ResponseHandler>) -> Option<ContentChannel>;
}

/// Builds a handler from its configured kind.
pub fn build(spec: &ComponentSpec) -> anyhow::Result<Arc<dyn RequestHandler>> {
    match spec.kind.as_str() {
        "fixed_response" => Ok(Arc::new(FixedResponseHandler::new(&spec.config)?)),
        "echo" => Ok(Arc::new(EchoHandler::new(&spec.config))),
        other => anyhow::bail!("unknown handler kind `{other}`"),
    }
}
