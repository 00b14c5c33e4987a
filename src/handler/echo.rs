use std::sync::Arc;

use crate::config::ComponentConfig;
use crate::handler::channel::{ChannelEvent, ContentChannel};
use crate::handler::dispatch::ResponseDispatch;
use crate::handler::{RequestHandler, ResponseHandler};
use crate::http::request::Request;
use crate::http::response::StatusCode;

/// Streams the request body back as the response body.
///
/// The response is opened and written from a spawned task while the host is
/// still feeding the request body, so this handler must be invoked from
/// within a Tokio runtime.
///
/// Config keys: `content_type` (default: copied from the request, if present).
#[derive(Debug, Clone, Default)]
pub struct EchoHandler {
    content_type: Option<String>,
}

impl EchoHandler {
    pub fn new(config: &ComponentConfig) -> Self {
        Self {
            content_type: config.get("content_type").map(str::to_owned),
        }
    }
}

impl RequestHandler for EchoHandler {
    fn handle_request(&self, request: &Request, responder: Arc<dyn ResponseHandler>) -> Option<ContentChannel> {
        let (request_body, mut incoming) = ContentChannel::pair();

        let content_type = self
            .content_type
            .clone()
            .or_else(|| request.header("Content-Type").map(str::to_owned));
        let path = request.path().to_string();

        tokio::spawn(async move {
            let mut dispatch = ResponseDispatch::new_instance(StatusCode::OK);
            if let Some(content_type) = content_type {
                dispatch = dispatch.header("Content-Type", content_type);
            }

            let mut out = match dispatch.connect(responder.as_ref()) {
                Ok(channel) => channel,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path, "Echo handler could not dispatch");
                    return;
                }
            };

            loop {
                let (result, done) = match incoming.next_event().await {
                    ChannelEvent::Data(chunk) => (out.write(chunk), false),
                    ChannelEvent::Close => (out.close(), true),
                    ChannelEvent::Failed(e) => {
                        tracing::debug!(error = %e, path = %path, "Request body failed, failing echo");
                        (out.fail(e), true)
                    }
                };

                if let Err(e) = result {
                    tracing::warn!(error = %e, path = %path, "Echo response channel rejected write");
                    return;
                }
                if done {
                    return;
                }
            }
        });

        Some(request_body)
    }
}

