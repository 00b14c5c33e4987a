use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;

use crate::config::ComponentConfig;
use crate::handler::channel::ContentChannel;
use crate::handler::dispatch::ResponseDispatch;
use crate::handler::{RequestHandler, ResponseHandler};
use crate::http::request::Request;
use crate::http::response::StatusCode;

/// Answers every request with the configured body, synchronously.
///
/// Config keys: `response` (required), `status` (default `200`),
/// `content_type` (optional).
#[derive(Debug, Clone)]
pub struct FixedResponseHandler {
    status: StatusCode,
    body: Bytes,
    content_type: Option<String>,
}

impl FixedResponseHandler {
    pub fn new(config: &ComponentConfig) -> anyhow::Result<Self> {
        let body = config.require("response")?.to_string();

        let status = match config.get("status") {
            Some(raw) => {
                let code: u16 = raw
                    .parse()
                    .with_context(|| format!("invalid status `{raw}`"))?;
                StatusCode::from_u16(code).with_context(|| format!("status {code} out of range"))?
            }
            None => StatusCode::OK,
        };

        tracing::info!(status = status.as_u16(), response = %body, "Fixed response handler configured");

        Ok(Self {
            status,
            body: Bytes::from(body),
            content_type: config.get("content_type").map(str::to_owned),
        })
    }
}

impl RequestHandler for FixedResponseHandler {
    fn handle_request(&self, request: &Request, responder: Arc<dyn ResponseHandler>) -> Option<ContentChannel> {
        let mut dispatch = ResponseDispatch::new_instance(self.status);
        if let Some(content_type) = &self.content_type {
            dispatch = dispatch.header("Content-Type", content_type.clone());
        }

        if let Err(e) = dispatch.dispatch(responder.as_ref(), self.body.clone()) {
            tracing::warn!(error = %e, path = %request.path(), "Failed to dispatch fixed response");
        }

        None
    }
}
