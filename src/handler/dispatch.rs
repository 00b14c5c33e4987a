use bytes::Bytes;

use crate::error::ProtocolViolationError;
use crate::handler::ResponseHandler;
use crate::handler::channel::ContentChannel;
use crate::http::response::{Response, StatusCode};

/// Builds a response and connects it to a [`ResponseHandler`].
///
/// # Example
///
/// ```ignore
/// let mut channel = ResponseDispatch::new_instance(StatusCode::OK)
///     .header("Content-Type", "text/plain")
///     .connect(responder.as_ref())?;
/// channel.write("ok")?;
/// channel.close()?;
/// ```
#[derive(Debug, Clone)]
pub struct ResponseDispatch {
    response: Response,
}

impl ResponseDispatch {
    pub fn new_instance(status: StatusCode) -> Self {
        Self {
            response: Response::new(status),
        }
    }

    /// Adds or replaces a header on the pending response.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.response.set_header(key, value);
        self
    }

    /// Hands the response to `handler` and returns the channel for its body.
    ///
    /// Fails if `handler` already received a response for this request.
    pub fn connect(self, handler: &dyn ResponseHandler) -> Result<ContentChannel, ProtocolViolationError> {
        handler.handle_response(self.response)
    }

    /// Connects, writes `body` as a single fragment and closes.
    pub fn dispatch(self, handler: &dyn ResponseHandler, body: impl Into<Bytes>) -> anyhow::Result<()> {
        let mut channel = self.connect(handler)?;
        channel.write(body)?;
        channel.close()?;
        Ok(())
    }
}
