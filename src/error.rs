//! Error kinds surfaced by the framework.
//!
//! None of these are retried internally; retry policy belongs to whoever
//! invokes the handler, the filter chain or the processing chain.

use thiserror::Error;

/// A write or close was attempted on a content channel that already saw its
/// terminal event, or whose consumer went away (cancelled request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("content channel is closed")]
pub struct ChannelClosedError;

/// A request handler broke the one-response-per-request contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolViolationError {
    #[error("handler returned without dispatching a response")]
    NoResponse,

    #[error("handler dispatched more than one response")]
    MultipleResponses,
}

/// A document processor returned [`Progress::Fail`](crate::docproc::Progress::Fail).
///
/// The document keeps every mutation made before the failure.
#[derive(Debug, Error)]
#[error("processor `{processor}` (index {index}) failed{}", cause_suffix(.cause))]
pub struct ProcessingFailure {
    pub processor: String,
    pub index: usize,
    pub cause: Option<anyhow::Error>,
}

fn cause_suffix(cause: &Option<anyhow::Error>) -> String {
    cause.as_ref().map(|c| format!(": {c:#}")).unwrap_or_default()
}

/// A response filter returned an error while mutating a response.
#[derive(Debug, Error)]
#[error("filter `{filter}` (index {index}) failed: {cause:#}")]
pub struct FilterError {
    pub filter: String,
    pub index: usize,
    pub cause: anyhow::Error,
}

/// Everything that can end a request at the host boundary without a
/// deliverable response.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Protocol(#[from] ProtocolViolationError),

    #[error("response body failed: {0:#}")]
    BodyFailed(anyhow::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),
}
