//! Request and response metadata.
//!
//! This module holds the shapes exchanged with the external transport layer.
//! Nothing here parses or serializes wire bytes: the transport builds a
//! [`Request`] and consumes a [`Delivery`](crate::host::Delivery).
//!
//! - **`request`**: inbound request (method, URI, headers, observed port)
//! - **`response`**: status code and mutable header map
//! - **`view`**: read-only request projection handed to response filters
//!
//! # Response lifecycle
//!
//! ```text
//!        ┌──────────────────┐
//!        │   Dispatched     │ ← handler calls ResponseDispatch::connect
//!        └──────┬───────────┘
//!               │ body fragments written
//!               ▼
//!        ┌──────────────────┐
//!        │   Streaming      │ ← ContentChannel::write
//!        └──────┬───────────┘
//!               │ close / fail
//!               ├─ fail  → discarded, host answers 500
//!               ▼
//!        ┌──────────────────┐
//!        │   Filtering      │ ← FilterChain::apply mutates headers
//!        └──────┬───────────┘
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │   Delivered      │ ← frozen, handed to the transport
//!        └──────────────────┘
//! ```

pub mod request;
pub mod response;
pub mod view;

pub use request::{Method, Request, RequestBuilder};
pub use response::{Response, StatusCode};
pub use view::RequestView;
