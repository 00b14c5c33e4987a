//! Host boundary
//!
//! The pieces a transport talks to: [`Dispatcher`] runs one request end to
//! end, [`Container`] assembles dispatcher and processing chains from
//! configuration and applies the optional request timeout.

pub mod container;
pub mod dispatcher;

pub use container::Container;
pub use dispatcher::{Delivery, Dispatcher};
