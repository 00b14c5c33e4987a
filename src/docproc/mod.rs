//! Document processing
//!
//! A [`ProcessingChain`] runs its [`DocumentProcessor`]s strictly in order
//! over one [`Document`], each seeing the mutations of its predecessors.
//! Processors steer the chain with [`Progress`]: continue, skip the rest, or
//! fail. Distinct documents may go through the same chain in parallel.

pub mod chain;
pub mod document;
pub mod processors;

pub use chain::{ChainOutcome, DocumentProcessor, ProcessingChain, Progress};
pub use document::{Document, FieldValue};
pub use processors::{AppendSuffix, RequireField, SetField};
