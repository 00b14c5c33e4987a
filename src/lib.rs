//! Conduit - pluggable request handling and document processing
//!
//! Core library: request handlers streaming responses through content
//! channels, ordered response filters, and document processing chains.

pub mod config;
pub mod docproc;
pub mod error;
pub mod filter;
pub mod handler;
pub mod host;
pub mod http;
