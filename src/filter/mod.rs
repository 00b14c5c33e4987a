//! Response filters
//!
//! A [`FilterChain`] runs once per response, after the handler closed the
//! body channel successfully and before the response is handed to the
//! transport. Filters mutate the response in place; they cannot replace it.
//!
//! There is no timeout around a filter: a filter that never returns stalls
//! its response.

pub mod builtin;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::FilterError;
use crate::http::response::Response;
use crate::http::view::RequestView;

pub use builtin::{AddHeader, ObservedPortHeader, RemoveHeader};

/// Post-processing step over response metadata.
pub trait ResponseFilter: Send + Sync {
    /// Identity used in logs and [`FilterError`].
    fn name(&self) -> &str;

    fn filter(&self, response: &mut Response, request: &RequestView) -> anyhow::Result<()>;
}

/// What a chain does when one of its filters fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFailurePolicy {
    /// Stop at the failing filter and report it; the host answers 500.
    #[default]
    Abort,
    /// Log the failure, record it in the report and run the next filter.
    Skip,
}

/// Result of a chain run that did not abort.
#[derive(Debug, Default)]
pub struct FilterReport {
    /// Names of the filters that completed, in execution order.
    pub applied: Vec<String>,
    /// Failures tolerated under [`FilterFailurePolicy::Skip`].
    pub skipped: Vec<FilterError>,
}

/// Ordered, immutable list of response filters.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn ResponseFilter>>,
    policy: FilterFailurePolicy,
}

impl FilterChain {
    pub fn new(filters: Vec<Arc<dyn ResponseFilter>>, policy: FilterFailurePolicy) -> Self {
        Self { filters, policy }
    }

    pub fn policy(&self) -> FilterFailurePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs every filter in declared order against `response`.
    pub fn apply(&self, response: &mut Response, request: &RequestView) -> Result<FilterReport, FilterError> {
        let mut report = FilterReport::default();

        for (index, filter) in self.filters.iter().enumerate() {
            match filter.filter(response, request) {
                Ok(()) => report.applied.push(filter.name().to_string()),
                Err(cause) => {
                    let err = FilterError {
                        filter: filter.name().to_string(),
                        index,
                        cause,
                    };

                    match self.policy {
                        FilterFailurePolicy::Abort => {
                            tracing::warn!(
                                filter = filter.name(),
                                index,
                                error = %err.cause,
                                uri = %request.uri(),
                                "Response filter failed, aborting response"
                            );
                            return Err(err);
                        }
                        FilterFailurePolicy::Skip => {
                            tracing::warn!(
                                filter = filter.name(),
                                index,
                                error = %err.cause,
                                uri = %request.uri(),
                                "Response filter failed, skipping it"
                            );
                            report.skipped.push(err);
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}
