use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bytes::Bytes;
use tokio::time::timeout;

use crate::config::Config;
use crate::docproc::{self, ProcessingChain};
use crate::filter::{self, FilterChain};
use crate::handler::{self, Router};
use crate::host::dispatcher::{Delivery, Dispatcher};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

/// Everything assembled from a [`Config`]: the routed request path and the
/// named processing chains. Built once, then shared read-only.
pub struct Container {
    dispatcher: Dispatcher,
    chains: HashMap<String, Arc<ProcessingChain>>,
    request_timeout: Option<Duration>,
}

impl Container {
    /// A container without processing chains around an existing dispatcher.
    pub fn new(dispatcher: Dispatcher, request_timeout: Option<Duration>) -> Self {
        Self {
            dispatcher,
            chains: HashMap::new(),
            request_timeout,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut router = Router::new();
        for route in &config.routes {
            let handler = handler::build(&route.handler)
                .with_context(|| format!("route `{}`", route.prefix))?;
            router = router.route(route.prefix.clone(), handler);
        }

        let filters = config
            .filters
            .iter()
            .enumerate()
            .map(|(index, spec)| filter::builtin::build(spec).with_context(|| format!("filter #{index}")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let filters = FilterChain::new(filters, config.filter_failure_policy);

        let mut chains = HashMap::new();
        for chain in &config.chains {
            let processors = chain
                .processors
                .iter()
                .map(docproc::processors::build)
                .collect::<anyhow::Result<Vec<_>>>()
                .with_context(|| format!("chain `{}`", chain.name))?;

            let built = ProcessingChain::new(chain.name.clone(), processors);
            if chains.insert(chain.name.clone(), Arc::new(built)).is_some() {
                anyhow::bail!("duplicate chain name `{}`", chain.name);
            }
        }

        tracing::info!(
            routes = router.len(),
            filters = filters.len(),
            filter_policy = ?filters.policy(),
            chains = chains.len(),
            "Container assembled"
        );

        Ok(Self {
            dispatcher: Dispatcher::new(Arc::new(router), filters),
            chains,
            request_timeout: config.request_timeout(),
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn chain(&self, name: &str) -> Option<Arc<ProcessingChain>> {
        self.chains.get(name).cloned()
    }

    /// Chain names in sorted order.
    pub fn chain_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Serves a request, bounded by the configured timeout. Failures become a
    /// 500 delivery, an expired timeout a 504.
    pub async fn handle(&self, request: Request, body: Option<Bytes>) -> Delivery {
        let Some(limit) = self.request_timeout else {
            return self.dispatcher.serve_or_error(request, body).await;
        };

        let uri = request.uri().clone();
        match timeout(limit, self.dispatcher.serve_or_error(request, body)).await {
            Ok(delivery) => delivery,
            Err(_) => {
                tracing::warn!(uri = %uri, timeout_ms = limit.as_millis() as u64, "Request timed out");
                let body = Bytes::from_static(b"504 Gateway Timeout");
                let response = Response::new(StatusCode::GATEWAY_TIMEOUT)
                    .with_header("Content-Type", "text/plain")
                    .with_header("Content-Length", body.len().to_string());
                Delivery::new(response, body)
            }
        }
    }
}
