//! Stock response filters and the factory building them from configuration.

use std::sync::Arc;

use anyhow::Context;

use crate::config::ComponentSpec;
use crate::filter::ResponseFilter;
use crate::http::response::Response;
use crate::http::view::RequestView;

/// Header set by [`ObservedPortHeader`].
pub const OBSERVED_PORT_HEADER: &str = "Response-Filter-Observed-Port";

/// Sets a header, overwriting any previous value.
#[derive(Debug, Clone)]
pub struct AddHeader {
    name: String,
    value: String,
}

impl AddHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl ResponseFilter for AddHeader {
    fn name(&self) -> &str {
        "add_header"
    }

    fn filter(&self, response: &mut Response, _request: &RequestView) -> anyhow::Result<()> {
        response.set_header(self.name.clone(), self.value.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RemoveHeader {
    name: String,
}

impl RemoveHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ResponseFilter for RemoveHeader {
    fn name(&self) -> &str {
        "remove_header"
    }

    fn filter(&self, response: &mut Response, _request: &RequestView) -> anyhow::Result<()> {
        response.remove_header(&self.name);
        Ok(())
    }
}

/// Reports the port the request was observed on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservedPortHeader;

impl ResponseFilter for ObservedPortHeader {
    fn name(&self) -> &str {
        "observed_port"
    }

    fn filter(&self, response: &mut Response, request: &RequestView) -> anyhow::Result<()> {
        let port = request
            .port()
            .with_context(|| format!("no port known for `{}`", request.uri()))?;
        response.set_header(OBSERVED_PORT_HEADER, port.to_string());
        Ok(())
    }
}

/// Builds a filter from its configured kind.
pub fn build(spec: &ComponentSpec) -> anyhow::Result<Arc<dyn ResponseFilter>> {
    let config = &spec.config;
    let filter: Arc<dyn ResponseFilter> = match spec.kind.as_str() {
        "add_header" => Arc::new(AddHeader::new(config.require("name")?, config.require("value")?)),
        "remove_header" => Arc::new(RemoveHeader::new(config.require("name")?)),
        "observed_port" => Arc::new(ObservedPortHeader),
        other => anyhow::bail!("unknown filter kind `{other}`"),
    };
    Ok(filter)
}
