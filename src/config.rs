//! Configuration
//!
//! Components are described by a [`ComponentSpec`]: a `kind` naming the
//! implementation and an opaque key/value [`ComponentConfig`] injected into
//! its constructor. The core does not validate these records beyond what
//! each component requires.
//!
//! ```yaml
//! routes:
//!   - prefix: /
//!     handler:
//!       kind: fixed_response
//!       config: { response: "Hello", status: 200 }
//! filters:
//!   - kind: add_header
//!     config: { name: X-Served-By, value: conduit }
//! filter_failure_policy: abort
//! chains:
//!   - name: default
//!     processors:
//!       - kind: append_suffix
//!         config: { field: title, suffix: Apple }
//! request_timeout_ms: 5000
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::filter::FilterFailurePolicy;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "CONDUIT_CONFIG";

/// Key/value record handed to a component at construction.
///
/// Scalar YAML values are kept as their string form, so `status: 200` and
/// `status: "200"` read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_yaml::Value>")]
pub struct ComponentConfig(BTreeMap<String, String>);

impl ComponentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn require(&self, key: &str) -> anyhow::Result<&str> {
        self.get(key)
            .with_context(|| format!("missing required config key `{key}`"))
    }
}

impl From<BTreeMap<String, serde_yaml::Value>> for ComponentConfig {
    fn from(raw: BTreeMap<String, serde_yaml::Value>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => String::new(),
                    other => serde_yaml::to_string(&other)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default(),
                };
                (key, value)
            })
            .collect();
        Self(entries)
    }
}

/// A component kind plus its injected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentSpec {
    pub kind: String,
    #[serde(default)]
    pub config: ComponentConfig,
}

impl ComponentSpec {
    pub fn new(kind: impl Into<String>, config: ComponentConfig) -> Self {
        Self {
            kind: kind.into(),
            config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    pub prefix: String,
    pub handler: ComponentSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    #[serde(default)]
    pub processors: Vec<ComponentSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub routes: Vec<RouteConfig>,
    pub filters: Vec<ComponentSpec>,
    pub filter_failure_policy: FilterFailurePolicy,
    pub chains: Vec<ChainConfig>,
    /// Host-level bound on a whole request; unbounded when absent.
    pub request_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes: vec![RouteConfig {
                prefix: "/".to_string(),
                handler: ComponentSpec::new(
                    "fixed_response",
                    ComponentConfig::new().with("response", "Hello from Conduit\n"),
                ),
            }],
            filters: Vec::new(),
            filter_failure_policy: FilterFailurePolicy::default(),
            chains: Vec::new(),
            request_timeout_ms: None,
        }
    }
}

impl Config {
    /// Loads the file named by `CONDUIT_CONFIG`, or the defaults when unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(raw).context("invalid configuration")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
