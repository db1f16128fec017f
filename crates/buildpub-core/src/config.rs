//! Publisher configuration.
//!
//! Two switches decide whether anything is published: a per-job
//! [`JobProperty`] and the host-wide [`GlobalSettings`]. [`HostContext`]
//! carries the host-wide values into each call instead of looking them up
//! from global state. [`PublisherConfig`] is the TOML file the CLI reads.

use buildpub_transport::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::error::{PublisherError, Result};

/// Per-job publisher switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProperty {
    #[serde(default)]
    pub enabled: bool,
}

impl JobProperty {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }
}

/// Host-wide publisher switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default)]
    pub enabled_on_all_jobs: bool,
}

/// Host-wide context passed into every phase report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    /// `None` when the publisher has never been configured on this host.
    pub global: Option<GlobalSettings>,

    /// Absolute root URL of the host, e.g. `https://ci.example/`.
    pub root_url: Option<String>,
}

impl HostContext {
    pub fn new(global: Option<GlobalSettings>, root_url: Option<String>) -> Self {
        Self { global, root_url }
    }

    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = Some(root_url.into());
        self
    }
}

/// Publisher configuration file.
///
/// ```toml
/// enabled_on_all_jobs = true
/// port = 8888
/// root_url = "https://ci.example/"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublisherConfig {
    pub enabled_on_all_jobs: bool,
    pub port: u16,
    pub bind_address: String,
    pub root_url: Option<String>,
    pub host_name: Option<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            enabled_on_all_jobs: false,
            port: DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            root_url: None,
            host_name: None,
        }
    }
}

impl PublisherConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(PublisherError::Config("port must be non-zero".to_string()));
        }
        if self.bind_address.trim().is_empty() {
            return Err(PublisherError::Config(
                "bind_address must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// ZeroMQ endpoint the publisher binds.
    pub fn endpoint(&self) -> String {
        format!("tcp://{}:{}", self.bind_address, self.port)
    }

    pub fn host_context(&self) -> HostContext {
        HostContext::new(
            Some(GlobalSettings {
                enabled_on_all_jobs: self.enabled_on_all_jobs,
            }),
            self.root_url.clone(),
        )
    }

    /// Name reported as `host_name`: the configured one, else the host part
    /// of `root_url`.
    pub fn effective_host_name(&self) -> Option<String> {
        self.host_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| self.root_url.as_deref().and_then(host_from_url))
    }
}

/// Host component of an absolute URL, without port or credentials.
///
/// IPv6 literals are returned without brackets. Unparseable URLs and URLs
/// without a host yield `None`.
pub fn host_from_url(root: &str) -> Option<String> {
    url::Url::parse(root)
        .ok()?
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
}
