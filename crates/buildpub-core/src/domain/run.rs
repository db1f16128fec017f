//! Read-only view of a host run.
//!
//! The host owns its job/run model; buildpub only reads through
//! [`RunSnapshot`]. [`RunRecord`] is a plain-data implementation used by the
//! CLI (deserialized from JSON) and by tests.

use serde::{Deserialize, Serialize};

use super::error::EnvironmentError;
use super::parameter::{EnvVars, ParameterValue};
use super::phase::RunResult;
use crate::config::JobProperty;

/// What the publisher needs to know about a run at event time.
pub trait RunSnapshot {
    fn job_name(&self) -> &str;

    /// Job URL relative to the host root.
    fn job_url(&self) -> &str;

    /// Per-job publisher configuration, if the job carries one.
    fn job_property(&self) -> Option<&JobProperty>;

    /// Run ordinal within its job, starting at 1.
    fn number(&self) -> u64;

    /// Run URL relative to the host root.
    fn url(&self) -> &str;

    /// Agent of the executor currently running this build, if any.
    fn node_name(&self) -> Option<&str>;

    fn result(&self) -> Option<RunResult>;

    /// Declared parameters. `None` when the run has no parameters action.
    fn parameters(&self) -> Option<&[ParameterValue]>;

    /// Whether this run type contributes environment variables at all.
    fn supports_environment(&self) -> bool;

    /// Resolve the run's environment. May fail transiently.
    fn environment(&self) -> Result<EnvVars, EnvironmentError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub property: Option<JobProperty>,
}

/// An executor slot; `node_name` is `None` once its agent has gone away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorRecord {
    #[serde(default)]
    pub node_name: Option<String>,
}

/// Outcome of the host's environment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnvironmentRecord {
    Resolved {
        #[serde(default)]
        vars: EnvVars,
    },
    Interrupted,
    Failed {
        message: String,
    },
}

impl Default for EnvironmentRecord {
    fn default() -> Self {
        EnvironmentRecord::Resolved {
            vars: EnvVars::new(),
        }
    }
}

/// Plain-data run snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub job: JobRecord,
    pub number: u64,
    pub url: String,
    #[serde(default)]
    pub executor: Option<ExecutorRecord>,
    #[serde(default)]
    pub result: Option<RunResult>,
    #[serde(default)]
    pub parameters: Option<Vec<ParameterValue>>,
    #[serde(default = "default_supports_environment")]
    pub supports_environment: bool,
    #[serde(default)]
    pub environment: EnvironmentRecord,
}

fn default_supports_environment() -> bool {
    true
}

impl RunRecord {
    /// A run of `job_name` with host-style relative URLs and nothing else set.
    pub fn new(job_name: impl Into<String>, number: u64) -> Self {
        let name = job_name.into();
        let job_url = format!("job/{}/", name);
        Self {
            url: format!("{}{}/", job_url, number),
            job: JobRecord {
                name,
                url: job_url,
                property: None,
            },
            number,
            executor: None,
            result: None,
            parameters: None,
            supports_environment: true,
            environment: EnvironmentRecord::default(),
        }
    }

    pub fn with_urls(mut self, job_url: impl Into<String>, url: impl Into<String>) -> Self {
        self.job.url = job_url.into();
        self.url = url.into();
        self
    }

    pub fn with_property(mut self, property: JobProperty) -> Self {
        self.job.property = Some(property);
        self
    }

    pub fn with_node(mut self, node_name: impl Into<String>) -> Self {
        self.executor = Some(ExecutorRecord {
            node_name: Some(node_name.into()),
        });
        self
    }

    pub fn with_result(mut self, result: RunResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterValue>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentRecord) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self.environment {
            EnvironmentRecord::Resolved { vars } => {
                vars.insert(name.into(), value.into());
            }
            other => {
                let mut vars = EnvVars::new();
                vars.insert(name.into(), value.into());
                *other = EnvironmentRecord::Resolved { vars };
            }
        }
        self
    }

    /// Mark the run as a type that does not contribute environment variables.
    pub fn without_environment_support(mut self) -> Self {
        self.supports_environment = false;
        self
    }
}

impl RunSnapshot for RunRecord {
    fn job_name(&self) -> &str {
        &self.job.name
    }

    fn job_url(&self) -> &str {
        &self.job.url
    }

    fn job_property(&self) -> Option<&JobProperty> {
        self.job.property.as_ref()
    }

    fn number(&self) -> u64 {
        self.number
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn node_name(&self) -> Option<&str> {
        self.executor.as_ref()?.node_name.as_deref()
    }

    fn result(&self) -> Option<RunResult> {
        self.result
    }

    fn parameters(&self) -> Option<&[ParameterValue]> {
        self.parameters.as_deref()
    }

    fn supports_environment(&self) -> bool {
        self.supports_environment
    }

    fn environment(&self) -> Result<EnvVars, EnvironmentError> {
        match &self.environment {
            EnvironmentRecord::Resolved { vars } => Ok(vars.clone()),
            EnvironmentRecord::Interrupted => Err(EnvironmentError::Interrupted),
            EnvironmentRecord::Failed { message } => Err(EnvironmentError::Io(
                std::io::Error::new(std::io::ErrorKind::Other, message.clone()),
            )),
        }
    }
}
