//! Declared build parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment-variable mapping, ordered by name for stable payloads.
pub type EnvVars = BTreeMap<String, String>;

/// One parameter value declared on a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub name: String,

    /// Marks a non-password value as secret (e.g. a credentials id).
    #[serde(default)]
    pub sensitive: bool,

    #[serde(flatten)]
    pub kind: ParameterKind,
}

/// Parameter value types and what each contributes to the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterKind {
    /// `NAME=value`
    String { value: String },

    /// `NAME=true|false`
    Boolean { value: bool },

    /// Always sensitive.
    Password { value: String },

    /// `NAME=<original file name>`; nothing when no file was uploaded.
    File {
        #[serde(default)]
        file_name: Option<String>,
    },

    /// `NAME=job#number`, `NAME_JOBNAME=job`, `NAME_NUMBER=number`
    Run { job_name: String, number: u64 },
}

impl ParameterValue {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            sensitive: false,
            kind,
        }
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            ParameterKind::String {
                value: value.into(),
            },
        )
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, ParameterKind::Boolean { value })
    }

    pub fn password(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            ParameterKind::Password {
                value: value.into(),
            },
        )
    }

    /// Flag this value as sensitive.
    pub fn redacted(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive || matches!(self.kind, ParameterKind::Password { .. })
    }

    /// Add this value's own variables to `env`.
    pub fn contribute(&self, env: &mut EnvVars) {
        match &self.kind {
            ParameterKind::String { value } | ParameterKind::Password { value } => {
                env.insert(self.name.clone(), value.clone());
            }
            ParameterKind::Boolean { value } => {
                env.insert(self.name.clone(), value.to_string());
            }
            ParameterKind::File { file_name } => {
                if let Some(file_name) = file_name {
                    env.insert(self.name.clone(), file_name.clone());
                }
            }
            ParameterKind::Run { job_name, number } => {
                env.insert(self.name.clone(), format!("{}#{}", job_name, number));
                env.insert(format!("{}_JOBNAME", self.name), job_name.clone());
                env.insert(format!("{}_NUMBER", self.name), number.to_string());
            }
        }
    }
}
