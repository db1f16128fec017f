//! Event payload published for each lifecycle phase.
//!
//! Field names are the wire contract consumers depend on. Optional fields are
//! left out of the JSON entirely when unknown, never written as `null`.

use serde::{Deserialize, Serialize};

use super::parameter::EnvVars;
use super::phase::Phase;

/// A job and the one build the event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    pub name: String,
    pub url: String,
    pub build: BuildState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub number: u64,
    pub url: String,
    pub phase: Phase,
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<EnvVars>,
}
