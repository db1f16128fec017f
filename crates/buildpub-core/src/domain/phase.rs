//! Lifecycle phases and run results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase of a run, in order of occurrence.
///
/// `Completed` may be skipped for some outcomes, but a run never reports an
/// earlier phase after a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Started,
    Completed,
    Finished,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Started, Phase::Completed, Phase::Finished];

    /// Wire name, as it appears in the `phase` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Started => "STARTED",
            Phase::Completed => "COMPLETED",
            Phase::Finished => "FINISHED",
        }
    }

    /// Host listener event that reports this phase. Used as the message topic.
    pub fn event_name(&self) -> &'static str {
        match self {
            Phase::Started => "onStarted",
            Phase::Completed => "onCompleted",
            Phase::Finished => "onFinalized",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STARTED" => Ok(Phase::Started),
            "COMPLETED" => Ok(Phase::Completed),
            "FINISHED" | "FINALIZED" => Ok(Phase::Finished),
            other => Err(format!(
                "unknown phase '{}' (expected started, completed or finished)",
                other.to_ascii_lowercase()
            )),
        }
    }
}

/// Outcome the host assigned to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
}

impl RunResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunResult::Success => "SUCCESS",
            RunResult::Unstable => "UNSTABLE",
            RunResult::Failure => "FAILURE",
            RunResult::NotBuilt => "NOT_BUILT",
            RunResult::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
