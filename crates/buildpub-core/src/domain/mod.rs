//! Domain models for buildpub.
//!
//! - `Phase` / `RunResult`: lifecycle tags reported by the host
//! - `JobState` / `BuildState`: the wire payload, built fresh per event
//! - `RunSnapshot`: read-only view of a host run
//! - `ParameterValue`: declared build parameters

pub mod error;
pub mod parameter;
pub mod phase;
pub mod run;
pub mod state;

pub use error::{EnvironmentError, PublisherError, Result};
pub use parameter::{EnvVars, ParameterKind, ParameterValue};
pub use phase::{Phase, RunResult};
pub use run::{EnvironmentRecord, ExecutorRecord, JobRecord, RunRecord, RunSnapshot};
pub use state::{BuildState, JobState};
