//! buildpub Core Library
//!
//! Turns CI run lifecycle notifications into JSON event payloads and hands
//! them to a pub/sub transport.
//!
//! Pipeline per notification:
//! `LifecycleListener` -> `PhaseController` -> `PublicationGate` ->
//! `PayloadBuilder` (-> `ParameterFilter`) -> `Transport`.

pub mod config;
pub mod controller;
pub mod domain;
pub mod gate;
pub mod listener;
pub mod obs;
pub mod parameters;
pub mod payload;
pub mod telemetry;

pub use config::{host_from_url, GlobalSettings, HostContext, JobProperty, PublisherConfig};
pub use controller::PhaseController;
pub use domain::{
    BuildState, EnvVars, EnvironmentError, EnvironmentRecord, ExecutorRecord, JobRecord,
    JobState, ParameterKind, ParameterValue, Phase, PublisherError, Result, RunRecord, RunResult,
    RunSnapshot,
};
pub use gate::PublicationGate;
pub use listener::{frame, LifecycleListener};
pub use parameters::ParameterFilter;
pub use payload::PayloadBuilder;
pub use telemetry::init_tracing;

pub use buildpub_transport::{Transport, TransportError};

/// buildpub version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
