//! Structured observability hooks for phase publication.
//!
//! Events carry an `event = "..."` field so log pipelines can filter on it.
//! Level is controlled by `RUST_LOG`; see [`crate::telemetry`].

use tracing::{debug, info, warn};

use crate::domain::Phase;

/// RAII guard that enters a span tagged with the job and run number.
pub struct PhaseSpan {
    _span: tracing::span::EnteredSpan,
}

impl PhaseSpan {
    pub fn enter(job: &str, number: u64, phase: Phase) -> Self {
        let span =
            tracing::info_span!("buildpub.phase", job = %job, number = number, phase = %phase);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: message handed to the transport.
pub fn emit_phase_published(job: &str, number: u64, phase: Phase, bytes: usize) {
    info!(
        event = "phase.published",
        job = %job,
        number = number,
        phase = %phase,
        bytes = bytes,
    );
}

/// Emit event: publication not enabled for this job.
pub fn emit_phase_suppressed(job: &str, number: u64, phase: Phase) {
    debug!(event = "phase.suppressed", job = %job, number = number, phase = %phase);
}

/// Emit event: run environment could not be resolved; parameters fall back.
pub fn emit_environment_unavailable(job: &str, number: u64, error: &dyn std::fmt::Display) {
    debug!(
        event = "environment.unavailable",
        job = %job,
        number = number,
        error = %error,
    );
}

/// Emit event: payload could not be built or serialized (warning level).
pub fn emit_payload_failed(job: &str, number: u64, phase: Phase, error: &dyn std::fmt::Display) {
    warn!(
        event = "phase.payload_failed",
        job = %job,
        number = number,
        phase = %phase,
        error = %error,
    );
}

/// Emit event: transport rejected the message (warning level).
pub fn emit_transport_failed(job: &str, number: u64, phase: Phase, error: &dyn std::fmt::Display) {
    warn!(
        event = "phase.transport_failed",
        job = %job,
        number = number,
        phase = %phase,
        error = %error,
    );
}
