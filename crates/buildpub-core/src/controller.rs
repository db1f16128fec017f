//! Phase controller: one publication attempt per lifecycle event.

use crate::config::HostContext;
use crate::domain::{Phase, Result, RunSnapshot};
use crate::gate::PublicationGate;
use crate::obs;
use crate::payload::PayloadBuilder;

/// Drives a single phase report.
pub struct PhaseController;

impl PhaseController {
    /// Build and serialize the payload for `run` at `phase`.
    ///
    /// Returns `Ok(None)` when publication is not enabled for the job or the
    /// host; that is a normal outcome, not an error. The returned string is
    /// the message body for the transport. Nothing here retries or waits on
    /// delivery.
    pub fn report<R: RunSnapshot + ?Sized>(
        phase: Phase,
        run: &R,
        status: &str,
        host_name: Option<&str>,
        host: &HostContext,
    ) -> Result<Option<String>> {
        if !PublicationGate::is_authorized(run.job_property(), host.global.as_ref()) {
            obs::emit_phase_suppressed(run.job_name(), run.number(), phase);
            return Ok(None);
        }

        let state = PayloadBuilder::build(run, phase, status, host_name, host);
        let payload = serde_json::to_string(&state)?;
        Ok(Some(payload))
    }

    /// Status string reported for `phase`: empty for `Started`, otherwise the
    /// run's result name, or empty while the host has not assigned one.
    pub fn status_for<R: RunSnapshot + ?Sized>(phase: Phase, run: &R) -> String {
        match phase {
            Phase::Started => String::new(),
            Phase::Completed | Phase::Finished => run
                .result()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}
