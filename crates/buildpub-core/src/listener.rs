//! Host-facing lifecycle listener.
//!
//! The host calls `on_started`, `on_completed` and `on_finalized` as a run
//! moves through its lifecycle. Each call reports the matching [`Phase`],
//! frames the payload with the phase's event name and hands it to the
//! transport. Failures are logged and never reach the host: publishing must
//! not affect the build itself.

use buildpub_transport::Transport;

use crate::config::HostContext;
use crate::controller::PhaseController;
use crate::domain::{Phase, RunSnapshot};
use crate::obs::{self, PhaseSpan};

/// Message body sent on the wire: `"<event_name> <json>"`.
///
/// The event name doubles as the ZeroMQ topic, so subscribers can filter
/// with a prefix subscription such as `onFinalized`.
pub fn frame(phase: Phase, payload: &str) -> String {
    format!("{} {}", phase.event_name(), payload)
}

/// Publishes lifecycle events for every run reported by the host.
pub struct LifecycleListener<T: Transport> {
    transport: T,
    host: HostContext,
    host_name: Option<String>,
}

impl<T: Transport> LifecycleListener<T> {
    pub fn new(transport: T, host: HostContext) -> Self {
        Self {
            transport,
            host,
            host_name: None,
        }
    }

    /// Name reported as `host_name` in every payload.
    pub fn with_host_name(mut self, host_name: Option<String>) -> Self {
        self.host_name = host_name;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the transport, e.g. to shut it down.
    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn on_started<R: RunSnapshot + ?Sized>(&self, run: &R) -> bool {
        self.notify(Phase::Started, run)
    }

    pub fn on_completed<R: RunSnapshot + ?Sized>(&self, run: &R) -> bool {
        self.notify(Phase::Completed, run)
    }

    pub fn on_finalized<R: RunSnapshot + ?Sized>(&self, run: &R) -> bool {
        self.notify(Phase::Finished, run)
    }

    /// Report `phase` for `run`. Returns whether a message was accepted by
    /// the transport.
    pub fn notify<R: RunSnapshot + ?Sized>(&self, phase: Phase, run: &R) -> bool {
        let _span = PhaseSpan::enter(run.job_name(), run.number(), phase);
        let status = PhaseController::status_for(phase, run);

        let payload = match PhaseController::report(
            phase,
            run,
            &status,
            self.host_name.as_deref(),
            &self.host,
        ) {
            Ok(Some(payload)) => payload,
            Ok(None) => return false,
            Err(e) => {
                obs::emit_payload_failed(run.job_name(), run.number(), phase, &e);
                return false;
            }
        };

        let message = frame(phase, &payload);
        let bytes = message.len();
        match self.transport.publish(message) {
            Ok(()) => {
                obs::emit_phase_published(run.job_name(), run.number(), phase, bytes);
                true
            }
            Err(e) => {
                obs::emit_transport_failed(run.job_name(), run.number(), phase, &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_prefixes_event_name() {
        assert_eq!(frame(Phase::Started, "{}"), "onStarted {}");
        assert_eq!(frame(Phase::Finished, "{\"a\":1}"), "onFinalized {\"a\":1}");
    }
}
