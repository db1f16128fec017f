//! Publication gate: whether a job's events may be published at all.

use crate::config::{GlobalSettings, JobProperty};

/// Per-job and host-wide publication switch.
pub struct PublicationGate;

impl PublicationGate {
    /// Authorized when the job opts in, or when the host enables publishing
    /// for all jobs. Missing configuration on either side counts as "off".
    pub fn is_authorized(job: Option<&JobProperty>, global: Option<&GlobalSettings>) -> bool {
        job.is_some_and(|p| p.enabled) || global.is_some_and(|g| g.enabled_on_all_jobs)
    }
}
