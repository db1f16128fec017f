//! Payload builder: assembles the `JobState` published for one phase.

use crate::config::HostContext;
use crate::domain::{BuildState, JobState, Phase, RunSnapshot};
use crate::parameters::ParameterFilter;

pub struct PayloadBuilder;

impl PayloadBuilder {
    /// Build the payload for `run` at `phase`.
    ///
    /// Context that is not available right now (root URL, host name, live
    /// executor, parameters) is left unset rather than filled in. `full_url`
    /// is the root URL and the run URL concatenated as-is; consumers rely on
    /// that exact form, so slashes are not normalized.
    pub fn build<R: RunSnapshot + ?Sized>(
        run: &R,
        phase: Phase,
        status: &str,
        host_name: Option<&str>,
        host: &HostContext,
    ) -> JobState {
        let build = BuildState {
            number: run.number(),
            url: run.url().to_string(),
            phase,
            status: status.to_string(),
            full_url: host
                .root_url
                .as_deref()
                .map(|root| format!("{}{}", root, run.url())),
            host_name: host_name.map(str::to_string),
            node_name: run.node_name().map(str::to_string),
            parameters: ParameterFilter::resolve_for(run),
        };

        JobState {
            name: run.job_name().to_string(),
            url: run.job_url().to_string(),
            build,
        }
    }
}
