//! Parameter filter: effective, non-sensitive build parameters of a run.

use crate::domain::{EnvVars, ParameterValue, RunSnapshot};
use crate::obs;

/// Resolves declared parameters to the values published in the payload.
pub struct ParameterFilter;

impl ParameterFilter {
    /// Resolve `parameters` against an optional environment snapshot.
    ///
    /// Sensitive values are dropped unconditionally. A value the environment
    /// already holds wins over the parameter's own contribution, since it
    /// reflects any expansion the host performed.
    pub fn resolve(parameters: &[ParameterValue], env: Option<&EnvVars>) -> EnvVars {
        let mut resolved = EnvVars::new();

        for value in parameters {
            if value.is_sensitive() {
                continue;
            }
            match env.and_then(|env| env.get(&value.name)) {
                Some(expanded) => {
                    resolved.insert(value.name.clone(), expanded.clone());
                }
                None => value.contribute(&mut resolved),
            }
        }

        resolved
    }

    /// Parameters to publish for `run`, or `None` when the run declares no
    /// parameters or its type does not contribute environment variables.
    ///
    /// Environment lookup is best-effort: a failed lookup is logged and the
    /// parameters contribute their own values instead.
    pub fn resolve_for<R: RunSnapshot + ?Sized>(run: &R) -> Option<EnvVars> {
        let parameters = run.parameters()?;
        if !run.supports_environment() {
            return None;
        }

        let env = match run.environment() {
            Ok(env) => Some(env),
            Err(e) => {
                obs::emit_environment_unavailable(run.job_name(), run.number(), &e);
                None
            }
        };

        Some(Self::resolve(parameters, env.as_ref()))
    }
}
