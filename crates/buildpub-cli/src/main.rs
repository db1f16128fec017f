//! buildpub - CI lifecycle event publisher
//!
//! ## Commands
//!
//! - `render`: print the payload one lifecycle event would publish
//! - `serve`: bind a ZeroMQ publisher and publish notifications read as
//!   newline-delimited JSON (`{"phase":"STARTED","run":{...}}`)

use anyhow::{Context, Result};
use buildpub_core::{LifecycleListener, Phase, PhaseController, PublisherConfig, RunRecord};
use buildpub_transport::ZmqPublisher;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "buildpub")]
#[command(author = "Stevedores Org")]
#[command(version = buildpub_core::VERSION)]
#[command(about = "Publish CI lifecycle events over ZeroMQ", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Publisher configuration file (TOML)
    #[arg(short, long, global = true, env = "BUILDPUB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the payload published for one run and phase
    Render {
        /// Run snapshot (JSON)
        #[arg(short, long)]
        run: PathBuf,

        /// Lifecycle phase: started, completed or finished
        #[arg(short, long)]
        phase: Phase,

        /// Status to report (derived from the run's result if omitted)
        #[arg(short, long)]
        status: Option<String>,

        /// Host name to report (defaults to the configured one)
        #[arg(long)]
        host_name: Option<String>,

        /// Host root URL, overriding the configuration
        #[arg(long)]
        root_url: Option<String>,

        /// Publish for every job regardless of per-job settings
        #[arg(long)]
        all_jobs: bool,
    },

    /// Publish lifecycle notifications read from stdin or a file
    Serve {
        /// Port to bind, overriding the configuration
        #[arg(short, long, env = "BUILDPUB_PORT")]
        port: Option<u16>,

        /// Read notifications from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// One lifecycle notification on the `serve` input stream.
#[derive(Debug, Deserialize)]
struct Notification {
    phase: Phase,
    run: RunRecord,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    buildpub_core::init_tracing(cli.json, level);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            run,
            phase,
            status,
            host_name,
            root_url,
            all_jobs,
        } => cmd_render(
            config,
            &run,
            phase,
            status.as_deref(),
            host_name,
            root_url,
            all_jobs,
        ),
        Commands::Serve { port, input } => cmd_serve(config, port, input.as_deref()).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<PublisherConfig> {
    match path {
        Some(path) => PublisherConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(PublisherConfig::default()),
    }
}

fn read_run(path: &Path) -> Result<RunRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read run snapshot {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid run snapshot {}", path.display()))
}

fn cmd_render(
    mut config: PublisherConfig,
    run_path: &Path,
    phase: Phase,
    status: Option<&str>,
    host_name: Option<String>,
    root_url: Option<String>,
    all_jobs: bool,
) -> Result<()> {
    if root_url.is_some() {
        config.root_url = root_url;
    }
    if all_jobs {
        config.enabled_on_all_jobs = true;
    }

    let run = read_run(run_path)?;
    match render_payload(&config, &run, phase, status, host_name)? {
        Some(payload) => println!("{}", payload),
        None => info!(job = %run.job.name, "Publication not enabled for this job"),
    }
    Ok(())
}

fn render_payload(
    config: &PublisherConfig,
    run: &RunRecord,
    phase: Phase,
    status: Option<&str>,
    host_name: Option<String>,
) -> Result<Option<String>> {
    let status = match status {
        Some(status) => status.to_string(),
        None => PhaseController::status_for(phase, run),
    };
    let host_name = host_name.or_else(|| config.effective_host_name());

    let payload = PhaseController::report(
        phase,
        run,
        &status,
        host_name.as_deref(),
        &config.host_context(),
    )?;
    Ok(payload)
}

async fn cmd_serve(
    mut config: PublisherConfig,
    port: Option<u16>,
    input: Option<&Path>,
) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }

    let endpoint = config.endpoint();
    let publisher = ZmqPublisher::bind(&endpoint)
        .await
        .with_context(|| format!("Failed to bind publisher at {}", endpoint))?;
    println!("Publishing lifecycle events on {}", publisher.endpoint());

    let listener = LifecycleListener::new(publisher, config.host_context())
        .with_host_name(config.effective_host_name());

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match input {
        Some(path) => Box::new(BufReader::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mut lines = reader.lines();
    let mut published = 0u64;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read notification")? {
                    Some(line) => {
                        if handle_line(&listener, &line) {
                            published += 1;
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    info!(published = published, "Input closed, draining publisher");
    listener.into_transport().shutdown().await;
    Ok(())
}

/// Publish one notification line. Malformed lines are logged and skipped.
fn handle_line<T>(listener: &LifecycleListener<T>, line: &str) -> bool
where
    T: buildpub_core::Transport,
{
    let line = line.trim();
    if line.is_empty() {
        return false;
    }

    match serde_json::from_str::<Notification>(line) {
        Ok(notification) => listener.notify(notification.phase, &notification.run),
        Err(e) => {
            warn!(error = %e, "Skipping malformed notification");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildpub_core::{HostContext, JobProperty};
    use buildpub_transport::fakes::MemoryTransport;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "buildpub",
            "render",
            "--run",
            "run.json",
            "--phase",
            "finished",
            "--all-jobs",
        ])
        .expect("parse failed");

        match cli.command {
            Commands::Render {
                phase, all_jobs, ..
            } => {
                assert_eq!(phase, Phase::Finished);
                assert!(all_jobs);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_cli_reports_library_version() {
        use clap::CommandFactory;

        let command = Cli::command();
        assert_eq!(command.get_version(), Some(buildpub_core::VERSION));
    }

    #[test]
    fn test_cli_rejects_unknown_phase() {
        let result = Cli::try_parse_from([
            "buildpub", "render", "--run", "run.json", "--phase", "queued",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_payload_derives_status_and_host() {
        let config = PublisherConfig {
            enabled_on_all_jobs: true,
            root_url: Some("https://ci.example/".to_string()),
            ..Default::default()
        };
        let run = RunRecord::new("demo", 3).with_result(buildpub_core::RunResult::Aborted);

        let payload = render_payload(&config, &run, Phase::Finished, None, None)
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["build"]["status"], "ABORTED");
        assert_eq!(value["build"]["host_name"], "ci.example");
        assert_eq!(value["build"]["full_url"], "https://ci.example/job/demo/3/");
    }

    #[test]
    fn test_render_payload_disabled() {
        let run = RunRecord::new("demo", 3);
        let payload =
            render_payload(&PublisherConfig::default(), &run, Phase::Started, None, None).unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn test_read_run_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"job":{"name":"demo","url":"job/demo/","property":{"enabled":true}},
                "number":4,"url":"job/demo/4/","executor":{"node_name":"worker-1"}}"#,
        )
        .unwrap();

        let run = read_run(&path).unwrap();
        assert_eq!(run.number, 4);
        assert_eq!(run.job.property, Some(JobProperty::enabled()));
    }

    #[test]
    fn test_handle_line() {
        let host = HostContext::default();
        let listener = LifecycleListener::new(MemoryTransport::new(), host);

        let line = r#"{"phase":"STARTED","run":{"job":{"name":"demo","url":"job/demo/","property":{"enabled":true}},"number":1,"url":"job/demo/1/"}}"#;
        assert!(handle_line(&listener, line));
        assert!(!handle_line(&listener, "not json"));
        assert!(!handle_line(&listener, "   "));

        let messages = listener.transport().messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("onStarted {"));
    }
}
