//! Integration tests for the lifecycle listener with an in-memory transport.

use buildpub_core::{
    GlobalSettings, HostContext, JobProperty, JobState, LifecycleListener, Phase, RunRecord,
    RunResult,
};
use buildpub_transport::fakes::MemoryTransport;
use std::sync::Arc;

fn listener(transport: MemoryTransport) -> LifecycleListener<MemoryTransport> {
    let host = HostContext::new(
        Some(GlobalSettings {
            enabled_on_all_jobs: true,
        }),
        Some("https://ci.example/".to_string()),
    );
    LifecycleListener::new(transport, host).with_host_name(Some("ci.example".to_string()))
}

fn parse(message: &str) -> (String, JobState) {
    let (event, json) = message.split_once(' ').expect("framed message");
    (event.to_string(), serde_json::from_str(json).expect("json body"))
}

#[test]
fn full_lifecycle_publishes_three_framed_messages() {
    let listener = listener(MemoryTransport::new());
    let mut run = RunRecord::new("demo", 12).with_node("worker-3");

    assert!(listener.on_started(&run));
    run = run.with_result(RunResult::Success);
    assert!(listener.on_completed(&run));
    run.executor = None;
    assert!(listener.on_finalized(&run));

    let messages = listener.transport().messages();
    assert_eq!(messages.len(), 3);

    let (event, started) = parse(&messages[0]);
    assert_eq!(event, "onStarted");
    assert_eq!(started.build.phase, Phase::Started);
    assert_eq!(started.build.status, "");
    assert_eq!(started.build.node_name.as_deref(), Some("worker-3"));
    assert_eq!(started.build.host_name.as_deref(), Some("ci.example"));

    let (event, completed) = parse(&messages[1]);
    assert_eq!(event, "onCompleted");
    assert_eq!(completed.build.status, "SUCCESS");

    let (event, finished) = parse(&messages[2]);
    assert_eq!(event, "onFinalized");
    assert_eq!(finished.build.phase, Phase::Finished);
    assert!(finished.build.node_name.is_none(), "executor released");
    assert_eq!(
        finished.build.full_url.as_deref(),
        Some("https://ci.example/job/demo/12/")
    );
}

#[test]
fn unauthorized_run_sends_nothing() {
    let transport = MemoryTransport::new();
    let listener = LifecycleListener::new(transport, HostContext::default());
    let run = RunRecord::new("demo", 1).with_property(JobProperty { enabled: false });

    for phase in Phase::ALL {
        assert!(!listener.notify(phase, &run));
    }
    assert!(listener.transport().is_empty());
}

#[test]
fn job_property_alone_is_enough() {
    let listener = LifecycleListener::new(MemoryTransport::new(), HostContext::default());
    let run = RunRecord::new("demo", 1).with_property(JobProperty::enabled());

    assert!(listener.on_started(&run));
    let (_, state) = parse(&listener.transport().messages()[0]);
    assert!(state.build.full_url.is_none());
    assert!(state.build.host_name.is_none());
}

#[test]
fn transport_failure_is_swallowed() {
    let listener = listener(MemoryTransport::closed());
    let run = RunRecord::new("demo", 1);

    assert!(!listener.on_started(&run));
    assert!(!listener.on_finalized(&run));
}

#[test]
fn concurrent_runs_share_one_transport() {
    let transport = Arc::new(MemoryTransport::new());
    let host = HostContext::new(
        Some(GlobalSettings {
            enabled_on_all_jobs: true,
        }),
        None,
    );
    let listener = Arc::new(LifecycleListener::new(transport.clone(), host));

    let handles: Vec<_> = (1..=8)
        .map(|number| {
            let listener = listener.clone();
            std::thread::spawn(move || {
                let run = RunRecord::new("demo", number);
                listener.on_started(&run);
                listener.on_finalized(&run.with_result(RunResult::Failure));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = transport.messages();
    assert_eq!(messages.len(), 16);
    for number in 1..=8u64 {
        let phases: Vec<Phase> = messages
            .iter()
            .map(|m| parse(m).1)
            .filter(|s| s.build.number == number)
            .map(|s| s.build.phase)
            .collect();
        assert_eq!(phases, vec![Phase::Started, Phase::Finished]);
    }
}
