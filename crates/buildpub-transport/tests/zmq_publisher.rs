//! Integration tests for the ZeroMQ publisher against a real SUB socket.

use anyhow::Result;
use buildpub_transport::{Transport, TransportError, ZmqPublisher};
use std::time::Duration;
use tokio::time::timeout;
use zeromq::{Socket, SocketRecv, SubSocket};

/// Generate a random port in the ephemeral range to avoid collisions
fn random_test_port() -> u16 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    let pid = std::process::id() as u64;
    ((seed ^ pid) % 10000 + 50000) as u16
}

async fn bind_publisher() -> Result<(ZmqPublisher, String)> {
    let mut last_err = None;
    for _ in 0..25 {
        let addr = format!("tcp://127.0.0.1:{}", random_test_port());
        match ZmqPublisher::bind(&addr).await {
            Ok(publisher) => return Ok((publisher, addr)),
            Err(err) => last_err = Some(err),
        }
    }
    Err(anyhow::anyhow!(
        "Failed to bind publisher after multiple attempts: {:?}",
        last_err
    ))
}

#[tokio::test]
async fn test_subscriber_receives_framed_message() -> Result<()> {
    let (publisher, addr) = bind_publisher().await?;

    let mut sub = SubSocket::new();
    sub.connect(&addr).await?;
    sub.subscribe("onStarted").await?;

    // PUB/SUB drops messages until the subscription propagates, so keep
    // publishing until one arrives.
    let body = r#"onStarted {"name":"demo"}"#.to_string();
    let received = timeout(Duration::from_secs(5), async {
        loop {
            publisher.publish(body.clone()).expect("publish failed");
            if let Ok(Ok(msg)) = timeout(Duration::from_millis(100), sub.recv()).await {
                return msg;
            }
        }
    })
    .await?;

    let frame = received.get(0).expect("empty message").to_vec();
    assert_eq!(String::from_utf8(frame)?, body);

    publisher.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_publish_without_subscribers_is_accepted() -> Result<()> {
    let (publisher, _addr) = bind_publisher().await?;
    publisher.publish("onFinalized {}".to_string())?;
    publisher.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_bind_failure_reports_endpoint() {
    let err = match ZmqPublisher::bind("not-an-endpoint").await {
        Ok(_) => panic!("bind should fail"),
        Err(e) => e,
    };
    match err {
        TransportError::Bind { endpoint, .. } => assert_eq!(endpoint, "not-an-endpoint"),
        other => panic!("unexpected error: {other}"),
    }
}
