//! ZeroMQ PUB socket publisher.
//!
//! The socket is owned by a single background task. `publish` only enqueues
//! onto an unbounded channel, so callers on the host's notification thread
//! never wait on the network. Subscribers that are not connected when a
//! message is sent simply miss it.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zeromq::{PubSocket, Socket, SocketSend, ZmqMessage};

use crate::error::TransportError;
use crate::traits::{Transport, TransportResult};

/// Port the publisher binds when none is configured.
pub const DEFAULT_PORT: u16 = 8888;

/// A bound ZeroMQ publisher.
pub struct ZmqPublisher {
    endpoint: String,
    queue: mpsc::UnboundedSender<String>,
    sender: JoinHandle<()>,
}

impl ZmqPublisher {
    /// Bind a PUB socket at `endpoint` (e.g. `tcp://0.0.0.0:8888`) and start
    /// the send task. Must be called from within a tokio runtime.
    pub async fn bind(endpoint: &str) -> TransportResult<Self> {
        let mut socket = PubSocket::new();
        let bound = socket
            .bind(endpoint)
            .await
            .map_err(|source| TransportError::Bind {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let endpoint = bound.to_string();
        info!(endpoint = %endpoint, "ZeroMQ publisher bound");

        let (queue, rx) = mpsc::unbounded_channel();
        let sender = tokio::spawn(run_sender(socket, rx));

        Ok(Self {
            endpoint,
            queue,
            sender,
        })
    }

    /// The endpoint the socket actually bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Stop accepting messages and wait for the queue to drain.
    pub async fn shutdown(self) {
        drop(self.queue);
        if let Err(e) = self.sender.await {
            warn!(error = %e, "ZeroMQ send task ended abnormally");
        }
    }
}

impl Transport for ZmqPublisher {
    fn publish(&self, message: String) -> TransportResult<()> {
        self.queue
            .send(message)
            .map_err(|_| TransportError::Closed)
    }
}

async fn run_sender(mut socket: PubSocket, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(message) = rx.recv().await {
        let len = message.len();
        match socket.send(ZmqMessage::from(message)).await {
            Ok(()) => debug!(bytes = len, "Published message"),
            Err(e) => warn!(error = %e, "Failed to publish message"),
        }
    }
    debug!("Publisher queue closed, send task exiting");
}
