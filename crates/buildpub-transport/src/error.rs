//! Error types for buildpub-transport

use thiserror::Error;

/// Errors that can occur when handing a message to a transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// The sink no longer accepts messages (publisher shut down)
    #[error("Transport closed")]
    Closed,

    /// Socket could not be bound to the requested endpoint
    #[error("Failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: zeromq::ZmqError,
    },
}
