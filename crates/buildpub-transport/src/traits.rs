//! Transport trait definition
//!
//! A `Transport` accepts serialized lifecycle messages and delivers them to
//! subscribers. Callers never wait for subscriber acknowledgment: `publish`
//! only reports whether the message was accepted by the sink.

use crate::error::TransportError;

/// Result type for transport operations
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// A pub/sub sink for opaque message bodies.
///
/// Implementations must be safe to call concurrently from several runs.
pub trait Transport: Send + Sync {
    /// Hand a message body to the sink. Must not block on delivery.
    fn publish(&self, message: String) -> TransportResult<()>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn publish(&self, message: String) -> TransportResult<()> {
        (**self).publish(message)
    }
}
