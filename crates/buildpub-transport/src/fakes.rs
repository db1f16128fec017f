//! In-memory fakes for the transport trait (testing only)
//!
//! `MemoryTransport` records every accepted message, or rejects all of them
//! when built with [`MemoryTransport::closed`].

use std::sync::Mutex;

use crate::error::TransportError;
use crate::traits::{Transport, TransportResult};

/// In-memory transport backed by a `Vec<String>`.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    messages: Mutex<Vec<String>>,
    closed: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that rejects every message with `TransportError::Closed`.
    pub fn closed() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            closed: true,
        }
    }

    /// Snapshot of all messages accepted so far, in publish order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for MemoryTransport {
    fn publish(&self, message: String) -> TransportResult<()> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.messages.lock().unwrap().push(message);
        Ok(())
    }
}
