//! buildpub-transport: pub/sub sinks for lifecycle event messages
//!
//! ## Layer 0 - Transport
//!
//! The rest of buildpub only ever sees the [`Transport`] trait: a reentrant,
//! fire-and-forget sink that accepts opaque message bodies.
//!
//! ## Key Components
//!
//! - `Transport`: the sink trait
//! - `ZmqPublisher`: ZeroMQ PUB socket fed by a background send task
//! - `fakes::MemoryTransport`: in-memory sink for tests

mod error;
pub mod fakes;
pub mod traits;
pub mod zmq;

pub use error::TransportError;
pub use traits::{Transport, TransportResult};
pub use zmq::{ZmqPublisher, DEFAULT_PORT};
