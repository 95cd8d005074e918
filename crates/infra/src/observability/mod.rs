//! Observability for the hash API client
//!
//! The client emits `tracing` events and spans only; installing a subscriber
//! is left to the host application. [`init_tracing`] is a convenience for
//! binaries and tests that want a formatted stderr subscriber.

pub mod logging;

pub use logging::init_tracing;
