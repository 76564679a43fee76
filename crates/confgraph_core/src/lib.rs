//! Ambient infrastructure for confgraph.
//!
//! The layer crates emit `tracing` events but never install a subscriber.
//! Binaries and tests that want to see them call [`TracingConfig::init`].

mod tracing_config;

pub use tracing_config::{TracingConfig, TracingFormat};
