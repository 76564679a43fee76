//! # confgraph Internal Library
//!
//! Re-exports the confgraph layer crates for convenience.

/// Layer 1: resource capability, metadata and type registry.
pub use confgraph_types;

/// Layer 2: addresses, the resource store and module relative resolution.
pub use confgraph_config;

/// Layer 2: native function adapter.
pub use confgraph_functions;

/// Layer 2: cached module fetching.
pub use confgraph_getter;

/// Subscriber setup for the emitted `tracing` events.
#[cfg(feature = "tracing")]
pub use confgraph_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use confgraph_config::{
        Config, ConfigError, Fqdn, LoadContext, ModuleDependencyPolicy, ParserOptions,
        SharedConfig,
    };
    #[cfg(feature = "tracing")]
    pub use confgraph_core::{TracingConfig, TracingFormat};
    pub use confgraph_functions::{ExprFunction, FunctionRegistry, NativeFunction, Value};
    pub use confgraph_getter::{Getter, ModuleGetter};
    pub use confgraph_types::{Resource, ResourceMetadata, Status, TypeRegistry};
}
