//! Resource graph core for an infrastructure-as-code configuration engine.
//!
//! Configuration blocks become typed [`Resource`](prelude::Resource) values
//! created through a [`TypeRegistry`](prelude::TypeRegistry). They are
//! stored in a [`Config`](prelude::Config) under hierarchical addresses and
//! wired together by resolving each resource's module relative
//! `depends_on` entries.
//!
//! ```
//! use confgraph::prelude::*;
//! use confgraph::confgraph_types::TYPE_OUTPUT;
//!
//! let registry = TypeRegistry::new();
//! let mut config = Config::new();
//!
//! let module2 = LoadContext::module("module1").child("module2");
//! config
//!     .add_with_context(registry.create(TYPE_OUTPUT, "fqdn").unwrap(), &module2)
//!     .unwrap();
//!
//! let found = config
//!     .find_relative("module.module2.output.fqdn", "module1")
//!     .unwrap();
//! assert_eq!(found.metadata().module, "module1.module2");
//! ```

pub use confgraph_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use confgraph_internal::prelude::*;
}
