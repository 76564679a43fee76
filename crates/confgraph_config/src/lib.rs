//! Addresses, the resource store and module relative resolution (Layer 2).
//!
//! Resources live in a [`Config`] in load order. Each one is reachable
//! through a fully qualified address ([`Fqdn`]) made of its enclosing module
//! path, type and name. Because modules are authored without knowing where
//! they will be loaded, references inside a module are resolved relative to
//! it with [`join_module`].
//!
//! # Main types
//!
//! - [`Fqdn`] - address grammar, parsing and canonical rendering
//! - [`Config`] - ordered store with lookups by address, type and module
//! - [`SharedConfig`] - the store behind a lock, for parallel loaders
//! - [`ParserOptions`] - loader settings
//!
//! # Example
//!
//! ```
//! use confgraph_config::{Config, LoadContext, ModuleDependencyPolicy};
//! use confgraph_types::{TYPE_OUTPUT, TYPE_VARIABLE, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let mut config = Config::new();
//! let ctx = LoadContext::module("module1");
//!
//! config
//!     .add_with_context(registry.create(TYPE_VARIABLE, "cidr").unwrap(), &ctx)
//!     .unwrap();
//!
//! let mut output = registry.create(TYPE_OUTPUT, "network").unwrap();
//! output.metadata_mut().depends_on = vec!["resource.variable.cidr".into()];
//! config.add_with_context(output, &ctx).unwrap();
//!
//! config.resolve_links(ModuleDependencyPolicy::default()).unwrap();
//!
//! let deps = config.dependencies_of("module.module1.output.network").unwrap();
//! assert_eq!(deps[0].metadata().name(), "cidr");
//! ```

mod config;
pub mod error;
pub mod fqdn;
mod options;
mod resolve;
mod shared;

pub use config::{Config, LoadContext};
pub use error::ConfigError;
pub use fqdn::{DEFAULT_OUTPUT_ATTRIBUTE, Fqdn, FqdnError};
pub use options::ParserOptions;
pub use resolve::{ModuleDependencyPolicy, join_module};
pub use shared::SharedConfig;
