//! Resource types for confgraph (Layer 1).
//!
//! Every configuration block a loader encounters becomes a typed value that
//! implements [`Resource`]. Resources share a common [`ResourceMetadata`]
//! (name, type, enclosing module, dependencies) and are manufactured by a
//! [`TypeRegistry`] that maps type names to factories.
//!
//! - [`Resource`] - capability trait exposing the metadata
//! - [`Processable`] - optional callback run by the executor
//! - [`TypeRegistry`] - type name to factory mapping
//! - [`Output`], [`Variable`], [`Module`] - built-in resource types
//!
//! # Architecture
//!
//! - **Layer 1** (`confgraph_types`): resource values and the registry (this crate)
//! - **Layer 2** (`confgraph_config`): addresses, the resource store and resolution
//! - **Layer 2** (`confgraph_functions`, `confgraph_getter`): collaborator contracts

mod builtin;
pub mod error;
mod registry;
mod resource;

pub use builtin::{Module, Output, TYPE_MODULE, TYPE_OUTPUT, TYPE_VARIABLE, Variable};
pub use error::RegistryError;
pub use registry::{ResourceFactory, TypeRegistry};
pub use resource::{ProcessError, Processable, Resource, ResourceMetadata, Status};
