//! Error types for the type registry.

/// Error creating a resource from the [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No factory is registered under the requested type name.
    #[error("unknown resource type: {0}")]
    UnknownType(String),

    /// A resource cannot be created without a name.
    #[error("resource of type {0} has an empty name")]
    EmptyName(String),
}
