//! Error types for the resource store and address resolution.

use crate::fqdn::FqdnError;

/// Errors returned by [`Config`](crate::Config) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A resource with the same type, name and module is already stored.
    #[error("resource already exists: {0}")]
    DuplicateResource(String),

    /// No stored resource matches the address.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// The address could not be parsed.
    #[error(transparent)]
    MalformedAddress(#[from] FqdnError),
}

impl ConfigError {
    /// Creates a [`DuplicateResource`](Self::DuplicateResource).
    pub fn duplicate(address: impl Into<String>) -> Self {
        Self::DuplicateResource(address.into())
    }

    /// Creates a [`ResourceNotFound`](Self::ResourceNotFound).
    pub fn not_found(address: impl Into<String>) -> Self {
        Self::ResourceNotFound(address.into())
    }

    /// Returns `true` for [`ResourceNotFound`](Self::ResourceNotFound).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound(_))
    }
}
