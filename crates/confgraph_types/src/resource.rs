//! The [`Resource`] capability and the metadata every resource embeds.

use downcast_rs::{Downcast, impl_downcast};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a resource.
///
/// Freshly created resources start as [`Status::PendingCreation`]. Later
/// transitions belong to whatever executes the resource graph. Exclusion
/// from processing is not a status: it is the
/// [`disabled`](ResourceMetadata::disabled) flag, which leaves the status
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The resource has been declared but not yet created.
    #[default]
    PendingCreation,
    /// The resource exists and its declaration has changed.
    PendingModification,
    /// The resource has been created.
    Created,
    /// Processing the resource failed.
    Failed,
}

/// Metadata shared by every resource.
///
/// `name` and `resource_type` are fixed when the metadata is created by the
/// [`TypeRegistry`](crate::TypeRegistry); the remaining fields are filled in
/// by the loader and the dependency resolver. The [`Default`] value has an
/// empty name and type and is meant to be overwritten by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    name: String,

    #[serde(rename = "type")]
    resource_type: String,

    /// Dot separated path of the enclosing modules, outermost first. Empty at
    /// the top level.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,

    /// User authored dependencies, each relative to [`module`](Self::module).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Absolute addresses computed from `depends_on`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_links: Vec<String>,

    /// Excludes the resource from processing. Disabled resources are still
    /// stored and can still be looked up.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub disabled: bool,

    /// Current lifecycle status.
    #[serde(default)]
    pub status: Status,
}

impl ResourceMetadata {
    /// Creates metadata for a top-level resource in the
    /// [`Status::PendingCreation`] state.
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            module: String::new(),
            depends_on: Vec::new(),
            resource_links: Vec::new(),
            disabled: false,
            status: Status::PendingCreation,
        }
    }

    /// Sets the enclosing module path.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Appends a user authored dependency.
    #[must_use]
    pub fn with_depends_on(mut self, address: impl Into<String>) -> Self {
        self.depends_on.push(address.into());
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resource type name.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns `true` if this resource was loaded from a module.
    #[must_use]
    pub fn in_module(&self) -> bool {
        !self.module.is_empty()
    }
}

/// A typed configuration resource.
///
/// Resource kinds are open ended: any struct that embeds a
/// [`ResourceMetadata`] can implement this trait and be registered with a
/// [`TypeRegistry`](crate::TypeRegistry). Concrete types are recovered with
/// [`downcast_ref`](trait.Resource.html#method.downcast_ref).
///
/// # Example
///
/// ```
/// use confgraph_types::{Resource, ResourceMetadata};
///
/// struct Network {
///     meta: ResourceMetadata,
///     subnet: String,
/// }
///
/// impl Resource for Network {
///     fn metadata(&self) -> &ResourceMetadata {
///         &self.meta
///     }
///
///     fn metadata_mut(&mut self) -> &mut ResourceMetadata {
///         &mut self.meta
///     }
/// }
///
/// let network: Box<dyn Resource> = Box::new(Network {
///     meta: ResourceMetadata::new("cloud", "network"),
///     subnet: "10.0.0.0/16".into(),
/// });
///
/// assert_eq!(network.metadata().name(), "cloud");
/// assert_eq!(network.downcast_ref::<Network>().unwrap().subnet, "10.0.0.0/16");
/// ```
pub trait Resource: Downcast + Send + Sync {
    /// Returns the resource metadata.
    fn metadata(&self) -> &ResourceMetadata;

    /// Returns the resource metadata for modification.
    fn metadata_mut(&mut self) -> &mut ResourceMetadata;

    /// Returns the processing capability, if this resource has one.
    ///
    /// The executor calls [`Processable::process`] once, after the resource's
    /// dependencies have been resolved.
    fn as_processable(&mut self) -> Option<&mut dyn Processable> {
        None
    }
}

impl_downcast!(Resource);

impl core::fmt::Debug for dyn Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Resource")
            .field("metadata", self.metadata())
            .finish_non_exhaustive()
    }
}

/// Error returned by [`Processable::process`].
#[derive(Debug, thiserror::Error)]
#[error("failed to process resource '{name}': {message}")]
pub struct ProcessError {
    /// Name of the resource that failed.
    pub name: String,
    /// Description of the failure.
    pub message: String,
}

impl ProcessError {
    /// Creates a new process error.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Optional callback invoked by the executor once a resource's dependencies
/// have been processed.
pub trait Processable {
    /// Processes the resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] when the resource cannot be processed.
    fn process(&mut self) -> Result<(), ProcessError>;
}
