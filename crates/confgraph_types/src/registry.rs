//! Resource type registry.
//!
//! The [`TypeRegistry`] maps a type name to a factory that manufactures
//! resources of that type. Loaders look types up by the block name they find
//! in configuration and call [`TypeRegistry::create`] to obtain a fresh
//! resource with its metadata initialized.
//!
//! # Usage
//!
//! ```
//! use confgraph_types::{Resource, ResourceMetadata, TypeRegistry};
//!
//! #[derive(Default)]
//! struct Container {
//!     meta: ResourceMetadata,
//!     image: String,
//! }
//!
//! impl Resource for Container {
//!     fn metadata(&self) -> &ResourceMetadata { &self.meta }
//!     fn metadata_mut(&mut self) -> &mut ResourceMetadata { &mut self.meta }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_default::<Container>("container");
//!
//! let container = registry.create("container", "web").unwrap();
//! assert_eq!(container.metadata().resource_type(), "container");
//! assert!(registry.create("database", "db").is_err());
//! ```

use crate::builtin::{Module, Output, TYPE_MODULE, TYPE_OUTPUT, TYPE_VARIABLE, Variable};
use crate::error::RegistryError;
use crate::resource::{Resource, ResourceMetadata};
use hashbrown::HashMap;
use std::sync::Arc;

/// Manufactures resources of a single type.
///
/// Implemented for every `Fn(ResourceMetadata) -> Box<dyn Resource>` closure,
/// so most registrations pass a closure directly.
pub trait ResourceFactory: Send + Sync + 'static {
    /// Builds a resource around the given, already initialized, metadata.
    fn build(&self, meta: ResourceMetadata) -> Box<dyn Resource>;
}

impl<F> ResourceFactory for F
where
    F: Fn(ResourceMetadata) -> Box<dyn Resource> + Send + Sync + 'static,
{
    fn build(&self, meta: ResourceMetadata) -> Box<dyn Resource> {
        self(meta)
    }
}

/// Registry of resource types.
///
/// Constructed once at startup and passed to whichever component needs to
/// create resources; there is no process wide default instance.
#[derive(Clone)]
pub struct TypeRegistry {
    factories: HashMap<String, Arc<dyn ResourceFactory>>,
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry holding the built-in `output`, `variable` and
    /// `module` types.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(TYPE_OUTPUT, |meta| {
            Box::new(Output::new(meta)) as Box<dyn Resource>
        });
        registry.register(TYPE_VARIABLE, |meta| {
            Box::new(Variable::new(meta)) as Box<dyn Resource>
        });
        registry.register(TYPE_MODULE, |meta| {
            Box::new(Module::new(meta)) as Box<dyn Resource>
        });
        registry
    }

    /// Creates a registry without any types, not even the built-in ones.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory closure for `type_name`.
    ///
    /// Registering a name twice replaces the earlier factory, which lets
    /// callers override the built-in types.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn(ResourceMetadata) -> Box<dyn Resource> + Send + Sync + 'static,
    {
        self.register_factory(type_name, factory);
    }

    /// Registers a [`ResourceFactory`] implementation for `type_name`.
    pub fn register_factory(
        &mut self,
        type_name: impl Into<String>,
        factory: impl ResourceFactory,
    ) {
        let type_name = type_name.into();
        if self
            .factories
            .insert(type_name.clone(), Arc::new(factory))
            .is_some()
        {
            tracing::debug!(type_name = %type_name, "replaced resource type factory");
        }
    }

    /// Registers a type whose instances start from [`Default`] with the
    /// metadata swapped in.
    pub fn register_default<T: Resource + Default>(&mut self, type_name: impl Into<String>) {
        self.register(type_name, |meta| {
            let mut resource = T::default();
            *resource.metadata_mut() = meta;
            Box::new(resource) as Box<dyn Resource>
        });
    }

    /// Creates a new resource of `type_name` called `name`.
    ///
    /// The returned resource is in the
    /// [`PendingCreation`](crate::Status::PendingCreation) state and is not
    /// part of any store yet.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownType`] if `type_name` was never registered
    /// - [`RegistryError::EmptyName`] if `name` is empty
    pub fn create(
        &self,
        type_name: &str,
        name: impl Into<String>,
    ) -> Result<Box<dyn Resource>, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName(type_name.to_string()));
        }

        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))?;

        Ok(factory.build(ResourceMetadata::new(name, type_name)))
    }

    /// Returns whether `type_name` is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Returns the registered type names in sorted order.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Status;

    #[derive(Default)]
    struct Network {
        meta: ResourceMetadata,
        subnet: String,
    }

    impl Resource for Network {
        fn metadata(&self) -> &ResourceMetadata {
            &self.meta
        }

        fn metadata_mut(&mut self) -> &mut ResourceMetadata {
            &mut self.meta
        }
    }

    #[test]
    fn builtin_types_are_present() {
        let registry = TypeRegistry::new();

        assert!(registry.contains(TYPE_OUTPUT));
        assert!(registry.contains(TYPE_VARIABLE));
        assert!(registry.contains(TYPE_MODULE));
        assert_eq!(registry.type_names(), vec!["module", "output", "variable"]);
    }

    #[test]
    fn empty_registry_has_no_types() {
        let registry = TypeRegistry::empty();
        assert!(registry.type_names().is_empty());
        assert!(matches!(
            registry.create(TYPE_OUTPUT, "fqdn"),
            Err(RegistryError::UnknownType(name)) if name == "output"
        ));
    }

    #[test]
    fn create_rejects_empty_name() {
        let registry = TypeRegistry::new();
        let err = registry.create(TYPE_OUTPUT, "").unwrap_err();

        assert_eq!(err, RegistryError::EmptyName("output".to_string()));
        assert_eq!(err.to_string(), "resource of type output has an empty name");
    }

    #[test]
    fn create_initializes_metadata() {
        let registry = TypeRegistry::new();
        let output = registry.create(TYPE_OUTPUT, "fqdn").unwrap();

        let meta = output.metadata();
        assert_eq!(meta.name(), "fqdn");
        assert_eq!(meta.resource_type(), TYPE_OUTPUT);
        assert_eq!(meta.status, Status::PendingCreation);
        assert!(meta.module.is_empty());
        assert!(output.downcast_ref::<Output>().is_some());
    }

    #[test]
    fn register_default_uses_default_fields() {
        let mut registry = TypeRegistry::new();
        registry.register_default::<Network>("network");

        let network = registry.create("network", "cloud").unwrap();
        let network = network.downcast_ref::<Network>().unwrap();
        assert_eq!(network.meta.name(), "cloud");
        assert_eq!(network.meta.resource_type(), "network");
        assert!(network.subnet.is_empty());
    }

    #[test]
    fn register_closure_factory() {
        let mut registry = TypeRegistry::empty();
        registry.register("network", |meta| {
            Box::new(Network {
                meta,
                subnet: "10.5.0.0/16".to_string(),
            }) as Box<dyn Resource>
        });

        let network = registry.create("network", "cloud").unwrap();
        assert_eq!(
            network.downcast_ref::<Network>().unwrap().subnet,
            "10.5.0.0/16"
        );
    }

    #[test]
    fn re_registering_replaces_factory() {
        let mut registry = TypeRegistry::new();
        registry.register(TYPE_OUTPUT, |meta| {
            Box::new(Network {
                meta,
                subnet: String::new(),
            }) as Box<dyn Resource>
        });

        let output = registry.create(TYPE_OUTPUT, "fqdn").unwrap();
        assert!(output.downcast_ref::<Network>().is_some());
        assert_eq!(registry.type_names().len(), 3);
    }

    #[test]
    fn unknown_type_names_the_type() {
        let registry = TypeRegistry::new();
        let err = registry.create("container", "test_dev").unwrap_err();
        assert_eq!(err.to_string(), "unknown resource type: container");
    }
}
