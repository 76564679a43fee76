//! The resource store.
//!
//! [`Config`] owns every loaded resource in insertion order and enforces that
//! no two resources share a type, name and module. Lookups go through the
//! address grammar in [`fqdn`](crate::fqdn).

use crate::error::ConfigError;
use crate::fqdn::{Fqdn, FqdnError};
use crate::resolve::join_module;
use confgraph_types::{Resource, ResourceMetadata};

/// Module context stamped onto resources as they are loaded.
///
/// A loader walking nested modules keeps one context per module and derives
/// child contexts as it descends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadContext {
    module: String,
}

impl LoadContext {
    /// Context for resources declared at the top level.
    #[must_use]
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Context for resources declared inside the module at `path`.
    pub fn module(path: impl Into<String>) -> Self {
        Self {
            module: path.into(),
        }
    }

    /// Context for the module `name` declared inside this one.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self {
            module: join_module(&self.module, name),
        }
    }

    /// Returns the module path of this context.
    #[must_use]
    pub fn module_path(&self) -> &str {
        &self.module
    }
}

/// Ordered store of resources.
///
/// # Example
///
/// ```
/// use confgraph_config::Config;
/// use confgraph_types::{TYPE_OUTPUT, TypeRegistry};
///
/// let registry = TypeRegistry::new();
/// let mut config = Config::new();
///
/// let mut output = registry.create(TYPE_OUTPUT, "fqdn").unwrap();
/// output.metadata_mut().module = "module1".into();
/// config.add(output).unwrap();
///
/// let found = config.find_by_address("module.module1.output.fqdn").unwrap();
/// assert_eq!(found.metadata().name(), "fqdn");
/// ```
#[derive(Default)]
pub struct Config {
    resources: Vec<Box<dyn Resource>>,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("resources", &self.addresses())
            .finish()
    }
}

impl Config {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Adds a resource to the end of the store.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedAddress`] if the metadata cannot be
    ///   addressed: an empty name or type, a dot inside either, an empty
    ///   module segment, or segments that parse back as something else
    /// - [`ConfigError::DuplicateResource`] if a resource with the same
    ///   address is already stored
    ///
    /// The store is unchanged on error.
    pub fn add(&mut self, resource: Box<dyn Resource>) -> Result<(), ConfigError> {
        validate_metadata(resource.metadata())?;

        let fqdn = Fqdn::for_resource(resource.metadata());
        if self.position(&fqdn).is_some() {
            return Err(ConfigError::duplicate(fqdn.to_string()));
        }

        tracing::debug!(address = %fqdn, "adding resource");
        self.resources.push(resource);
        Ok(())
    }

    /// Adds a resource loaded inside `ctx`, stamping the context's module
    /// path in front of whatever module the resource already carries.
    ///
    /// # Errors
    ///
    /// As [`add`](Self::add), checked after the module is stamped.
    pub fn add_with_context(
        &mut self,
        mut resource: Box<dyn Resource>,
        ctx: &LoadContext,
    ) -> Result<(), ConfigError> {
        let meta = resource.metadata_mut();
        meta.module = join_module(ctx.module_path(), &meta.module);
        self.add(resource)
    }

    /// Removes the stored resource with the same address as `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ResourceNotFound`] if no such resource is
    /// stored.
    pub fn remove(&mut self, resource: &dyn Resource) -> Result<Box<dyn Resource>, ConfigError> {
        self.remove_address(&Fqdn::for_resource(resource.metadata()))
    }

    /// Removes the resource at `fqdn`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ResourceNotFound`] if no such resource is
    /// stored.
    pub fn remove_address(&mut self, fqdn: &Fqdn) -> Result<Box<dyn Resource>, ConfigError> {
        let index = self
            .position(fqdn)
            .ok_or_else(|| ConfigError::not_found(fqdn.to_string()))?;

        tracing::debug!(address = %fqdn, "removing resource");
        Ok(self.resources.remove(index))
    }

    /// Returns the number of stored resources.
    #[must_use]
    pub fn count(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the stored resources in insertion order.
    #[must_use]
    pub fn resources(&self) -> &[Box<dyn Resource>] {
        &self.resources
    }

    /// Iterates mutably over the stored resources in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Resource>> {
        self.resources.iter_mut()
    }

    /// Returns the canonical address of every stored resource, in order.
    #[must_use]
    pub fn addresses(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|resource| Fqdn::for_resource(resource.metadata()).to_string())
            .collect()
    }

    /// Finds the resource at an absolute address.
    ///
    /// The address's type, name and module must all match; any attribute is
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedAddress`] if `address` does not parse
    /// - [`ConfigError::ResourceNotFound`] if nothing matches
    pub fn find_by_address(&self, address: &str) -> Result<&dyn Resource, ConfigError> {
        let fqdn = Fqdn::parse(address)?;
        self.find_fqdn(&fqdn)
    }

    /// Mutable variant of [`find_by_address`](Self::find_by_address).
    ///
    /// # Errors
    ///
    /// As [`find_by_address`](Self::find_by_address).
    pub fn find_by_address_mut(
        &mut self,
        address: &str,
    ) -> Result<&mut dyn Resource, ConfigError> {
        let fqdn = Fqdn::parse(address)?;
        let index = self
            .position(&fqdn)
            .ok_or_else(|| ConfigError::not_found(fqdn.to_string()))?;
        Ok(self.resources[index].as_mut())
    }

    /// Returns every resource of `resource_type`, in store order, regardless
    /// of module.
    #[must_use]
    pub fn find_all_by_type(&self, resource_type: &str) -> Vec<&dyn Resource> {
        self.resources
            .iter()
            .filter(|resource| resource.metadata().resource_type() == resource_type)
            .map(AsRef::as_ref)
            .collect()
    }

    /// Returns the resources in the module at `address`.
    ///
    /// With `include_children` the result also contains resources of every
    /// nested module.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedAddress`] if `address` does not parse
    /// or is not a bare module address.
    pub fn find_by_module(
        &self,
        address: &str,
        include_children: bool,
    ) -> Result<Vec<&dyn Resource>, ConfigError> {
        let fqdn = parse_module_address(address)?;
        Ok(self.module_members(&fqdn.module, include_children))
    }

    /// Renders the metadata of every resource, in store order, as a JSON
    /// array.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be serialized.
    pub fn metadata_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let metadata: Vec<&ResourceMetadata> = self
            .resources
            .iter()
            .map(|resource| resource.metadata())
            .collect();
        serde_json::to_value(metadata)
    }

    pub(crate) fn position(&self, fqdn: &Fqdn) -> Option<usize> {
        self.resources
            .iter()
            .position(|resource| fqdn.matches(resource.metadata()))
    }

    pub(crate) fn find_fqdn(&self, fqdn: &Fqdn) -> Result<&dyn Resource, ConfigError> {
        self.position(fqdn)
            .map(|index| self.resources[index].as_ref())
            .ok_or_else(|| ConfigError::not_found(fqdn.to_string()))
    }

    pub(crate) fn module_members(&self, path: &str, include_children: bool) -> Vec<&dyn Resource> {
        self.resources
            .iter()
            .filter(|resource| {
                let module = &resource.metadata().module;
                if include_children {
                    contains_module(path, module)
                } else {
                    module == path
                }
            })
            .map(AsRef::as_ref)
            .collect()
    }
}

/// Returns `true` if `module` is `path` or nested anywhere below it. The
/// empty path is the top level and contains every module.
pub(crate) fn contains_module(path: &str, module: &str) -> bool {
    path.is_empty()
        || module
            .strip_prefix(path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Checks that `meta` has an address which parses back to it.
fn validate_metadata(meta: &ResourceMetadata) -> Result<(), ConfigError> {
    let reason = if meta.name().is_empty() {
        Some("resource name is empty")
    } else if meta.name().contains('.') {
        Some("resource name contains a dot")
    } else if meta.resource_type().is_empty() || meta.resource_type().contains('.') {
        Some("resource type is empty or contains a dot")
    } else if !meta.module.is_empty() && meta.module.split('.').any(str::is_empty) {
        Some("module path contains an empty segment")
    } else {
        None
    };

    let address = Fqdn::for_resource(meta).to_string();
    let reason = reason.or_else(|| {
        let round_trips = Fqdn::parse(&address).is_ok_and(|fqdn| fqdn.matches(meta));
        (!round_trips).then_some("address does not parse back to the resource")
    });

    match reason {
        Some(reason) => Err(FqdnError::Malformed { address, reason }.into()),
        None => Ok(()),
    }
}

pub(crate) fn parse_module_address(address: &str) -> Result<Fqdn, ConfigError> {
    let fqdn = Fqdn::parse(address)?;
    if !fqdn.is_module() {
        return Err(FqdnError::Malformed {
            address: address.to_string(),
            reason: "expected a module address",
        }
        .into());
    }
    Ok(fqdn)
}
