//! Module relative address resolution and dependency wiring.
//!
//! Resources are authored without knowing which module they will be loaded
//! into, so the addresses in `depends_on` are relative to the module of the
//! resource that declares them. Resolution joins the address's own module
//! onto that parent module:
//!
//! | address module | parent module | effective module |
//! |----------------|---------------|------------------|
//! | *(empty)* | `p` | `p` |
//! | `m` | *(empty)* | `m` |
//! | `m` | `p` | `p.m` |

use crate::config::{Config, parse_module_address};
use crate::error::ConfigError;
use crate::fqdn::Fqdn;
use confgraph_types::{Resource, ResourceMetadata};
use serde::{Deserialize, Serialize};

/// Joins a module path onto a parent module path.
#[must_use]
pub fn join_module(parent: &str, module: &str) -> String {
    match (parent.is_empty(), module.is_empty()) {
        (_, true) => parent.to_string(),
        (true, false) => module.to_string(),
        (false, false) => format!("{parent}.{module}"),
    }
}

/// Whether disabled resources take part when a dependency on a whole module
/// is expanded into the module's resources.
///
/// A dependency that names a disabled resource directly is always linked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleDependencyPolicy {
    /// Leave disabled resources out of module expansion.
    #[default]
    SkipDisabled,
    /// Link disabled resources like any other.
    IncludeDisabled,
}

impl ModuleDependencyPolicy {
    fn admits(self, meta: &ResourceMetadata) -> bool {
        match self {
            Self::SkipDisabled => !meta.disabled,
            Self::IncludeDisabled => true,
        }
    }
}

impl Config {
    /// Finds a resource by an address relative to `parent_module`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedAddress`] if `address` does not parse
    /// - [`ConfigError::ResourceNotFound`] if nothing matches the joined
    ///   address
    pub fn find_relative(
        &self,
        address: &str,
        parent_module: &str,
    ) -> Result<&dyn Resource, ConfigError> {
        let mut fqdn = Fqdn::parse(address)?;
        fqdn.module = join_module(parent_module, &fqdn.module);
        self.find_fqdn(&fqdn)
    }

    /// Finds the resources of a module addressed relative to `parent_module`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedAddress`] if `address` does not parse
    /// or is not a bare module address.
    pub fn find_relative_by_module(
        &self,
        address: &str,
        parent_module: &str,
        include_children: bool,
    ) -> Result<Vec<&dyn Resource>, ConfigError> {
        let fqdn = parse_module_address(address)?;
        let module = join_module(parent_module, &fqdn.module);
        Ok(self.module_members(&module, include_children))
    }

    /// Resolves one `depends_on` entry of the resource described by `from`
    /// into absolute addresses.
    ///
    /// A resource or output address yields exactly one link. A module address
    /// yields every resource contained in that module and its children,
    /// except `from` itself, filtered by `policy`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedAddress`] if `entry` does not parse
    /// - [`ConfigError::ResourceNotFound`] if `entry` names a resource that
    ///   is not stored, or a module that contains no resources at all
    pub fn resolve_dependency(
        &self,
        entry: &str,
        from: &ResourceMetadata,
        policy: ModuleDependencyPolicy,
    ) -> Result<Vec<String>, ConfigError> {
        let fqdn = Fqdn::parse(entry)?;

        if !fqdn.is_module() {
            let target = self
                .find_relative(entry, &from.module)
                .map_err(|_| ConfigError::not_found(entry))?;
            return Ok(vec![Fqdn::for_resource(target.metadata()).to_string()]);
        }

        let module = join_module(&from.module, &fqdn.module);
        let members = self.module_members(&module, true);
        if members.is_empty() {
            return Err(ConfigError::not_found(entry));
        }

        let own = Fqdn::for_resource(from);
        Ok(members
            .into_iter()
            .map(Resource::metadata)
            .filter(|meta| policy.admits(meta) && !own.matches(meta))
            .map(|meta| Fqdn::for_resource(meta).to_string())
            .collect())
    }

    /// Resolves the `depends_on` entries of every stored resource and
    /// records the results in `resource_links`.
    ///
    /// Links are deduplicated and keep the order in which they were
    /// authored. Existing links are replaced. Nothing is written unless every
    /// entry of every resource resolves.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`resolve_dependency`](Self::resolve_dependency).
    pub fn resolve_links(&mut self, policy: ModuleDependencyPolicy) -> Result<(), ConfigError> {
        let mut resolved = Vec::with_capacity(self.count());

        for resource in self.resources() {
            let meta = resource.metadata();
            let mut links: Vec<String> = Vec::new();

            for (index, entry) in meta.depends_on.iter().enumerate() {
                if meta.depends_on[..index].contains(entry) {
                    tracing::warn!(
                        resource = %Fqdn::for_resource(meta),
                        dependency = %entry,
                        "duplicate depends_on entry"
                    );
                    continue;
                }

                for link in self.resolve_dependency(entry, meta, policy)? {
                    if !links.contains(&link) {
                        links.push(link);
                    }
                }
            }

            tracing::debug!(
                resource = %Fqdn::for_resource(meta),
                links = links.len(),
                "resolved dependencies"
            );
            resolved.push(links);
        }

        for (resource, links) in self.iter_mut().zip(resolved) {
            resource.metadata_mut().resource_links = links;
        }

        Ok(())
    }

    /// Returns the resources that the resource at `address` links to, in
    /// link order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ResourceNotFound`] if `address` or one of its
    /// links is not stored.
    pub fn dependencies_of(&self, address: &str) -> Result<Vec<&dyn Resource>, ConfigError> {
        self.find_by_address(address)?
            .metadata()
            .resource_links
            .iter()
            .map(|link| self.find_by_address(link))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_module_covers_all_cases() {
        assert_eq!(join_module("", ""), "");
        assert_eq!(join_module("parent", ""), "parent");
        assert_eq!(join_module("", "child"), "child");
        assert_eq!(join_module("parent", "child"), "parent.child");
        assert_eq!(join_module("a.b", "c.d"), "a.b.c.d");
    }

    #[test]
    fn policy_defaults_to_skipping_disabled() {
        let mut meta = ResourceMetadata::new("a", "container");
        meta.disabled = true;

        assert_eq!(
            ModuleDependencyPolicy::default(),
            ModuleDependencyPolicy::SkipDisabled
        );
        assert!(!ModuleDependencyPolicy::SkipDisabled.admits(&meta));
        assert!(ModuleDependencyPolicy::IncludeDisabled.admits(&meta));
    }
}
