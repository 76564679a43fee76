//! Options shared by the components that load a configuration.

use crate::resolve::ModuleDependencyPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Loader options.
///
/// Missing fields fall back to [`ParserOptions::default`] when deserialized.
///
/// # Example
///
/// ```
/// use confgraph_config::{ModuleDependencyPolicy, ParserOptions};
///
/// let options = ParserOptions::from_json(
///     r#"{ "module_cache": "/mycache", "module_dependencies": "include_disabled" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(options.module_cache, std::path::Path::new("/mycache"));
/// assert!(!options.force_module_fetch);
/// assert_eq!(options.module_dependencies, ModuleDependencyPolicy::IncludeDisabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Directory remote modules are downloaded into.
    pub module_cache: PathBuf,
    /// Download modules again even when a cached copy exists.
    pub force_module_fetch: bool,
    /// How disabled resources are treated when a whole module is depended on.
    pub module_dependencies: ModuleDependencyPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            module_cache: std::env::temp_dir().join("confgraph").join("modules"),
            force_module_fetch: false,
            module_dependencies: ModuleDependencyPolicy::default(),
        }
    }
}

impl ParserOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module cache directory.
    #[must_use]
    pub fn with_module_cache(mut self, dir: impl Into<PathBuf>) -> Self {
        self.module_cache = dir.into();
        self
    }

    /// Sets whether cached modules are fetched again.
    #[must_use]
    pub fn with_force_module_fetch(mut self, force: bool) -> Self {
        self.force_module_fetch = force;
        self
    }

    /// Sets the module dependency policy.
    #[must_use]
    pub fn with_module_dependencies(mut self, policy: ModuleDependencyPolicy) -> Self {
        self.module_dependencies = policy;
        self
    }

    /// Loads options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON or a field has the wrong
    /// shape. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
