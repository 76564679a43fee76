//! Resource types every [`TypeRegistry`](crate::TypeRegistry) knows about.

use crate::resource::{Resource, ResourceMetadata};
use serde::{Deserialize, Serialize};

/// Type name of module output values.
pub const TYPE_OUTPUT: &str = "output";

/// Type name of input variables.
pub const TYPE_VARIABLE: &str = "variable";

/// Type name of module declarations.
pub const TYPE_MODULE: &str = "module";

/// A value exported from a module.
///
/// Outputs are addressed as `output.<name>` rather than
/// `resource.output.<name>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Common resource metadata.
    #[serde(flatten)]
    pub meta: ResourceMetadata,

    /// The evaluated output value.
    #[serde(default)]
    pub value: serde_json::Value,

    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Output {
    /// Creates an output with a null value.
    pub fn new(meta: ResourceMetadata) -> Self {
        Self {
            meta,
            value: serde_json::Value::Null,
            description: None,
        }
    }
}

impl Resource for Output {
    fn metadata(&self) -> &ResourceMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.meta
    }
}

/// An input variable with an optional default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Common resource metadata.
    #[serde(flatten)]
    pub meta: ResourceMetadata,

    /// Value used when no override is supplied.
    #[serde(default)]
    pub default: serde_json::Value,

    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Variable {
    /// Creates a variable without a default.
    pub fn new(meta: ResourceMetadata) -> Self {
        Self {
            meta,
            default: serde_json::Value::Null,
            description: None,
        }
    }
}

impl Resource for Variable {
    fn metadata(&self) -> &ResourceMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.meta
    }
}

/// A module declaration pointing at the source of nested configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Common resource metadata.
    #[serde(flatten)]
    pub meta: ResourceMetadata,

    /// Local path or remote reference of the module's configuration.
    #[serde(default)]
    pub source: String,

    /// Variable overrides passed into the module.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub variables: serde_json::Map<String, serde_json::Value>,
}

impl Module {
    /// Creates a module declaration without a source.
    pub fn new(meta: ResourceMetadata) -> Self {
        Self {
            meta,
            source: String::new(),
            variables: serde_json::Map::new(),
        }
    }
}

impl Resource for Module {
    fn metadata(&self) -> &ResourceMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.meta
    }
}
