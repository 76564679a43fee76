//! Named collection of adapted functions.

use crate::adapter::{ExprFunction, adapt};
use crate::error::FunctionError;
use crate::native::NativeFunction;
use crate::value::Value;
use indexmap::IndexMap;

/// Registry of expression functions, in registration order.
///
/// Functions are adapted as they are registered, so an unsupported signature
/// surfaces while the registry is being built rather than when an expression
/// first calls it.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, ExprFunction>,
}

impl core::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Adapts and registers a native function, replacing any function with
    /// the same name.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::UnsupportedSignature`] from [`adapt`]. The
    /// registry is unchanged in that case.
    pub fn register(&mut self, native: NativeFunction) -> Result<(), FunctionError> {
        let function = adapt(native)?;
        let name = function.name().to_string();

        if self.functions.insert(name.clone(), function).is_some() {
            tracing::debug!(function = %name, "replaced registered function");
        }
        Ok(())
    }

    /// Returns the function registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExprFunction> {
        self.functions.get(name)
    }

    /// Returns whether a function named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns the registered names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Calls the function registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::Unknown`] if nothing is registered under
    /// `name`, otherwise whatever [`ExprFunction::call`] returns.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        self.get(name)
            .ok_or_else(|| FunctionError::Unknown(name.to_string()))?
            .call(args)
    }
}
