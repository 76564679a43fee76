//! Native function adapter for confgraph (Layer 2).
//!
//! Configuration expressions can call helper functions implemented in Rust.
//! Those functions only ever see and produce [`Value`]s, so every function
//! is registered with a signature descriptor whose parameter and result
//! kinds are checked once, when it is adapted, against the types the
//! expression language can represent.
//!
//! - [`Value`] / [`ExprType`] - the expression value model
//! - [`NativeFunction`] / [`NativeSignature`] / [`NativeKind`] - host-side functions
//! - [`adapt`] / [`ExprFunction`] - the checked bridge between the two
//! - [`FunctionRegistry`] - functions by name
//!
//! # Example
//!
//! ```
//! use confgraph_functions::{FunctionRegistry, NativeFunction, Value};
//!
//! let mut functions = FunctionRegistry::new();
//! functions
//!     .register(NativeFunction::from_fn2("join", |sep: String, parts: Vec<String>| {
//!         parts.join(&sep)
//!     }))
//!     .unwrap();
//!
//! let joined = functions
//!     .call(
//!         "join",
//!         &[Value::from("."), Value::List(vec!["module1".into(), "module2".into()])],
//!     )
//!     .unwrap();
//! assert_eq!(joined, Value::from("module1.module2"));
//! ```

mod adapter;
pub mod error;
mod native;
mod registry;
mod value;

pub use adapter::{ExprFunction, adapt};
pub use error::{ConversionError, FunctionError};
pub use native::{
    Callback, FromValue, IntoValue, NativeFunction, NativeKind, NativeSignature, NativeType,
    UnsupportedKind,
};
pub use registry::FunctionRegistry;
pub use value::{ExprType, Value, ValueKind};
