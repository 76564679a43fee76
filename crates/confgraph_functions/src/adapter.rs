//! Adapting native functions into expression functions.

use crate::error::FunctionError;
use crate::native::{Body, NativeFunction};
use crate::value::{ExprType, Value};
use core::fmt;
use std::sync::Arc;

/// A function callable from expressions, with a fully expressible
/// signature.
#[derive(Clone)]
pub struct ExprFunction {
    name: String,
    params: Vec<ExprType>,
    returns: ExprType,
    body: Arc<Body>,
}

impl fmt::Debug for ExprFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

/// Adapts a native function to the expression value model.
///
/// # Errors
///
/// Returns [`FunctionError::UnsupportedSignature`] if any parameter or the
/// result has a kind without an expression type, such as a function or unit.
///
/// # Example
///
/// ```
/// use confgraph_functions::{ExprType, NativeFunction, Value, adapt};
///
/// let len = adapt(NativeFunction::from_fn1("len", |s: String| s.len())).unwrap();
/// assert_eq!(len.params(), &[ExprType::String]);
/// assert_eq!(len.call(&[Value::from("abc")]), Ok(Value::Number(3.0)));
/// ```
pub fn adapt(native: NativeFunction) -> Result<ExprFunction, FunctionError> {
    let signature = native.signature();

    let params = signature
        .params
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            ExprType::try_from(kind).map_err(|err| {
                FunctionError::unsupported(native.name(), format!("parameter {index}: {err}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let returns = ExprType::try_from(&signature.returns).map_err(|err| {
        FunctionError::unsupported(native.name(), format!("return type: {err}"))
    })?;

    tracing::debug!(function = native.name(), params = params.len(), "adapted function");

    Ok(ExprFunction {
        name: native.name().to_string(),
        params,
        returns,
        body: native.body,
    })
}

impl ExprFunction {
    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter types, in call order.
    #[must_use]
    pub fn params(&self) -> &[ExprType] {
        &self.params
    }

    /// Returns the result type.
    #[must_use]
    pub fn return_type(&self) -> &ExprType {
        &self.returns
    }

    /// Calls the function after checking the arguments against the
    /// signature.
    ///
    /// # Errors
    ///
    /// - [`FunctionError::ArgumentCount`] if the arity differs
    /// - [`FunctionError::ArgumentType`] for the first mistyped argument
    /// - [`FunctionError::Execution`] if the body fails or returns a value
    ///   of the wrong type
    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        if args.len() != self.params.len() {
            return Err(FunctionError::ArgumentCount {
                name: self.name.clone(),
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        for (index, (param, arg)) in self.params.iter().zip(args).enumerate() {
            param
                .check(arg)
                .map_err(|source| FunctionError::ArgumentType {
                    name: self.name.clone(),
                    index,
                    source,
                })?;
        }

        let result = (self.body)(args)?;
        self.returns.check(&result).map_err(|err| {
            FunctionError::execution(self.name.as_str(), format!("bad return value: {err}"))
        })?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{Callback, NativeKind, NativeSignature};

    #[test]
    fn string_and_int_params_map_to_string_and_number() {
        let function = adapt(NativeFunction::from_fn2("f", |_a: String, _b: i64| 0_i64)).unwrap();

        assert_eq!(function.params(), &[ExprType::String, ExprType::Number]);
        assert_eq!(function.return_type(), &ExprType::Number);
    }

    #[test]
    fn function_param_is_rejected() {
        let err = adapt(NativeFunction::from_fn2("f", |_a: String, _cb: Callback| 0_i64))
            .unwrap_err();

        assert_eq!(
            err,
            FunctionError::unsupported("f", "parameter 1: function has no expression type")
        );
    }

    #[test]
    fn function_return_is_rejected() {
        let err = adapt(NativeFunction::from_fn2("f", |_a: String, _b: i64| {
            Callback::new(|_| Ok(Value::Bool(true)))
        }))
        .unwrap_err();

        assert!(matches!(err, FunctionError::UnsupportedSignature { .. }));
        assert!(err.to_string().contains("return type"));
    }

    #[test]
    fn unit_return_is_rejected() {
        let err = adapt(NativeFunction::from_fn1("log", |_msg: String| ())).unwrap_err();
        assert!(err.to_string().contains("unit has no expression type"));
    }

    #[test]
    fn explicit_signature_checks_return_value() {
        let signature = NativeSignature::new(vec![], NativeKind::Number);
        let liar = NativeFunction::new("liar", signature, |_| Ok(Value::from("not a number")));

        let err = adapt(liar).unwrap().call(&[]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::execution("liar", "bad return value: expected number, got string")
        );
    }

    #[test]
    fn fractional_argument_fails_integer_conversion() {
        let double = adapt(NativeFunction::from_fn1("double", |n: i32| n * 2)).unwrap();

        assert_eq!(double.call(&[Value::Number(21.0)]), Ok(Value::Number(42.0)));
        assert!(matches!(
            double.call(&[Value::Number(1.5)]),
            Err(FunctionError::ArgumentType { index: 0, .. })
        ));
    }
}
