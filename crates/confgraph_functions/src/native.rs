//! Native functions and their signature descriptors.
//!
//! A [`NativeFunction`] pairs a body operating on [`Value`]s with a
//! [`NativeSignature`] listing the host-side kind of every parameter and of
//! the result. The descriptor is either written out explicitly or derived
//! from Rust types through [`NativeType`].

use crate::error::{ConversionError, FunctionError};
use crate::value::{ExprType, Value};
use core::fmt;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub(crate) type Body = dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync;

/// Host-side kind of a parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeKind {
    /// Text.
    String,
    /// Any integer or float.
    Number,
    /// Booleans.
    Bool,
    /// A sequence of the given kind.
    List(Box<NativeKind>),
    /// A string keyed map of the given kind.
    Map(Box<NativeKind>),
    /// A callable.
    Function,
    /// No value.
    Unit,
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Bool => f.write_str("bool"),
            Self::List(element) => write!(f, "list({element})"),
            Self::Map(element) => write!(f, "map({element})"),
            Self::Function => f.write_str("function"),
            Self::Unit => f.write_str("unit"),
        }
    }
}

/// A [`NativeKind`] with no expression type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} has no expression type")]
pub struct UnsupportedKind(pub NativeKind);

impl TryFrom<&NativeKind> for ExprType {
    type Error = UnsupportedKind;

    fn try_from(kind: &NativeKind) -> Result<Self, Self::Error> {
        match kind {
            NativeKind::String => Ok(Self::String),
            NativeKind::Number => Ok(Self::Number),
            NativeKind::Bool => Ok(Self::Bool),
            NativeKind::List(element) => Ok(Self::List(Box::new(Self::try_from(&**element)?))),
            NativeKind::Map(element) => Ok(Self::Map(Box::new(Self::try_from(&**element)?))),
            NativeKind::Function | NativeKind::Unit => Err(UnsupportedKind(kind.clone())),
        }
    }
}

/// Ordered parameter kinds and the result kind of a native function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSignature {
    /// Parameter kinds, in call order.
    pub params: Vec<NativeKind>,
    /// Result kind.
    pub returns: NativeKind,
}

impl NativeSignature {
    /// Creates a signature descriptor.
    #[must_use]
    pub fn new(params: Vec<NativeKind>, returns: NativeKind) -> Self {
        Self { params, returns }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Rust type bridging
// ─────────────────────────────────────────────────────────────────────

/// A Rust type with a known [`NativeKind`].
pub trait NativeType {
    /// Returns the kind describing this type.
    fn native_kind() -> NativeKind;
}

/// A Rust type that can be built from an argument [`Value`].
pub trait FromValue: Sized {
    /// Converts an argument.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] if `value` has the wrong shape or does
    /// not fit the target type.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

/// A Rust type that can be returned to the expression language.
pub trait IntoValue {
    /// Converts a result. The error is a message describing the failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the result carries a failure or has no value
    /// representation.
    fn into_value(self) -> Result<Value, String>;
}

impl NativeType for String {
    fn native_kind() -> NativeKind {
        NativeKind::String
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ConversionError::new("string", other.kind().to_string())),
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Result<Value, String> {
        Ok(Value::String(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Result<Value, String> {
        Ok(Value::String(self.to_string()))
    }
}

impl NativeType for &str {
    fn native_kind() -> NativeKind {
        NativeKind::String
    }
}

impl NativeType for bool {
    fn native_kind() -> NativeKind {
        NativeKind::Bool
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ConversionError::new("bool", other.kind().to_string())),
        }
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Result<Value, String> {
        Ok(Value::Bool(self))
    }
}

macro_rules! integer_types {
    ($($ty:ty),* $(,)?) => {$(
        impl NativeType for $ty {
            fn native_kind() -> NativeKind {
                NativeKind::Number
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ConversionError> {
                // `MAX as f64` rounds up for 64 bit types, so the upper bound
                // is the exclusive power of two.
                let upper = 2f64.powi(<$ty>::BITS as i32 - i32::from(<$ty>::MIN != 0));
                match value {
                    Value::Number(n) if n.fract() == 0.0 && n >= <$ty>::MIN as f64 && n < upper => {
                        Ok(n as $ty)
                    }
                    Value::Number(n) => Err(ConversionError::new(stringify!($ty), n.to_string())),
                    other => Err(ConversionError::new("number", other.kind().to_string())),
                }
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Result<Value, String> {
                Ok(Value::Number(self as f64))
            }
        }
    )*};
}

integer_types!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_types {
    ($($ty:ty),* $(,)?) => {$(
        impl NativeType for $ty {
            fn native_kind() -> NativeKind {
                NativeKind::Number
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::Number(n) => Ok(n as $ty),
                    other => Err(ConversionError::new("number", other.kind().to_string())),
                }
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Result<Value, String> {
                Ok(Value::Number(f64::from(self)))
            }
        }
    )*};
}

float_types!(f32, f64);

impl<T: NativeType> NativeType for Vec<T> {
    fn native_kind() -> NativeKind {
        NativeKind::List(Box::new(T::native_kind()))
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ConversionError::new("list", other.kind().to_string())),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Result<Value, String> {
        self.into_iter()
            .map(IntoValue::into_value)
            .collect::<Result<_, _>>()
            .map(Value::List)
    }
}

macro_rules! map_types {
    ($($map:ident),* $(,)?) => {$(
        impl<T: NativeType> NativeType for $map<String, T> {
            fn native_kind() -> NativeKind {
                NativeKind::Map(Box::new(T::native_kind()))
            }
        }

        impl<T: FromValue> FromValue for $map<String, T> {
            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::Map(entries) => entries
                        .into_iter()
                        .map(|(key, value)| T::from_value(value).map(|value| (key, value)))
                        .collect(),
                    other => Err(ConversionError::new("map", other.kind().to_string())),
                }
            }
        }

        impl<T: IntoValue> IntoValue for $map<String, T> {
            fn into_value(self) -> Result<Value, String> {
                self.into_iter()
                    .map(|(key, value)| value.into_value().map(|value| (key, value)))
                    .collect::<Result<_, _>>()
                    .map(Value::Map)
            }
        }
    )*};
}

map_types!(BTreeMap, HashMap);

impl<T: NativeType, E> NativeType for Result<T, E> {
    fn native_kind() -> NativeKind {
        T::native_kind()
    }
}

impl<T: IntoValue, E: fmt::Display> IntoValue for Result<T, E> {
    fn into_value(self) -> Result<Value, String> {
        self.map_err(|err| err.to_string())?.into_value()
    }
}

impl NativeType for () {
    fn native_kind() -> NativeKind {
        NativeKind::Unit
    }
}

impl IntoValue for () {
    fn into_value(self) -> Result<Value, String> {
        Err("unit has no value".to_string())
    }
}

/// A callable passed to or returned from a native function.
///
/// Its kind is [`NativeKind::Function`], which the expression language
/// cannot represent, so any function mentioning it fails to adapt.
#[derive(Clone)]
pub struct Callback(Arc<Body>);

impl Callback {
    /// Wraps a closure.
    pub fn new(f: impl Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Calls the wrapped closure.
    ///
    /// # Errors
    ///
    /// Returns whatever the closure returns.
    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        (self.0)(args)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

impl NativeType for Callback {
    fn native_kind() -> NativeKind {
        NativeKind::Function
    }
}

impl FromValue for Callback {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Err(ConversionError::new("function", value.kind().to_string()))
    }
}

impl IntoValue for Callback {
    fn into_value(self) -> Result<Value, String> {
        Err("functions cannot be returned as values".to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Native functions
// ─────────────────────────────────────────────────────────────────────

/// A named native function with its signature descriptor.
///
/// Pass it to [`adapt`](crate::adapt) to obtain something the expression
/// evaluator can call.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    signature: NativeSignature,
    pub(crate) body: Arc<Body>,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

fn argument<A: FromValue>(name: &str, args: &[Value], index: usize) -> Result<A, FunctionError> {
    let value = args.get(index).cloned().ok_or_else(|| FunctionError::ArgumentCount {
        name: name.to_string(),
        expected: index + 1,
        actual: args.len(),
    })?;

    A::from_value(value).map_err(|source| FunctionError::ArgumentType {
        name: name.to_string(),
        index,
        source,
    })
}

macro_rules! from_fn {
    ($(#[$attr:meta])* $method:ident: $($arg:ident @ $index:tt),+) => {
        $(#[$attr])*
        pub fn $method<$($arg,)+ R, F>(name: impl Into<String>, f: F) -> Self
        where
            $($arg: NativeType + FromValue,)+
            R: NativeType + IntoValue,
            F: Fn($($arg),+) -> R + Send + Sync + 'static,
        {
            let name = name.into();
            let signature = NativeSignature::new(vec![$($arg::native_kind()),+], R::native_kind());
            let fn_name = name.clone();

            Self::new(name, signature, move |args| {
                f($(argument::<$arg>(&fn_name, args, $index)?),+)
                    .into_value()
                    .map_err(|message| FunctionError::execution(fn_name.as_str(), message))
            })
        }
    };
}

impl NativeFunction {
    /// Creates a function from an explicit signature and a body over
    /// [`Value`]s.
    pub fn new(
        name: impl Into<String>,
        signature: NativeSignature,
        body: impl Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            signature,
            body: Arc::new(body),
        }
    }

    /// Creates a function taking no arguments, deriving the signature from
    /// the return type.
    pub fn from_fn0<R, F>(name: impl Into<String>, f: F) -> Self
    where
        R: NativeType + IntoValue,
        F: Fn() -> R + Send + Sync + 'static,
    {
        let name = name.into();
        let signature = NativeSignature::new(Vec::new(), R::native_kind());
        let fn_name = name.clone();

        Self::new(name, signature, move |_| {
            f().into_value()
                .map_err(|message| FunctionError::execution(fn_name.as_str(), message))
        })
    }

    from_fn! {
        /// Creates a one argument function, deriving the signature from the
        /// Rust types.
        from_fn1: A @ 0
    }

    from_fn! {
        /// Creates a two argument function, deriving the signature from the
        /// Rust types.
        ///
        /// ```
        /// use confgraph_functions::{NativeFunction, NativeKind};
        ///
        /// let add = NativeFunction::from_fn2("add", |a: i64, b: i64| a + b);
        /// assert_eq!(add.signature().params, vec![NativeKind::Number, NativeKind::Number]);
        /// ```
        from_fn2: A @ 0, B @ 1
    }

    from_fn! {
        /// Creates a three argument function, deriving the signature from the
        /// Rust types.
        from_fn3: A @ 0, B @ 1, C @ 2
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the signature descriptor.
    #[must_use]
    pub fn signature(&self) -> &NativeSignature {
        &self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_kinds_from_rust_types() {
        assert_eq!(String::native_kind(), NativeKind::String);
        assert_eq!(u16::native_kind(), NativeKind::Number);
        assert_eq!(
            <Vec<BTreeMap<String, bool>>>::native_kind(),
            NativeKind::List(Box::new(NativeKind::Map(Box::new(NativeKind::Bool))))
        );
        assert_eq!(<Result<f64, String>>::native_kind(), NativeKind::Number);
        assert_eq!(Callback::native_kind(), NativeKind::Function);
    }

    #[test]
    fn nested_function_kind_is_unsupported() {
        let kind = NativeKind::List(Box::new(NativeKind::Function));
        assert_eq!(
            ExprType::try_from(&kind),
            Err(UnsupportedKind(kind.clone()))
        );
        assert_eq!(
            UnsupportedKind(kind).to_string(),
            "list(function) has no expression type"
        );
    }

    #[test]
    fn integers_reject_fractions_and_overflow() {
        assert_eq!(i32::from_value(Value::Number(42.0)), Ok(42));
        assert!(i32::from_value(Value::Number(1.5)).is_err());
        assert!(u8::from_value(Value::Number(256.0)).is_err());
        assert!(u8::from_value(Value::Number(-1.0)).is_err());
        assert!(i64::from_value(Value::Number(f64::NAN)).is_err());

        let two_63 = 2f64.powi(63);
        let two_64 = 2f64.powi(64);
        assert!(i64::from_value(Value::Number(two_63)).is_err());
        assert_eq!(i64::from_value(Value::Number(-two_63)), Ok(i64::MIN));
        assert!(u64::from_value(Value::Number(two_64)).is_err());
        assert_eq!(u64::from_value(Value::Number(two_63)), Ok(1_u64 << 63));
        assert!(usize::from_value(Value::Number(two_64)).is_err());
        assert_eq!(u8::from_value(Value::Number(255.0)), Ok(u8::MAX));

        let err = u8::from_value(Value::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "expected number, got bool");
    }

    #[test]
    fn maps_convert_both_ways() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::Number(1.0));
        entries.insert("b".to_string(), Value::Number(2.0));

        let map = HashMap::<String, u32>::from_value(Value::Map(entries.clone())).unwrap();
        assert_eq!(map["b"], 2);

        assert_eq!(map.into_value(), Ok(Value::Map(entries)));
    }

    #[test]
    fn failed_result_becomes_message() {
        let result: Result<String, String> = Err("boom".into());
        assert_eq!(result.into_value(), Err("boom".to_string()));
    }
}
