use std::fmt::{Debug, Formatter};

use crate::common::path::get_path;
use crate::common::{Key, Value};

/// A value extractor accepted wherever a dotted path or a function can be
/// used interchangeably.
///
/// The two spellings, a path string or a callback, are explicit variants
/// resolved once at call entry:
///
/// ```ignore
/// let by_path: Selector = "price".into();
/// let by_func = Selector::func(|value, _key| value.clone());
/// ```
pub enum Selector {
    /// A dotted path resolved through the path accessor with a null
    /// default.
    Path(String),
    /// A function of (value, key).
    Func(Box<dyn Fn(&Value, &Key) -> Value>),
}

impl Selector {
    /// Creates a path selector.
    pub fn path(path: impl Into<String>) -> Self {
        Selector::Path(path.into())
    }

    /// Creates a function selector.
    pub fn func<F: Fn(&Value, &Key) -> Value + 'static>(f: F) -> Self {
        Selector::Func(Box::new(f))
    }

    /// Extracts the selected value from an entry.
    pub fn select(&self, value: &Value, key: &Key) -> Value {
        match self {
            Selector::Path(path) => get_path(value, Some(path), Fallback::null()),
            Selector::Func(f) => f(value, key),
        }
    }
}

impl Debug for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Path(path) => write!(f, "Selector::Path({:?})", path),
            Selector::Func(_) => write!(f, "Selector::Func(..)"),
        }
    }
}

impl From<&str> for Selector {
    fn from(path: &str) -> Self {
        Selector::Path(path.to_string())
    }
}

impl From<String> for Selector {
    fn from(path: String) -> Self {
        Selector::Path(path)
    }
}

/// A default used by accessors when nothing matches: a literal value or a
/// supplier invoked lazily on the miss.
pub enum Fallback {
    /// Literal default value.
    Value(Value),
    /// Zero-argument producer, invoked only when the default is needed.
    Supplier(Box<dyn Fn() -> Value>),
}

impl Fallback {
    /// The conventional null default.
    pub fn null() -> Self {
        Fallback::Value(Value::Null)
    }

    /// A literal default.
    pub fn value<T: Into<Value>>(value: T) -> Self {
        Fallback::Value(value.into())
    }

    /// A lazily produced default.
    pub fn supplier<F: Fn() -> Value + 'static>(f: F) -> Self {
        Fallback::Supplier(Box::new(f))
    }

    /// Resolves the default, invoking a supplier.
    pub fn resolve(self) -> Value {
        match self {
            Fallback::Value(v) => v,
            Fallback::Supplier(f) => f(),
        }
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Fallback::null()
    }
}

impl Debug for Fallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Fallback::Value(v) => write!(f, "Fallback::Value({:?})", v),
            Fallback::Supplier(_) => write!(f, "Fallback::Supplier(..)"),
        }
    }
}
