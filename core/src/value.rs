//! # Deferred Values
//!
//! Defaults, bounds and enums may be supplied either as a literal or as a
//! zero-argument thunk evaluated when the owning fragment (or parameter) is built.
//! A thunk is evaluated once per build and the result is frozen into the output.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A value that is either known now or computed on demand.
pub enum Resolvable<T> {
    /// A concrete value.
    Literal(T),
    /// A thunk producing the value.
    Deferred(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Resolvable<T> {
    /// Wraps a thunk.
    pub fn deferred(thunk: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Resolvable::Deferred(Arc::new(thunk))
    }

    /// Returns the concrete value, invoking the thunk if there is one.
    pub fn resolve(&self) -> T {
        match self {
            Resolvable::Literal(value) => value.clone(),
            Resolvable::Deferred(thunk) => thunk(),
        }
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(value: T) -> Self {
        Resolvable::Literal(value)
    }
}

impl<T: Clone> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Resolvable::Literal(value) => Resolvable::Literal(value.clone()),
            Resolvable::Deferred(thunk) => Resolvable::Deferred(Arc::clone(thunk)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolvable::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Resolvable::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Builds a deferred JSON value from any thunk whose output converts into JSON.
///
/// ```
/// use oapispec_core::fields;
/// use oapispec_core::value::deferred;
///
/// let fragment = fields::integer().minimum(deferred(|| 0)).build();
/// assert_eq!(fragment.schema()["minimum"], 0);
/// ```
pub fn deferred<V, F>(thunk: F) -> Resolvable<Value>
where
    V: Into<Value>,
    F: Fn() -> V + Send + Sync + 'static,
{
    Resolvable::deferred(move || thunk().into())
}

macro_rules! literal_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Resolvable<Value> {
                fn from(value: $ty) -> Self {
                    Resolvable::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_json!(i32, i64, u32, u64, usize, f64, bool, &str, String);

impl<T: Into<Value>> From<Vec<T>> for Resolvable<Value> {
    fn from(values: Vec<T>) -> Self {
        Resolvable::Literal(Value::Array(values.into_iter().map(Into::into).collect()))
    }
}
