use crate::data::Value;
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::fmt;
use std::time::Duration;

type Thunk = Box<dyn FnOnce() -> Option<Value> + Send>;

/// One positional argument to a template.
///
/// Either a ready value or a deferred computation. Deferred arguments
/// run only when the event passes the logger's level filter, and at
/// most once since they are consumed on resolution.
pub enum Arg {
    Value(Value),
    Deferred(Thunk),
}

impl Arg {
    /// Defer an expensive computation until the event is rendered.
    pub fn lazy<F, V>(f: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
        V: Into<Value>,
    {
        Arg::Deferred(Box::new(move || Some(f().into())))
    }

    /// Like [`Arg::lazy`], for computations that may produce nothing.
    /// `None` resolves to [`Value::Null`].
    pub fn lazy_opt<F, V>(f: F) -> Self
    where
        F: FnOnce() -> Option<V> + Send + 'static,
        V: Into<Value>,
    {
        Arg::Deferred(Box::new(move || f().map(Into::into)))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Arg::Deferred(_))
    }

    /// Produce the concrete value, running a deferred computation.
    pub fn resolve(self) -> Value {
        match self {
            Arg::Value(v) => v,
            Arg::Deferred(f) => f().unwrap_or(Value::Null),
        }
    }
}

macro_rules! impl_from_value {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Arg {
                fn from(v: $source) -> Self {
                    Arg::Value(v.into())
                }
            }
        )*
    };
}

impl_from_value!(
    Value, bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
    &str, String, &String, Duration,
    DateTime<FixedOffset>, DateTime<Utc>, DateTime<Local>,
);

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(v.into())
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Build a `Vec<Arg>` from heterogeneous expressions.
///
/// ```
/// use templated_log::{args, Arg};
///
/// let args = args![1, "two", Arg::lazy(|| 3.0)];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn deferred_runs_on_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let arg = Arg::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            2 + 2
        });

        assert!(arg.is_deferred());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(arg.resolve(), Value::Int(4));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_deferred_is_null() {
        let arg = Arg::lazy_opt(|| None::<String>);
        assert_eq!(arg.resolve(), Value::Null);
    }

    #[test]
    fn macro_converts_each_expression() {
        let args = args![1u8, "a", Value::Bool(true)];
        let values: Vec<Value> = args.into_iter().map(Arg::resolve).collect();
        assert_eq!(
            values,
            vec![Value::UInt(1), Value::Str("a".into()), Value::Bool(true)]
        );
        assert!(args![].is_empty());
    }
}
