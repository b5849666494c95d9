use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::time::Duration;

/// A single structured value carried by a log event.
///
/// Arguments passed to a template and values attached to a logger's
/// context both end up as one of these variants. Types without a
/// dedicated variant enter through [`Value::display`] or [`Value::debug`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Time(DateTime<FixedOffset>),
    Duration(Duration),
}

impl Value {
    /// Capture any `Display` type as its string form.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Str(value.to_string())
    }

    /// Capture any `Debug` type as its `{:?}` form.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Str(format!("{:?}", value))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            Value::Int(v) => Some(v as f64),
            Value::UInt(v) => Some(v as f64),
            _ => None,
        }
    }
}

/// Natural string form. Timestamps use RFC 3339 here; the template
/// engine applies the configured layout instead.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
            Value::Time(v) => f.write_str(&v.to_rfc3339()),
            Value::Duration(v) => write!(f, "{:?}", v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Time(v) => serializer.serialize_str(&v.to_rfc3339()),
            Value::Duration(v) => serializer.serialize_f64(v.as_secs_f64()),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from!(Int as i64: i8, i16, i32, i64, isize);
impl_from!(UInt as u64: u8, u16, u32, u64, usize);
impl_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Time(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v.fixed_offset())
    }
}

impl From<DateTime<Local>> for Value {
    fn from(v: DateTime<Local>) -> Self {
        Value::Time(v.fixed_offset())
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// String-keyed record of structured values.
///
/// Used both for the context a [`Logger`](crate::logger::Logger)
/// accumulates and for the details extracted from a template. Cloning
/// copies the mapping, so extending a clone never affects the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data(BTreeMap<String, Value>);

impl Data {
    pub fn new() -> Self {
        Data(BTreeMap::new())
    }

    /// Insert or overwrite `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`Data::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Copy every entry of `other` into `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: &Data) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Non-mutating form of [`Data::merge`].
    pub fn merged(&self, other: &Data) -> Data {
        let mut result = self.clone();
        result.merge(other);
        result
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Data(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Data {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Data {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_right_hand_side() {
        let left = Data::new().with("a", 1).with("b", "left");
        let right = Data::new().with("b", "right").with("c", 3.5);

        let merged = left.merged(&right);

        assert_eq!(merged.get("a"), Some(&Value::Int(1)));
        assert_eq!(merged.get("b"), Some(&Value::Str("right".into())));
        assert_eq!(merged.get("c"), Some(&Value::Float(3.5)));
        // original untouched
        assert_eq!(left.get("b"), Some(&Value::Str("left".into())));
        assert!(!left.contains_key("c"));
    }

    #[test]
    fn clone_is_independent() {
        let original = Data::new().with("k", "v");
        let mut copy = original.clone();
        copy.set("k", "changed").set("extra", true);

        assert_eq!(original.get("k"), Some(&Value::Str("v".into())));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn later_set_overwrites() {
        let mut data = Data::new();
        data.set("k", 1).set("k", 2);
        assert_eq!(data.get("k"), Some(&Value::Int(2)));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(7u8)), Value::UInt(7));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(4.5).to_string(), "4.5");
        assert_eq!(Value::from("three").to_string(), "three");
        assert_eq!(Value::from(Duration::from_millis(1)).to_string(), "1ms");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn display_and_debug_capture_other_types() {
        let addr = std::net::Ipv4Addr::new(10, 0, 0, 1);
        assert_eq!(Value::display(&addr), Value::Str("10.0.0.1".into()));
        assert_eq!(Value::debug(&[1, 2]), Value::Str("[1, 2]".into()));

        let data = Data::new().with("peer", Value::display(&addr));
        assert_eq!(data.get("peer"), Some(&Value::Str("10.0.0.1".into())));
    }

    #[test]
    fn serializes_as_flat_object() {
        let data = Data::new()
            .with("n", 1)
            .with("s", "x")
            .with("none", Value::Null)
            .with("d", Duration::from_millis(1500));
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"d":1.5,"n":1,"none":null,"s":"x"}"#);
    }
}
