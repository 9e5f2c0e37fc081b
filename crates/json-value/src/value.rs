//! The JSON value model.

use crate::path::PathSegment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// An ordered JSON object (insertion-ordered keys).
pub type JsonMap = IndexMap<String, Value>;

/// An immutable JSON-like value.
///
/// Containers are `Rc`-shared: cloning a `Value` clones the handle, not the
/// contents, so a clone has the same identity as the original. Building a new
/// container (even one with equal contents) produces a new identity.
///
/// `Rc` rather than `Arc`: these trees are owned by a single logical thread
/// for the duration of a parse-and-transform pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Rc<Vec<Value>>),
    Object(Rc<JsonMap>),
}

/// The identity of a container value.
///
/// Derived from the container's allocation address, so it is stable for as
/// long as the container is alive and is never shared by two live
/// containers. Holders of a `ValueId` must keep the container alive
/// themselves; the id does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(usize);

impl Value {
    /// Build an array value from its elements.
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(items))
    }

    /// Build an object value from an ordered map.
    pub fn object(entries: JsonMap) -> Value {
        Value::Object(Rc::new(entries))
    }

    /// An empty array with a fresh identity.
    pub fn empty_array() -> Value {
        Value::array(Vec::new())
    }

    /// An empty object with a fresh identity.
    pub fn empty_object() -> Value {
        Value::object(JsonMap::new())
    }

    /// True for `Null`, booleans, numbers, and strings.
    pub fn is_primitive(&self) -> bool {
        !self.is_container()
    }

    /// True for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// The identity of this value, or `None` for primitives.
    pub fn identity(&self) -> Option<ValueId> {
        match self {
            Value::Array(items) => Some(ValueId(Rc::as_ptr(items) as usize)),
            Value::Object(entries) => Some(ValueId(Rc::as_ptr(entries) as usize)),
            _ => None,
        }
    }

    /// Reference identity: do `self` and `other` share the same container?
    ///
    /// Always false when either side is a primitive.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Index into this value by a path segment.
    ///
    /// Key segments resolve against objects, index segments against arrays;
    /// anything else is `None`.
    pub fn get(&self, segment: &PathSegment) -> Option<&Value> {
        match (self, segment) {
            (Value::Object(entries), PathSegment::Key(key)) => entries.get(key.as_str()),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        }
    }
}

/// Deep structural equality with a reference-identity fast path on
/// containers: two values sharing a container compare equal without
/// descending into it.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::array(items)
    }
}

impl From<JsonMap> for Value {
    fn from(entries: JsonMap) -> Value {
        Value::object(entries)
    }
}
