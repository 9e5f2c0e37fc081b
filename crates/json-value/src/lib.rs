//! # json-value
//!
//! Immutable JSON value trees with object identity.
//!
//! This crate provides [`Value`], a JSON-like value whose containers (arrays
//! and objects) are reference-counted and therefore have a stable *identity*
//! distinct from their contents. Identity is what lets out-of-band metadata
//! (such as source provenance in `json-source-map`) be associated with a
//! specific node rather than with every structurally-equal copy of it.
//!
//! Objects preserve key insertion order (`indexmap`), matching the behavior
//! of the configuration documents these trees are parsed from.
//!
//! ## Example
//!
//! ```rust
//! use json_value::Value;
//!
//! let a = Value::from(serde_json::json!({ "title": "doc", "tags": ["x"] }));
//! let b = a.clone();
//!
//! // Clones share identity; structurally-equal rebuilds do not.
//! assert!(a.ptr_eq(&b));
//! let rebuilt = Value::from(serde_json::json!({ "title": "doc", "tags": ["x"] }));
//! assert!(!a.ptr_eq(&rebuilt));
//! assert_eq!(a, rebuilt);
//! ```

mod convert;
mod path;
mod value;

pub use convert::ConvertError;
pub use path::PathSegment;
pub use value::{JsonMap, Value, ValueId};
