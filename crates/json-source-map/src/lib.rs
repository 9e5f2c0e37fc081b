//! Source provenance tracking for JSON value trees.
//!
//! This crate associates source positions (document url, line, column, and a
//! path of property accesses) with the containers of an immutable
//! [`json_value::Value`] tree, and keeps those associations intact through
//! the structural transformations downstream tooling performs — mapping,
//! merging, partial rebuilds, deep clones. Validators and code generators
//! that consume a transformed document can therefore still report
//! diagnostics pointing at the original source.
//!
//! # Overview
//!
//! The core types are:
//! - [`SourceMap`]: a per-document store associating container identity with
//!   provenance. Every operation — attachment, transforms, queries — hangs
//!   off it, so independent documents never share state.
//! - [`ProvenanceRecord`]: where a container came from — the `Root` of a
//!   parsed document, or a `Child` reached from a parent container via a
//!   property or index.
//! - [`FilePosition`]: a line/column pair, optionally carrying parser
//!   directives that descendants inherit with closer-wins precedence.
//!
//! # Example
//!
//! ```rust
//! use json_source_map::{FilePosition, ProvenanceRecord, SourceMap};
//! use json_value::Value;
//! use std::rc::Rc;
//!
//! let map = SourceMap::new();
//!
//! // The parser attaches a root record to a freshly parsed document.
//! let doc = Value::from(serde_json::json!(["aaa", "bb", "c"]));
//! let root = Rc::new(ProvenanceRecord::root(
//!     "file:///doc.json",
//!     FilePosition::new(0, 0),
//! ));
//! map.attach(&doc, root);
//!
//! // Transforms thread provenance through: the rebuilt array still
//! // reports the original document position.
//! let doubled = map.array_map(Some(&doc), |v, _| {
//!     let s = v.as_str().unwrap();
//!     Value::from(format!("{s}{s}"))
//! });
//! assert_eq!(doubled, Value::from(serde_json::json!(["aaaaaa", "bbbb", "cc"])));
//! assert_eq!(map.file_position(&doubled), Some(FilePosition::new(0, 0)));
//! ```

mod ancestry;
mod arena;
mod clone;
mod query;
mod record;
mod store;
mod transform;
mod types;

pub use arena::RecordHandle;
pub use record::{PrimitivePositions, ProvenanceRecord};
pub use store::SourceMap;
pub use transform::{PropertyFactory, PropertyOverrides};
pub use types::FilePosition;
