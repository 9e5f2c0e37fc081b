//! Read-side queries: positions of descendants and inherited directives.
//!
//! These are pure reads over whatever the store currently holds. Failure is
//! always expressed as an absent value — `None` or an empty map — never a
//! panic: a query against a malformed path or an untracked tree simply finds
//! nothing.

use crate::store::SourceMap;
use crate::types::FilePosition;
use json_value::{JsonMap, PathSegment, Value};

/// A resolved path: the container holding the addressed node, plus the final
/// segment (or `None` when the path addressed the container itself).
struct DataRef {
    parent: Value,
    index: Option<PathSegment>,
}

/// Resolve `path` against `object` without descending through the final
/// segment.
///
/// `None` when a non-final segment lands on a missing or primitive value.
fn resolve_path(object: &Value, path: Option<&[PathSegment]>) -> Option<DataRef> {
    let Some(path) = path else {
        return Some(DataRef {
            parent: object.clone(),
            index: None,
        });
    };

    let mut parent = object.clone();
    let mut index: Option<PathSegment> = None;
    for segment in path {
        if let Some(previous) = index.take() {
            let child = parent.get(&previous)?.clone();
            if !child.is_container() {
                return None;
            }
            parent = child;
        }
        index = Some(segment.clone());
    }
    Some(DataRef { parent, index })
}

impl SourceMap {
    /// The recorded position of a value, if it is tracked.
    pub fn file_position(&self, value: &Value) -> Option<FilePosition> {
        self.lookup(value).map(|record| record.position().clone())
    }

    /// The position of `data`'s child at `index`.
    ///
    /// A primitive child has no record of its own; its position comes from
    /// `data`'s record's primitive-property positions. With no index, this
    /// is the position of `data` itself.
    pub fn child_file_position(
        &self,
        data: &Value,
        index: Option<&PathSegment>,
    ) -> Option<FilePosition> {
        let Some(index) = index else {
            return self.file_position(data);
        };
        let child = data.get(index)?;
        if child.is_primitive() {
            let record = self.lookup(data)?;
            return record.primitive_position(index).cloned();
        }
        self.file_position(child)
    }

    /// The position of the descendant addressed by `path`.
    ///
    /// `None` when the path does not resolve or no position was recorded.
    pub fn descendant_file_position(
        &self,
        object: &Value,
        path: Option<&[PathSegment]>,
    ) -> Option<FilePosition> {
        let data_ref = resolve_path(object, path)?;
        self.child_file_position(&data_ref.parent, data_ref.index.as_ref())
    }

    /// All directives in scope at the descendant addressed by `path`.
    ///
    /// Directive maps are collected from the resolved node's position up
    /// through every ancestor position to the root, then merged with
    /// closer-wins precedence. An unresolvable path — or a tree with no
    /// directives anywhere — yields an empty map; the two cases are not
    /// distinguished.
    pub fn all_directives(&self, object: &Value, path: Option<&[PathSegment]>) -> JsonMap {
        let Some(data_ref) = resolve_path(object, path) else {
            return JsonMap::new();
        };

        // leaf-to-root collection
        let mut collected: Vec<JsonMap> = Vec::new();
        if data_ref.index.is_some() {
            if let Some(position) =
                self.child_file_position(&data_ref.parent, data_ref.index.as_ref())
            {
                if let Some(directives) = position.directives {
                    collected.push(directives);
                }
            }
        }
        if let Some(record) = self.lookup(&data_ref.parent) {
            for ancestor in self.ancestor_records(record) {
                if let Some(directives) = &ancestor.position().directives {
                    collected.push(directives.clone());
                }
            }
        }

        // root-to-leaf merge: closer entries override
        let mut merged = JsonMap::new();
        for directives in collected.into_iter().rev() {
            for (name, value) in directives {
                merged.insert(name, value);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProvenanceRecord;
    use serde_json::json;
    use std::rc::Rc;

    fn directives(entries: serde_json::Value) -> JsonMap {
        Value::from(entries).as_object().unwrap().clone()
    }

    fn segments(path: &[&str]) -> Vec<PathSegment> {
        path.iter().map(|s| PathSegment::from(*s)).collect()
    }

    /// A document `{ "ttt": 12, "nested": { "deep": [true] } }` with
    /// directives on the root and on the primitive property `ttt`.
    fn document(map: &SourceMap) -> Value {
        let doc = Value::from(json!({ "ttt": 12, "nested": { "deep": [true] } }));
        let root = Rc::new(
            ProvenanceRecord::root(
                "/",
                FilePosition::with_directives(0, 0, directives(json!({ "abracadabra": 75, "b": 34 }))),
            )
            .with_primitive(
                "ttt",
                FilePosition::with_directives(1, 2, directives(json!({ "abracadabra": 57, "a": 43 }))),
            ),
        );
        map.attach(&doc, root);

        let nested = doc.get(&"nested".into()).unwrap().clone();
        map.attach(
            &nested,
            Rc::new(ProvenanceRecord::child(
                doc.clone(),
                "nested",
                FilePosition::new(2, 2),
            )),
        );
        let deep = nested.get(&"deep".into()).unwrap().clone();
        map.attach(
            &deep,
            Rc::new(
                ProvenanceRecord::child(nested, "deep", FilePosition::new(2, 8))
                    .with_primitive(0, FilePosition::new(2, 9)),
            ),
        );
        doc
    }

    #[test]
    fn test_file_position() {
        for map in [SourceMap::new(), SourceMap::arena()] {
            let doc = document(&map);
            assert_eq!(map.file_position(&doc).map(|p| (p.line, p.column)), Some((0, 0)));
            assert!(map.file_position(&Value::empty_array()).is_none());
        }
    }

    #[test]
    fn test_child_file_position_primitive_property() {
        for map in [SourceMap::new(), SourceMap::arena()] {
            let doc = document(&map);
            let position = map
                .child_file_position(&doc, Some(&"ttt".into()))
                .unwrap();
            assert_eq!((position.line, position.column), (1, 2));

            // a property with no recorded primitive position
            assert!(map.child_file_position(&doc, Some(&"missing".into())).is_none());
        }
    }

    #[test]
    fn test_descendant_file_position() {
        for map in [SourceMap::new(), SourceMap::arena()] {
            let doc = document(&map);

            let deep = map
                .descendant_file_position(&doc, Some(&segments(&["nested", "deep"])))
                .unwrap();
            assert_eq!((deep.line, deep.column), (2, 8));

            // primitive at the end of a nested path
            let flag = map
                .descendant_file_position(
                    &doc,
                    Some(&[PathSegment::from("nested"), "deep".into(), 0.into()]),
                )
                .unwrap();
            assert_eq!((flag.line, flag.column), (2, 9));

            // empty path addresses the document itself
            assert_eq!(
                map.descendant_file_position(&doc, None).map(|p| p.line),
                Some(0)
            );

            // invalid paths resolve to nothing
            assert!(map
                .descendant_file_position(&doc, Some(&segments(&["ttt", "beyond"])))
                .is_none());
            assert!(map
                .descendant_file_position(&doc, Some(&segments(&["nope", "beyond"])))
                .is_none());
        }
    }

    #[test]
    fn test_all_directives_closer_wins() {
        for map in [SourceMap::new(), SourceMap::arena()] {
            let doc = document(&map);
            let merged = map.all_directives(&doc, Some(&segments(&["ttt"])));
            assert_eq!(
                merged,
                directives(json!({ "a": 43, "abracadabra": 57, "b": 34 }))
            );
        }
    }

    #[test]
    fn test_all_directives_root_only() {
        for map in [SourceMap::new(), SourceMap::arena()] {
            let doc = document(&map);
            assert_eq!(
                map.all_directives(&doc, None),
                directives(json!({ "abracadabra": 75, "b": 34 }))
            );
            // a child with no directives of its own inherits the root's
            assert_eq!(
                map.all_directives(&doc, Some(&segments(&["nested", "deep"]))),
                directives(json!({ "abracadabra": 75, "b": 34 }))
            );
        }
    }

    #[test]
    fn test_all_directives_invalid_path_is_empty() {
        for map in [SourceMap::new(), SourceMap::arena()] {
            let doc = document(&map);
            assert!(map
                .all_directives(&doc, Some(&segments(&["ttt", "extra"])))
                .is_empty());
        }
    }

    #[test]
    fn test_all_directives_untracked_tree_is_empty() {
        let map = SourceMap::new();
        let doc = Value::from(json!({ "a": 1 }));
        assert!(map.all_directives(&doc, Some(&segments(&["a"]))).is_empty());
    }
}
