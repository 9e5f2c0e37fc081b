//! Columnar arena storage for provenance records.
//!
//! The arena stores record fields in parallel arrays keyed by a
//! monotonically increasing [`RecordHandle`], trading per-record allocation
//! for flat struct-of-arrays storage. A tracked value is associated with a
//! handle only; `get` reconstructs the full [`ProvenanceRecord`] by
//! denormalizing the columns, and the round trip preserves every field
//! exactly (position, url or parent/property link, directives, and
//! primitive-property positions).
//!
//! Growth is append-only. The arena is scoped to its owning `SourceMap` —
//! one per logical document — and is released by `SourceMap::reset` or by
//! dropping the map.

use crate::record::{PrimitivePositions, ProvenanceRecord};
use crate::types::FilePosition;
use json_value::{JsonMap, PathSegment, Value};

/// Index of a record in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(pub(crate) u32);

/// Sentinel for "no directives" in the directive-index columns.
const NO_DIRECTIVES: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Root,
    Child,
}

/// Struct-of-arrays record storage.
///
/// One entry per record in `kind`/`line`/`column`/`directive`/`link`/
/// `prim_start`/`prim_len`; the remaining vectors are pools the per-record
/// columns index into.
#[derive(Debug, Default)]
pub(crate) struct RecordArena {
    kind: Vec<RecordKind>,
    line: Vec<u32>,
    column: Vec<u32>,
    /// Index into `directives`, or `NO_DIRECTIVES`
    directive: Vec<u32>,
    /// Root: index into `urls`; Child: index into `parents`/`properties`
    link: Vec<u32>,
    prim_start: Vec<u32>,
    prim_len: Vec<u32>,

    urls: Vec<String>,
    parents: Vec<Value>,
    properties: Vec<PathSegment>,
    directives: Vec<JsonMap>,

    prim_keys: Vec<String>,
    prim_lines: Vec<u32>,
    prim_columns: Vec<u32>,
    /// Index into `directives`, or `NO_DIRECTIVES`
    prim_directives: Vec<u32>,
}

impl RecordArena {
    pub(crate) fn len(&self) -> usize {
        self.kind.len()
    }

    pub(crate) fn clear(&mut self) {
        let RecordArena {
            kind,
            line,
            column,
            directive,
            link,
            prim_start,
            prim_len,
            urls,
            parents,
            properties,
            directives,
            prim_keys,
            prim_lines,
            prim_columns,
            prim_directives,
        } = self;
        kind.clear();
        line.clear();
        column.clear();
        directive.clear();
        link.clear();
        prim_start.clear();
        prim_len.clear();
        urls.clear();
        parents.clear();
        properties.clear();
        directives.clear();
        prim_keys.clear();
        prim_lines.clear();
        prim_columns.clear();
        prim_directives.clear();
    }

    fn push_directives(&mut self, directives: &Option<JsonMap>) -> u32 {
        match directives {
            None => NO_DIRECTIVES,
            Some(map) => {
                self.directives.push(map.clone());
                (self.directives.len() - 1) as u32
            }
        }
    }

    fn directives_at(&self, index: u32) -> Option<JsonMap> {
        if index == NO_DIRECTIVES {
            None
        } else {
            Some(self.directives[index as usize].clone())
        }
    }

    /// Decompose a record into the columns; returns its handle.
    pub(crate) fn push(&mut self, record: &ProvenanceRecord) -> RecordHandle {
        let handle = RecordHandle(self.kind.len() as u32);

        let position = record.position();
        self.line.push(position.line);
        self.column.push(position.column);
        let directive = self.push_directives(&position.directives);
        self.directive.push(directive);

        let prim = record.primitive_properties();
        self.prim_start.push(self.prim_keys.len() as u32);
        self.prim_len.push(prim.len() as u32);
        for (key, position) in prim {
            self.prim_keys.push(key.clone());
            self.prim_lines.push(position.line);
            self.prim_columns.push(position.column);
            let prim_directive = self.push_directives(&position.directives);
            self.prim_directives.push(prim_directive);
        }

        match record {
            ProvenanceRecord::Root { url, .. } => {
                self.kind.push(RecordKind::Root);
                self.urls.push(url.clone());
                self.link.push((self.urls.len() - 1) as u32);
            }
            ProvenanceRecord::Child {
                parent, property, ..
            } => {
                self.kind.push(RecordKind::Child);
                self.parents.push(parent.clone());
                self.properties.push(property.clone());
                self.link.push((self.parents.len() - 1) as u32);
            }
        }

        handle
    }

    /// Reconstruct the full record stored at `handle`.
    pub(crate) fn get(&self, handle: RecordHandle) -> ProvenanceRecord {
        let i = handle.0 as usize;
        let position = FilePosition {
            line: self.line[i],
            column: self.column[i],
            directives: self.directives_at(self.directive[i]),
        };

        let start = self.prim_start[i] as usize;
        let len = self.prim_len[i] as usize;
        let mut primitive_properties = PrimitivePositions::with_capacity(len);
        for p in start..start + len {
            primitive_properties.insert(
                self.prim_keys[p].clone(),
                FilePosition {
                    line: self.prim_lines[p],
                    column: self.prim_columns[p],
                    directives: self.directives_at(self.prim_directives[p]),
                },
            );
        }

        let link = self.link[i] as usize;
        match self.kind[i] {
            RecordKind::Root => ProvenanceRecord::Root {
                url: self.urls[link].clone(),
                position,
                primitive_properties,
            },
            RecordKind::Child => ProvenanceRecord::Child {
                parent: self.parents[link].clone(),
                property: self.properties[link].clone(),
                position,
                primitive_properties,
            },
        }
    }
}
