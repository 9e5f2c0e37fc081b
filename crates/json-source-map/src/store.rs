//! Out-of-band association between value identity and provenance records.
//!
//! A [`SourceMap`] is an explicit context object: one per logical document,
//! passed to every operation that reads or writes provenance. Association is
//! keyed by container identity, so it never alters a value's shape, keys, or
//! equality against an untracked copy.
//!
//! Two interchangeable backends:
//!
//! - **Side table** ([`SourceMap::new`]): full records in an identity-keyed
//!   hash map. Simple, and lookups hand back the very record that was
//!   attached.
//! - **Arena** ([`SourceMap::arena`]): records decomposed into columnar
//!   arrays ([`RecordHandle`] indirection), for high-volume documents where
//!   a per-node allocation is too costly. Lookups reconstruct the record
//!   from the columns.
//!
//! Association state lives behind a `RefCell`: the map is single-threaded
//! (`Rc`-based values already pin it to one thread), and transform mappers
//! must be able to attach records while a combinator holds the map. No
//! method keeps a borrow across a call into user code.

use crate::arena::{RecordArena, RecordHandle};
use crate::record::ProvenanceRecord;
use json_value::{Value, ValueId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Provenance store for one logical document.
#[derive(Debug, Default)]
pub struct SourceMap {
    backend: RefCell<Backend>,
}

#[derive(Debug)]
enum Backend {
    SideTable {
        records: HashMap<ValueId, Rc<ProvenanceRecord>>,
        retained: Vec<Value>,
    },
    Arena {
        handles: HashMap<ValueId, RecordHandle>,
        arena: RecordArena,
        retained: Vec<Value>,
    },
}

// Identity keys are container addresses; `retained` keeps every tracked
// container alive so an address is never reused while the map exists.

impl Default for Backend {
    fn default() -> Self {
        Backend::SideTable {
            records: HashMap::new(),
            retained: Vec::new(),
        }
    }
}

impl SourceMap {
    /// A source map with the side-table backend.
    pub fn new() -> Self {
        SourceMap {
            backend: RefCell::new(Backend::default()),
        }
    }

    /// A source map with the columnar arena backend.
    pub fn arena() -> Self {
        SourceMap {
            backend: RefCell::new(Backend::Arena {
                handles: HashMap::new(),
                arena: RecordArena::default(),
                retained: Vec::new(),
            }),
        }
    }

    /// Associate `record` with `value` if and only if `value` has no record
    /// yet. Returns `value` (same identity) either way; safe to call
    /// redundantly. A no-op for primitives, which cannot carry records.
    pub fn attach(&self, value: &Value, record: Rc<ProvenanceRecord>) -> Value {
        let Some(id) = value.identity() else {
            return value.clone();
        };
        match &mut *self.backend.borrow_mut() {
            Backend::SideTable { records, retained } => {
                if !records.contains_key(&id) {
                    records.insert(id, record);
                    retained.push(value.clone());
                }
            }
            Backend::Arena {
                handles,
                arena,
                retained,
            } => {
                if !handles.contains_key(&id) {
                    let handle = arena.push(&record);
                    handles.insert(id, handle);
                    retained.push(value.clone());
                }
            }
        }
        value.clone()
    }

    /// The record associated with `value`, or `None` for primitives and
    /// untracked values. Never panics.
    pub fn lookup(&self, value: &Value) -> Option<Rc<ProvenanceRecord>> {
        let id = value.identity()?;
        match &*self.backend.borrow() {
            Backend::SideTable { records, .. } => records.get(&id).cloned(),
            Backend::Arena { handles, arena, .. } => {
                handles.get(&id).map(|handle| Rc::new(arena.get(*handle)))
            }
        }
    }

    /// If `source` is tracked, attach its record to `dest`. Returns `dest`.
    pub fn copy(&self, source: &Value, dest: &Value) -> Value {
        match self.lookup(source) {
            Some(record) => self.attach(dest, record),
            None => dest.clone(),
        }
    }

    /// The arena handle of a tracked value.
    ///
    /// `None` for untracked values, and always `None` on the side-table
    /// backend, which has no handle indirection.
    pub fn handle(&self, value: &Value) -> Option<RecordHandle> {
        let id = value.identity()?;
        match &*self.backend.borrow() {
            Backend::SideTable { .. } => None,
            Backend::Arena { handles, .. } => handles.get(&id).copied(),
        }
    }

    /// Number of tracked containers.
    pub fn tracked_len(&self) -> usize {
        match &*self.backend.borrow() {
            Backend::SideTable { records, .. } => records.len(),
            Backend::Arena { arena, .. } => arena.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracked_len() == 0
    }

    /// Drop every association and release the arena columns.
    ///
    /// The map is reusable afterwards; values tracked before the reset are
    /// simply untracked again.
    pub fn reset(&self) {
        tracing::debug!(tracked = self.tracked_len(), "resetting source map");
        match &mut *self.backend.borrow_mut() {
            Backend::SideTable { records, retained } => {
                records.clear();
                retained.clear();
            }
            Backend::Arena {
                handles,
                arena,
                retained,
            } => {
                handles.clear();
                arena.clear();
                retained.clear();
            }
        }
    }
}
