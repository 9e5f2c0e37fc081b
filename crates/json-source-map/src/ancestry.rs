//! Walking a record's parent chain back to its root.

use crate::record::ProvenanceRecord;
use crate::store::SourceMap;
use json_value::PathSegment;
use std::rc::Rc;

/// A child record whose parent has no record means the store contract was
/// violated by whoever produced the chain; there is nothing callers can
/// recover.
const BROKEN_CHAIN: &str = "provenance chain broken: parent value has no record";

impl SourceMap {
    /// The root record at the top of `record`'s parent chain.
    ///
    /// Returns `record` itself when it is already a root.
    ///
    /// # Panics
    ///
    /// Panics if a parent in the chain is untracked; that is an invariant
    /// violation in the code that built the chain, not a recoverable error.
    pub fn root_record(&self, record: Rc<ProvenanceRecord>) -> Rc<ProvenanceRecord> {
        let mut current = record;
        loop {
            let parent = match current.as_ref() {
                ProvenanceRecord::Root { .. } => return current,
                ProvenanceRecord::Child { parent, .. } => parent.clone(),
            };
            current = self.lookup(&parent).expect(BROKEN_CHAIN);
        }
    }

    /// The property-access path from the root down to `record`.
    ///
    /// A root record yields an empty path.
    ///
    /// # Panics
    ///
    /// Panics on a broken parent chain, like [`SourceMap::root_record`].
    pub fn path_of(&self, record: &ProvenanceRecord) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        let mut parent = match record {
            ProvenanceRecord::Root { .. } => return segments,
            ProvenanceRecord::Child {
                parent, property, ..
            } => {
                segments.push(property.clone());
                parent.clone()
            }
        };
        loop {
            let current = self.lookup(&parent).expect(BROKEN_CHAIN);
            match current.as_ref() {
                ProvenanceRecord::Root { .. } => break,
                ProvenanceRecord::Child {
                    parent: next,
                    property,
                    ..
                } => {
                    segments.push(property.clone());
                    parent = next.clone();
                }
            }
        }
        segments.reverse();
        segments
    }

    /// The chain of records from `record` (inclusive) to its root, leaf
    /// first.
    ///
    /// The chain is a finite, restartable sequence: it borrows nothing from
    /// the map once built and can be iterated any number of times.
    ///
    /// # Panics
    ///
    /// Panics on a broken parent chain, like [`SourceMap::root_record`].
    pub fn ancestor_records(&self, record: Rc<ProvenanceRecord>) -> Vec<Rc<ProvenanceRecord>> {
        let mut chain = Vec::new();
        let mut current = record;
        loop {
            let parent = match current.as_ref() {
                ProvenanceRecord::Root { .. } => None,
                ProvenanceRecord::Child { parent, .. } => Some(parent.clone()),
            };
            chain.push(current);
            match parent {
                None => return chain,
                Some(parent) => current = self.lookup(&parent).expect(BROKEN_CHAIN),
            }
        }
    }
}
