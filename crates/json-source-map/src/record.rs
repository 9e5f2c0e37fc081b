//! Provenance records: where a tracked value came from.

use crate::types::FilePosition;
use indexmap::IndexMap;
use json_value::{PathSegment, Value};
use serde::{Deserialize, Serialize};

/// Positions for properties whose value is a primitive.
///
/// Primitives cannot carry a record of their own, so their positions live on
/// the enclosing container's record, keyed by the stringified path segment.
pub type PrimitivePositions = IndexMap<String, FilePosition>;

/// The provenance of one container in a value tree.
///
/// A `Root` marks the top of a parsed document and carries the document url;
/// a `Child` points at the parent container it was reached from and the
/// property or index used to reach it. Following `Child` parents always
/// terminates in exactly one `Root` — the chain is a tree, not a graph.
///
/// Records are immutable once created: "changing" a value's provenance means
/// associating a different record, never editing one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProvenanceRecord {
    Root {
        url: String,
        position: FilePosition,
        primitive_properties: PrimitivePositions,
    },
    Child {
        parent: Value,
        property: PathSegment,
        position: FilePosition,
        primitive_properties: PrimitivePositions,
    },
}

impl ProvenanceRecord {
    /// A root record for the top of a parsed document.
    pub fn root(url: impl Into<String>, position: FilePosition) -> Self {
        ProvenanceRecord::Root {
            url: url.into(),
            position,
            primitive_properties: PrimitivePositions::new(),
        }
    }

    /// A child record for a container reached from `parent` via `property`.
    pub fn child(
        parent: Value,
        property: impl Into<PathSegment>,
        position: FilePosition,
    ) -> Self {
        ProvenanceRecord::Child {
            parent,
            property: property.into(),
            position,
            primitive_properties: PrimitivePositions::new(),
        }
    }

    /// Record the position of a primitive-valued property.
    pub fn with_primitive(
        mut self,
        property: impl Into<PathSegment>,
        position: FilePosition,
    ) -> Self {
        let key = property.into().map_key();
        match &mut self {
            ProvenanceRecord::Root {
                primitive_properties,
                ..
            }
            | ProvenanceRecord::Child {
                primitive_properties,
                ..
            } => {
                primitive_properties.insert(key, position);
            }
        }
        self
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ProvenanceRecord::Root { .. })
    }

    pub fn is_child(&self) -> bool {
        matches!(self, ProvenanceRecord::Child { .. })
    }

    /// The position of the container itself.
    pub fn position(&self) -> &FilePosition {
        match self {
            ProvenanceRecord::Root { position, .. }
            | ProvenanceRecord::Child { position, .. } => position,
        }
    }

    pub fn primitive_properties(&self) -> &PrimitivePositions {
        match self {
            ProvenanceRecord::Root {
                primitive_properties,
                ..
            }
            | ProvenanceRecord::Child {
                primitive_properties,
                ..
            } => primitive_properties,
        }
    }

    /// The position recorded for a primitive-valued property, if any.
    pub fn primitive_position(&self, property: &PathSegment) -> Option<&FilePosition> {
        self.primitive_properties().get(property.map_key().as_str())
    }

    /// The document url, for root records.
    pub fn url(&self) -> Option<&str> {
        match self {
            ProvenanceRecord::Root { url, .. } => Some(url),
            ProvenanceRecord::Child { .. } => None,
        }
    }

    /// The parent container, for child records.
    pub fn parent(&self) -> Option<&Value> {
        match self {
            ProvenanceRecord::Child { parent, .. } => Some(parent),
            ProvenanceRecord::Root { .. } => None,
        }
    }

    /// The property this container was reached by, for child records.
    pub fn property(&self) -> Option<&PathSegment> {
        match self {
            ProvenanceRecord::Child { property, .. } => Some(property),
            ProvenanceRecord::Root { .. } => None,
        }
    }
}
