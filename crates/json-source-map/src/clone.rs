//! Deep cloning with provenance reattachment.

use crate::record::ProvenanceRecord;
use crate::store::SourceMap;
use json_value::{JsonMap, Value};
use std::rc::Rc;

impl SourceMap {
    /// Deep-clone `source`, attaching to every cloned container the record
    /// of the corresponding original node in this map.
    ///
    /// Primitives pass through; every container in the clone is a fresh
    /// allocation, so the clone is deep-equal to `source` but never shares
    /// identity with it.
    pub fn clone_deep(&self, source: &Value) -> Value {
        self.clone_deep_with(source, |original| self.lookup(original))
    }

    /// Deep-clone `source`, obtaining each cloned container's record from
    /// `supplier` (called with the corresponding original node).
    ///
    /// Nodes the supplier returns `None` for are cloned without provenance.
    pub fn clone_deep_with<F>(&self, source: &Value, mut supplier: F) -> Value
    where
        F: FnMut(&Value) -> Option<Rc<ProvenanceRecord>>,
    {
        self.clone_rec(source, &mut supplier)
    }

    /// Deep-clone `source`, attaching one fixed record to every cloned
    /// container.
    pub fn clone_deep_with_record(&self, source: &Value, record: Rc<ProvenanceRecord>) -> Value {
        self.clone_deep_with(source, |_| Some(record.clone()))
    }

    fn clone_rec<F>(&self, data: &Value, supplier: &mut F) -> Value
    where
        F: FnMut(&Value) -> Option<Rc<ProvenanceRecord>>,
    {
        let result = match data {
            Value::Array(items) => {
                let mut cloned = Vec::with_capacity(items.len());
                for item in items.iter() {
                    cloned.push(self.clone_rec(item, supplier));
                }
                Value::array(cloned)
            }
            Value::Object(entries) => {
                let mut cloned = JsonMap::with_capacity(entries.len());
                for (key, value) in entries.iter() {
                    cloned.insert(key.clone(), self.clone_rec(value, supplier));
                }
                Value::object(cloned)
            }
            primitive => return primitive.clone(),
        };
        if let Some(record) = supplier(data) {
            self.attach(&result, record);
        }
        result
    }
}
