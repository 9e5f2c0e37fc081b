//! Structural transform combinators that thread provenance through change.
//!
//! Every combinator follows one rule: if the transformed result is
//! structurally identical to the source container, the source container is
//! returned unchanged (same identity, provenance untouched); otherwise a new
//! container is built, the source's own record is copied onto it, and each
//! produced child receives the corresponding source child's record unless it
//! already carries one (first-write-wins makes the "unless" automatic).
//!
//! "Identical" is deep structural equality; `Value` equality short-circuits
//! on shared containers, so the reference-equality fast path is always taken
//! first.

use crate::store::SourceMap;
use json_value::{JsonMap, Value};

/// Per-key rebuild factories for [`SourceMap::rebuild_properties`].
///
/// Each factory receives the source's current value for its key (`None` when
/// the key is being introduced) and the key itself, and produces the new
/// value.
#[derive(Default)]
pub struct PropertyOverrides<'a> {
    factories: Vec<(String, PropertyFactory<'a>)>,
}

/// A single property factory: `(current value, key) -> new value`.
pub type PropertyFactory<'a> = Box<dyn FnMut(Option<&Value>, &str) -> Value + 'a>;

impl<'a> PropertyOverrides<'a> {
    pub fn new() -> Self {
        PropertyOverrides {
            factories: Vec::new(),
        }
    }

    /// Register a factory for `key`. Later registrations for the same key
    /// replace earlier ones.
    pub fn set<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: FnMut(Option<&Value>, &str) -> Value + 'a,
    {
        let key = key.into();
        self.factories.retain(|(k, _)| *k != key);
        self.factories.push((key, Box::new(factory)));
        self
    }

    fn factory_for(&mut self, key: &str) -> Option<&mut PropertyFactory<'a>> {
        self.factories
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, f)| f)
    }
}

impl SourceMap {
    /// Map `f` over the elements of an array.
    ///
    /// An absent (or non-array) source yields an empty array. Provenance is
    /// threaded per the module rule; in particular `array_map(Some(&a),
    /// |v, _| v.clone())` returns `a` itself.
    pub fn array_map<F>(&self, source: Option<&Value>, mut f: F) -> Value
    where
        F: FnMut(&Value, usize) -> Value,
    {
        let Some(source) = source else {
            return Value::empty_array();
        };
        let Some(items) = source.as_array() else {
            return Value::empty_array();
        };

        let mut produced = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let result = f(item, index);
            self.copy(item, &result);
            produced.push(result);
        }

        if produced.as_slice() == items {
            return source.clone();
        }
        let result = Value::array(produced);
        self.copy(source, &result);
        result
    }

    /// Map `f` over the entries of an object, preserving key order and set.
    ///
    /// An absent (or non-object) source yields an empty object.
    pub fn map_over<F>(&self, source: Option<&Value>, mut f: F) -> Value
    where
        F: FnMut(&Value, &str) -> Value,
    {
        let Some(source) = source else {
            return Value::empty_object();
        };
        let Some(entries) = source.as_object() else {
            return Value::empty_object();
        };

        let mut produced = JsonMap::with_capacity(entries.len());
        for (key, value) in entries {
            let result = f(value, key);
            self.copy(value, &result);
            produced.insert(key.clone(), result);
        }

        if produced == *entries {
            return source.clone();
        }
        let result = Value::object(produced);
        self.copy(source, &result);
        result
    }

    /// Right-biased merge of objects: later sources win on key conflict,
    /// keys keep their first-occurrence position.
    ///
    /// Absent (and non-object) sources are skipped; no defined source yields
    /// an empty object. If the merge result is structurally equal to the
    /// first defined source, that source is returned by identity; otherwise
    /// its record is copied onto the merged result.
    pub fn merge_mappings(&self, sources: &[Option<&Value>]) -> Value {
        let defined: Vec<(&Value, &JsonMap)> = sources
            .iter()
            .filter_map(|source| source.and_then(|v| v.as_object().map(|m| (v, m))))
            .collect();
        let Some((first, first_entries)) = defined.first().copied() else {
            return Value::empty_object();
        };

        let mut merged = JsonMap::new();
        for (_, entries) in &defined {
            for (key, value) in *entries {
                merged.insert(key.clone(), value.clone());
            }
        }

        if merged == *first_entries {
            return first.clone();
        }
        let result = Value::object(merged);
        self.copy(first, &result);
        result
    }

    /// Rebuild an object, overriding some properties by factory.
    ///
    /// The result has the source's keys in order — each overridden key
    /// produced by its factory, every other key keeping the source value's
    /// identity — followed by any override keys the source lacks (their
    /// factories receive `None`). A rebuild that changes nothing returns the
    /// source itself. A non-object source is returned unchanged.
    pub fn rebuild_properties(
        &self,
        source: &Value,
        mut overrides: PropertyOverrides<'_>,
    ) -> Value {
        let Some(entries) = source.as_object() else {
            return source.clone();
        };

        let mut produced = JsonMap::with_capacity(entries.len());
        for (key, value) in entries {
            let result = match overrides.factory_for(key) {
                Some(factory) => factory(Some(value), key),
                None => value.clone(),
            };
            produced.insert(key.clone(), result);
        }
        for (key, factory) in &mut overrides.factories {
            if !produced.contains_key(key.as_str()) {
                let result = factory(None, key);
                produced.insert(key.clone(), result);
            }
        }

        if produced == *entries {
            return source.clone();
        }
        for (key, result) in &produced {
            if let Some(original) = entries.get(key) {
                self.copy(original, result);
            }
        }
        let result = Value::object(produced);
        self.copy(source, &result);
        result
    }

    /// Apply `f` to a whole value, copying the source's record onto the
    /// result.
    pub fn transform<F>(&self, source: &Value, f: F) -> Value
    where
        F: FnOnce(&Value) -> Value,
    {
        let result = f(source);
        self.copy(source, &result);
        result
    }
}
