//! Runtime model values.
//!
//! A [`ModelInstance`] is the mapped form of one raw payload: a model name plus
//! an ordered field map. Instances carry no mapping state: annotations live on
//! the registered schema and the raw source is dropped as soon as mapping ends,
//! so a mapped instance can be handed around and serialized without trailing
//! metadata.

use std::collections::HashMap;

use serde_json::Value;

/// The value held by one instance field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The raw source lacked this field, or its foreign value was `null`.
    Null,
    /// A scalar (or an unresolved/raw-passthrough value) taken from the source as-is.
    Scalar(Value),
    /// A resolved to-one relation.
    One(Box<ModelInstance>),
    /// A resolved to-many relation, source order preserved.
    Many(Vec<ModelInstance>),
}

impl FieldValue {
    /// True for [`FieldValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The scalar value, if this field holds one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The related instance, if this field holds a resolved to-one relation.
    #[must_use]
    pub fn as_one(&self) -> Option<&ModelInstance> {
        match self {
            FieldValue::One(inst) => Some(inst),
            _ => None,
        }
    }

    /// The related sequence, if this field holds a resolved to-many relation.
    #[must_use]
    pub fn as_many(&self) -> Option<&[ModelInstance]> {
        match self {
            FieldValue::Many(seq) => Some(seq),
            _ => None,
        }
    }

    /// Convert into plain JSON, nested instances included.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Scalar(v) => v,
            FieldValue::One(inst) => inst.to_json(),
            FieldValue::Many(seq) => Value::Array(seq.into_iter().map(|m| m.to_json()).collect()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            other => FieldValue::Scalar(other),
        }
    }
}

/// A mapped model value: model name plus ordered fields.
///
/// Field order follows insertion order (schema order for engine-produced
/// instances), mirrored by a name list alongside the value map.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    /// The registry name of this instance's model.
    model: &'static str,
    /// Field names in insertion order.
    order: Vec<String>,
    /// Current values by field name.
    values: HashMap<String, FieldValue>,
}

impl ModelInstance {
    /// Create an empty instance of the named model.
    #[must_use]
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            order: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// The registry name of this instance's model.
    #[must_use]
    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Set a field value, appending to the field order on first insert.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        if !self.values.contains_key(&field) {
            self.order.push(field.clone());
        }
        self.values.insert(field, value);
    }

    /// Set a field from a plain JSON value (`null` becomes [`FieldValue::Null`]).
    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.set(field, FieldValue::from(value.into()));
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.order.retain(|name| name != field);
        self.values.remove(field)
    }

    /// Check whether a field is present.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Field names in insertion order.
    #[must_use]
    pub fn field_names(&self) -> &[String] {
        &self.order
    }

    /// Number of fields on this instance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the instance has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }

    /// Consume the instance, yielding `(name, value)` pairs in insertion order.
    #[must_use]
    pub fn into_fields(mut self) -> Vec<(String, FieldValue)> {
        self.order
            .drain(..)
            .filter_map(|name| {
                let value = self.values.remove(&name)?;
                Some((name, value))
            })
            .collect()
    }

    /// Serialize the instance to plain JSON, nulls included.
    ///
    /// This is the raw form of the instance; write payloads go through the
    /// mapping engine's clean pass instead, which strips nulls and applies
    /// per-field save directives.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in self.iter() {
            map.insert(name.to_string(), value.clone().into_json());
        }
        Value::Object(map)
    }
}
