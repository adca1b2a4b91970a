//! Model schemas and the model registry.
//!
//! Relation targets and container models are resolved by name through an
//! explicit registry instead of a global injector: the registry is handed to
//! the mapping engine, and a lookup miss is the declared
//! [`Error::UnknownModel`](crate::Error::UnknownModel).

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::FieldAnnotation;
use crate::instance::ModelInstance;

/// The verb that triggered an outbound clean.
///
/// Passed to [`ModelHooks::before_save`] so hooks can branch on the intent;
/// it is never stored on the instance itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    /// A create (`POST`).
    Save,
    /// An update (`PUT`).
    Update,
    /// A delete (`DELETE`).
    Remove,
}

impl WriteMethod {
    /// The verb name as the original schema spelled it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            WriteMethod::Save => "save",
            WriteMethod::Update => "update",
            WriteMethod::Remove => "remove",
        }
    }
}

/// Optional lifecycle hooks supplied per model type.
///
/// The engine invokes `after_load` once a raw payload has been mapped onto an
/// instance, and `before_save` at the start of a clean pass. Both default to
/// no-ops; return values are ignored by the engine.
pub trait ModelHooks: Send + Sync {
    /// Runs after mapping, before the instance is handed to the caller.
    fn after_load(&self, _instance: &mut ModelInstance) {}

    /// Runs before an instance is serialized for a write.
    fn before_save(&self, _instance: &mut ModelInstance, _method: WriteMethod) {}
}

/// No-op hooks for models that do not customize the lifecycle.
#[derive(Debug, Clone, Copy, Default)]
struct NoHooks;

impl ModelHooks for NoHooks {}

/// Per-model metadata: name, identifier field, annotations, hooks.
#[derive(Clone)]
pub struct ModelSchema {
    name: &'static str,
    reference: &'static str,
    fields: Vec<FieldAnnotation>,
    hooks: Arc<dyn ModelHooks>,
}

impl std::fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSchema")
            .field("name", &self.name)
            .field("reference", &self.reference)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl ModelSchema {
    /// Create a schema with the default `"id"` reference field and no fields.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            reference: "id",
            fields: Vec::new(),
            hooks: Arc::new(NoHooks),
        }
    }

    /// Set the identifier field name used for reference-only serialization
    /// and for deriving delete identifiers.
    #[must_use]
    pub fn reference(mut self, field: &'static str) -> Self {
        self.reference = field;
        self
    }

    /// Append one field annotation.
    #[must_use]
    pub fn field(mut self, annotation: FieldAnnotation) -> Self {
        self.fields.push(annotation);
        self
    }

    /// Append a slice of field annotations, preserving order.
    #[must_use]
    pub fn fields(mut self, annotations: &[FieldAnnotation]) -> Self {
        self.fields.extend_from_slice(annotations);
        self
    }

    /// Attach lifecycle hooks.
    #[must_use]
    pub fn hooks(mut self, hooks: impl ModelHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// The model's registry name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The identifier field name (default `"id"`).
    #[must_use]
    pub fn reference_field(&self) -> &'static str {
        self.reference
    }

    /// The declared annotations, in schema order.
    #[must_use]
    pub fn annotations(&self) -> &[FieldAnnotation] {
        &self.fields
    }

    /// Look up the annotation for one field.
    #[must_use]
    pub fn annotation(&self, field: &str) -> Option<&FieldAnnotation> {
        self.fields.iter().find(|a| a.name == field)
    }

    /// Run the `after_load` hook.
    pub fn run_after_load(&self, instance: &mut ModelInstance) {
        self.hooks.after_load(instance);
    }

    /// Run the `before_save` hook.
    pub fn run_before_save(&self, instance: &mut ModelInstance, method: WriteMethod) {
        self.hooks.before_save(instance, method);
    }
}

/// Mapping from model name to schema, shared immutably once built.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: HashMap<&'static str, Arc<ModelSchema>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its own name, replacing any previous entry.
    pub fn register(&mut self, schema: ModelSchema) -> &mut Self {
        self.models.insert(schema.name, Arc::new(schema));
        self
    }

    /// Look a schema up by name.
    ///
    /// A miss is the declared mapping error, not a panic.
    pub fn get(&self, name: &str) -> Result<Arc<ModelSchema>> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    /// Check whether a model name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when no models are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
