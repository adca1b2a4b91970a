//! The model mapping engine.
//!
//! Inbound, the engine turns a raw response body into a mapped model graph;
//! declared relations are resolved recursively through the registry and the
//! schema's `after_load` hook runs last. Outbound, `clean` turns a model
//! graph back into a write-ready payload with nulls stripped and per-field
//! save directives applied; the schema's `before_save` hook runs first.
//!
//! Both passes are synchronous, pure-CPU traversals; recursion depth is
//! unconditional, so relation graphs must be acyclic by construction.

use serde_json::Value;

use crate::error::Result;
use crate::field::{FieldType, RelationKind, RelationSpec, SaveDirective};
use crate::instance::{FieldValue, ModelInstance};
use crate::registry::{ModelRegistry, WriteMethod};
use crate::validate;

/// The shape of a mapped response: a single instance or an ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    /// A single mapped instance.
    One(ModelInstance),
    /// An ordered sequence of mapped instances, source order preserved.
    Many(Vec<ModelInstance>),
}

impl Mapped {
    /// The single instance, if this result holds one.
    #[must_use]
    pub fn one(&self) -> Option<&ModelInstance> {
        match self {
            Mapped::One(inst) => Some(inst),
            Mapped::Many(_) => None,
        }
    }

    /// The sequence, if this result holds one.
    #[must_use]
    pub fn many(&self) -> Option<&[ModelInstance]> {
        match self {
            Mapped::One(_) => None,
            Mapped::Many(seq) => Some(seq),
        }
    }

    /// Consume into the single instance.
    #[must_use]
    pub fn into_one(self) -> Option<ModelInstance> {
        match self {
            Mapped::One(inst) => Some(inst),
            Mapped::Many(_) => None,
        }
    }

    /// Consume into the sequence.
    #[must_use]
    pub fn into_many(self) -> Option<Vec<ModelInstance>> {
        match self {
            Mapped::One(_) => None,
            Mapped::Many(seq) => Some(seq),
        }
    }
}

/// The mapping engine. Borrows the registry it resolves model names through.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'r> {
    registry: &'r ModelRegistry,
}

impl<'r> Mapper<'r> {
    /// Create an engine over the given registry.
    #[must_use]
    pub fn new(registry: &'r ModelRegistry) -> Self {
        Self { registry }
    }

    /// Map a raw response body to the endpoint's model.
    ///
    /// A bare array, or an object whose `container` field holds an array, maps
    /// element-wise into a sequence; anything else maps as a single instance.
    pub fn map_result(&self, model: &str, raw: &Value, container: Option<&str>) -> Result<Mapped> {
        if let Some(items) = raw.as_array() {
            tracing::debug!(model, "Mapping an array response");
            return Ok(Mapped::Many(self.map_elements(model, items)?));
        }

        if let Some(items) = container
            .and_then(|name| raw.get(name))
            .and_then(Value::as_array)
        {
            tracing::debug!(model, container, "Mapping a contained list response");
            return Ok(Mapped::Many(self.map_elements(model, items)?));
        }

        tracing::debug!(model, "Mapping a single-object response");
        Ok(Mapped::One(self.init(model, raw)?))
    }

    fn map_elements(&self, model: &str, items: &[Value]) -> Result<Vec<ModelInstance>> {
        items.iter().map(|item| self.init(model, item)).collect()
    }

    /// Map one raw value into an instance of the named model.
    ///
    /// Every declared field is populated: fields missing from the source become
    /// null, relation fields resolve against their foreign field, and the
    /// schema's `after_load` hook runs once all fields are processed. The raw
    /// source is never stored on the instance.
    pub fn init(&self, model: &str, raw: &Value) -> Result<ModelInstance> {
        let schema = self.registry.get(model)?;
        let mut instance = ModelInstance::new(schema.name());
        let source = raw.as_object();

        for annotation in schema.annotations() {
            let Some(assigned) = source.and_then(|obj| obj.get(annotation.name)) else {
                // Source has no own field under this name: null, and relation
                // resolution does not apply.
                instance.set(annotation.name, FieldValue::Null);
                continue;
            };
            instance.set(annotation.name, FieldValue::Scalar(assigned.clone()));

            if annotation.field_type != FieldType::Relation {
                continue;
            }
            let Some(relation) = annotation.relation.as_ref() else {
                // A relation annotation without a descriptor is left untouched.
                continue;
            };

            let foreign_name = relation.foreign_field_or(annotation.name);
            match source.and_then(|obj| obj.get(foreign_name)) {
                None => {
                    // A to-one relation stays unresolved on an absent foreign
                    // field; a to-many relation always surfaces as a sequence.
                    if relation.kind == RelationKind::Many {
                        let resolved = self.map_many(relation, None)?;
                        instance.set(annotation.name, resolved);
                    }
                }
                Some(Value::Null) => instance.set(annotation.name, FieldValue::Null),
                Some(foreign) => {
                    let resolved = match relation.kind {
                        RelationKind::Many => self.map_many(relation, Some(foreign))?,
                        RelationKind::One => self.map_one(relation, foreign)?,
                    };
                    instance.set(annotation.name, resolved);
                }
            }
        }

        schema.run_after_load(&mut instance);
        Ok(instance)
    }

    /// Resolve a to-many foreign value.
    ///
    /// An absent, null, or empty foreign array yields an empty sequence, never
    /// null. When the related model is explicitly unset, elements pass through
    /// raw.
    fn map_many(&self, relation: &RelationSpec, foreign: Option<&Value>) -> Result<FieldValue> {
        let items: &[Value] = match foreign {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                tracing::warn!("Foreign value for a to-many relation is not an array");
                &[]
            }
        };

        let Some(model) = relation.model else {
            return Ok(FieldValue::Scalar(Value::Array(items.to_vec())));
        };

        let mapped = items
            .iter()
            .map(|item| self.init(model, item))
            .collect::<Result<Vec<_>>>()?;
        Ok(FieldValue::Many(mapped))
    }

    /// Resolve a to-one foreign value.
    fn map_one(&self, relation: &RelationSpec, foreign: &Value) -> Result<FieldValue> {
        let Some(model) = relation.model else {
            return Ok(FieldValue::Scalar(foreign.clone()));
        };
        Ok(FieldValue::One(Box::new(self.init(model, foreign)?)))
    }

    /// Turn an instance into a write-ready payload.
    ///
    /// Consumes the instance: cleaning is a one-way transition, and a cleaned
    /// value cannot be cleaned again. The schema's `before_save` hook runs
    /// first with the triggering verb. Null fields are then removed entirely,
    /// save directives applied, and relation fields cleaned through their own
    /// schemas.
    pub fn clean(&self, instance: ModelInstance, method: WriteMethod) -> Result<Value> {
        let schema = self.registry.get(instance.model())?;
        let mut instance = instance;
        schema.run_before_save(&mut instance, method);

        let mut out = serde_json::Map::new();
        for (name, value) in instance.into_fields() {
            // Null fields are stripped, not sent as null.
            if value.is_null() {
                continue;
            }

            if let Some(annotation) = schema.annotation(&name) {
                match annotation.save {
                    SaveDirective::Skip => continue,
                    SaveDirective::Reference => {
                        out.insert(name, self.reference_only(value)?);
                        continue;
                    }
                    SaveDirective::Keep => {}
                }

                if annotation.field_type == FieldType::Relation && annotation.relation.is_some() {
                    let cleaned = match value {
                        FieldValue::One(related) => self.clean(*related, method)?,
                        FieldValue::Many(sequence) => Value::Array(
                            sequence
                                .into_iter()
                                .map(|related| self.clean(related, method))
                                .collect::<Result<Vec<_>>>()?,
                        ),
                        // Unresolved or raw-passthrough values serialize as-is.
                        other => other.into_json(),
                    };
                    out.insert(name, cleaned);
                    continue;
                }
            }

            out.insert(name, value.into_json());
        }

        Ok(Value::Object(out))
    }

    /// Reduce a field value to only its identifier field.
    ///
    /// Mapped instances use their own schema's reference field name; raw
    /// objects fall back to the default `"id"`.
    fn reference_only(&self, value: FieldValue) -> Result<Value> {
        match value {
            FieldValue::One(instance) => self.reduce_instance(*instance),
            FieldValue::Many(sequence) => Ok(Value::Array(
                sequence
                    .into_iter()
                    .map(|instance| self.reduce_instance(instance))
                    .collect::<Result<Vec<_>>>()?,
            )),
            FieldValue::Scalar(Value::Object(map)) => Ok(reduce_raw_object(map)),
            FieldValue::Scalar(Value::Array(items)) => Ok(Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => reduce_raw_object(map),
                        other => other,
                    })
                    .collect(),
            )),
            other => Ok(other.into_json()),
        }
    }

    fn reduce_instance(&self, instance: ModelInstance) -> Result<Value> {
        let reference = self.registry.get(instance.model())?.reference_field();
        let mut out = serde_json::Map::new();
        if let Some(value) = instance.get(reference) {
            out.insert(reference.to_string(), value.clone().into_json());
        }
        Ok(Value::Object(out))
    }

    /// Run every annotated field through its declared-type predicate.
    ///
    /// Never errors: the first mismatch returns `false`; fields without an
    /// annotation are not checked.
    #[must_use]
    pub fn is_valid(&self, instance: &ModelInstance) -> bool {
        let Ok(schema) = self.registry.get(instance.model()) else {
            // No schema means no annotations, so nothing is checked.
            return true;
        };
        for (name, value) in instance.iter() {
            if let Some(annotation) = schema.annotation(name) {
                if !validate::check(annotation.field_type, value) {
                    return false;
                }
            }
        }
        true
    }
}

fn reduce_raw_object(mut map: serde_json::Map<String, Value>) -> Value {
    let mut out = serde_json::Map::new();
    if let Some(value) = map.remove("id") {
        out.insert("id".to_string(), value);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldAnnotation;
    use crate::registry::{ModelHooks, ModelSchema};
    use serde_json::json;

    fn blog_registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Author")
                .field(FieldAnnotation::int("id"))
                .field(FieldAnnotation::string("name"))
                .field(FieldAnnotation::email("email")),
        );
        registry.register(
            ModelSchema::new("Comment")
                .field(FieldAnnotation::int("id"))
                .field(FieldAnnotation::string("text")),
        );
        registry.register(
            ModelSchema::new("Post")
                .field(FieldAnnotation::int("id"))
                .field(FieldAnnotation::string("title"))
                .field(FieldAnnotation::relation("author", RelationSpec::one("Author")))
                .field(FieldAnnotation::relation(
                    "comments",
                    RelationSpec::many("Comment"),
                )),
        );
        registry
    }

    #[test]
    fn test_init_assigns_scalars_and_nulls_missing_fields() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init("Author", &json!({"id": 1, "name": "Alice"}))
            .unwrap();

        assert_eq!(inst.get("id").unwrap().as_scalar(), Some(&json!(1)));
        assert_eq!(inst.get("name").unwrap().as_scalar(), Some(&json!("Alice")));
        assert!(inst.get("email").unwrap().is_null());
    }

    #[test]
    fn test_init_non_object_source_nulls_every_field() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper.init("Author", &json!("garbage")).unwrap();
        assert!(inst.get("id").unwrap().is_null());
        assert!(inst.get("name").unwrap().is_null());
    }

    #[test]
    fn test_one_relation_resolves_nested_instance() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init(
                "Post",
                &json!({"id": 1, "title": "t", "author": {"id": 9, "name": "Bob"}}),
            )
            .unwrap();

        let author = inst.get("author").unwrap().as_one().unwrap();
        assert_eq!(author.model(), "Author");
        assert_eq!(author.get("id").unwrap().as_scalar(), Some(&json!(9)));
    }

    #[test]
    fn test_one_relation_null_foreign_is_null() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init("Post", &json!({"id": 1, "title": "t", "author": null}))
            .unwrap();
        assert!(inst.get("author").unwrap().is_null());
    }

    #[test]
    fn test_one_relation_absent_foreign_field_is_left_unresolved() {
        let mut registry = blog_registry();
        registry.register(
            ModelSchema::new("Review").field(FieldAnnotation::relation(
                "author",
                RelationSpec::one("Author").foreign_field("written_by"),
            )),
        );
        let mapper = Mapper::new(&registry);

        // "author" exists in the source but the foreign field does not:
        // the field keeps the assigned raw value.
        let inst = mapper.init("Review", &json!({"author": 17})).unwrap();
        assert_eq!(inst.get("author").unwrap().as_scalar(), Some(&json!(17)));
    }

    #[test]
    fn test_one_relation_foreign_field_alias() {
        let mut registry = blog_registry();
        registry.register(
            ModelSchema::new("Review").field(FieldAnnotation::relation(
                "author",
                RelationSpec::one("Author").foreign_field("written_by"),
            )),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init(
                "Review",
                &json!({"author": 17, "written_by": {"id": 17, "name": "Eve"}}),
            )
            .unwrap();

        let author = inst.get("author").unwrap().as_one().unwrap();
        assert_eq!(author.get("name").unwrap().as_scalar(), Some(&json!("Eve")));
    }

    #[test]
    fn test_many_relation_maps_elements_in_order() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init(
                "Post",
                &json!({
                    "id": 1,
                    "title": "t",
                    "comments": [{"id": 1, "text": "a"}, {"id": 2, "text": "b"}],
                }),
            )
            .unwrap();

        let comments = inst.get("comments").unwrap().as_many().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].get("text").unwrap().as_scalar(), Some(&json!("a")));
        assert_eq!(comments[1].get("text").unwrap().as_scalar(), Some(&json!("b")));
    }

    #[test]
    fn test_many_relation_empty_array_is_empty_sequence() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let empty = mapper
            .init("Post", &json!({"id": 1, "title": "t", "comments": []}))
            .unwrap();
        assert_eq!(empty.get("comments").unwrap().as_many().unwrap().len(), 0);
    }

    #[test]
    fn test_absent_field_nulls_before_relation_resolution() {
        // The missing-own-field rule runs first: when the relation's foreign
        // field coincides with the field name and neither is present, the
        // field is null and no resolution happens.
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let absent = mapper
            .init("Post", &json!({"id": 1, "title": "t"}))
            .unwrap();
        assert!(absent.get("comments").unwrap().is_null());
        assert!(absent.get("author").unwrap().is_null());
    }

    #[test]
    fn test_many_relation_absent_foreign_field_is_empty_sequence() {
        let mut registry = blog_registry();
        registry.register(
            ModelSchema::new("Thread").field(FieldAnnotation::relation(
                "comments",
                RelationSpec::many("Comment").foreign_field("comment_list"),
            )),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper.init("Thread", &json!({"comments": 3})).unwrap();
        assert_eq!(inst.get("comments").unwrap().as_many().unwrap().len(), 0);
    }

    #[test]
    fn test_many_relation_null_foreign_is_null() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init("Post", &json!({"id": 1, "title": "t", "comments": null}))
            .unwrap();
        assert!(inst.get("comments").unwrap().is_null());
    }

    #[test]
    fn test_raw_passthrough_relations() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Event")
                .field(FieldAnnotation::relation("tags", RelationSpec::many_raw()))
                .field(FieldAnnotation::relation("meta", RelationSpec::one_raw())),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init("Event", &json!({"tags": ["a", "b"], "meta": {"k": 1}}))
            .unwrap();

        assert_eq!(
            inst.get("tags").unwrap().as_scalar(),
            Some(&json!(["a", "b"]))
        );
        assert_eq!(inst.get("meta").unwrap().as_scalar(), Some(&json!({"k": 1})));
    }

    #[test]
    fn test_unknown_relation_model_propagates() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Orphan")
                .field(FieldAnnotation::relation("parent", RelationSpec::one("Ghost"))),
        );
        let mapper = Mapper::new(&registry);

        let err = mapper
            .init("Orphan", &json!({"parent": {"id": 1}}))
            .unwrap_err();
        assert_eq!(err, crate::Error::UnknownModel("Ghost".to_string()));
    }

    #[test]
    fn test_map_result_shapes() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let one = mapper
            .map_result("Author", &json!({"id": 1}), Some("authors"))
            .unwrap();
        assert!(one.one().is_some());

        let bare = mapper
            .map_result("Author", &json!([{"id": 1}, {"id": 2}]), None)
            .unwrap();
        assert_eq!(bare.many().unwrap().len(), 2);

        let contained = mapper
            .map_result(
                "Author",
                &json!({"count": 2, "authors": [{"id": 1}, {"id": 2}]}),
                Some("authors"),
            )
            .unwrap();
        assert_eq!(contained.many().unwrap().len(), 2);
    }

    #[test]
    fn test_after_load_hook_runs() {
        struct FullName;
        impl ModelHooks for FullName {
            fn after_load(&self, instance: &mut ModelInstance) {
                let first = instance
                    .get("first")
                    .and_then(|v| v.as_scalar())
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                instance.set_value("display", first.to_uppercase());
            }
        }

        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Person")
                .field(FieldAnnotation::string("first"))
                .hooks(FullName),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper.init("Person", &json!({"first": "ada"})).unwrap();
        assert_eq!(inst.get("display").unwrap().as_scalar(), Some(&json!("ADA")));
    }

    #[test]
    fn test_clean_strips_null_fields() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper.init("Author", &json!({"id": 1})).unwrap();
        let payload = mapper.clean(inst, WriteMethod::Save).unwrap();

        assert_eq!(payload, json!({"id": 1}));
    }

    #[test]
    fn test_clean_skip_directive_removes_field() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Account")
                .field(FieldAnnotation::int("id"))
                .field(FieldAnnotation::string("secret").skip_on_save()),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init("Account", &json!({"id": 1, "secret": "hunter2"}))
            .unwrap();
        let payload = mapper.clean(inst, WriteMethod::Update).unwrap();

        assert_eq!(payload, json!({"id": 1}));
    }

    #[test]
    fn test_clean_reference_directive_reduces_to_identifier() {
        let mut registry = blog_registry();
        registry.register(
            ModelSchema::new("Post2")
                .field(FieldAnnotation::int("id"))
                .field(
                    FieldAnnotation::relation("author", RelationSpec::one("Author"))
                        .reference_only(),
                ),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init(
                "Post2",
                &json!({"id": 1, "author": {"id": 5, "name": "x"}}),
            )
            .unwrap();
        let payload = mapper.clean(inst, WriteMethod::Save).unwrap();

        assert_eq!(payload, json!({"id": 1, "author": {"id": 5}}));
    }

    #[test]
    fn test_clean_reference_directive_over_sequences_and_raw_objects() {
        let mut registry = blog_registry();
        registry.register(
            ModelSchema::new("Digest")
                .field(
                    FieldAnnotation::relation("comments", RelationSpec::many("Comment"))
                        .reference_only(),
                )
                .field(FieldAnnotation::string("snapshot").reference_only()),
        );
        let mapper = Mapper::new(&registry);

        let mut inst = mapper
            .init(
                "Digest",
                &json!({"comments": [{"id": 1, "text": "a"}, {"id": 2, "text": "b"}]}),
            )
            .unwrap();
        inst.set_value("snapshot", json!({"id": 7, "body": "big"}));

        let payload = mapper.clean(inst, WriteMethod::Save).unwrap();
        assert_eq!(
            payload,
            json!({"comments": [{"id": 1}, {"id": 2}], "snapshot": {"id": 7}})
        );
    }

    #[test]
    fn test_clean_reference_uses_models_own_reference_field() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Tag")
                .reference("slug")
                .field(FieldAnnotation::string("slug"))
                .field(FieldAnnotation::string("label")),
        );
        registry.register(
            ModelSchema::new("Article").field(
                FieldAnnotation::relation("tag", RelationSpec::one("Tag")).reference_only(),
            ),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init("Article", &json!({"tag": {"slug": "rust", "label": "Rust"}}))
            .unwrap();
        let payload = mapper.clean(inst, WriteMethod::Save).unwrap();

        assert_eq!(payload, json!({"tag": {"slug": "rust"}}));
    }

    #[test]
    fn test_clean_recurses_into_relations() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let inst = mapper
            .init(
                "Post",
                &json!({
                    "id": 1,
                    "title": "t",
                    "author": {"id": 9},
                    "comments": [{"id": 1}, {"id": 2, "text": "b"}],
                }),
            )
            .unwrap();
        let payload = mapper.clean(inst, WriteMethod::Update).unwrap();

        // Nested nulls (author.name, author.email, comments[0].text) stripped.
        assert_eq!(
            payload,
            json!({
                "id": 1,
                "title": "t",
                "author": {"id": 9},
                "comments": [{"id": 1}, {"id": 2, "text": "b"}],
            })
        );
    }

    #[test]
    fn test_clean_before_save_hook_sees_write_method() {
        struct Stamp;
        impl ModelHooks for Stamp {
            fn before_save(&self, instance: &mut ModelInstance, method: WriteMethod) {
                instance.set_value("verb", method.as_str());
            }
        }

        let mut registry = ModelRegistry::new();
        registry.register(
            ModelSchema::new("Job")
                .field(FieldAnnotation::int("id"))
                .hooks(Stamp),
        );
        let mapper = Mapper::new(&registry);

        let inst = mapper.init("Job", &json!({"id": 1})).unwrap();
        let payload = mapper.clean(inst, WriteMethod::Update).unwrap();

        assert_eq!(payload, json!({"id": 1, "verb": "update"}));
    }

    #[test]
    fn test_clean_serializes_unannotated_fields_as_is() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let mut inst = mapper.init("Author", &json!({"id": 1, "name": "a"})).unwrap();
        inst.set_value("extra", json!({"nested": true}));

        let payload = mapper.clean(inst, WriteMethod::Save).unwrap();
        assert_eq!(
            payload,
            json!({"id": 1, "name": "a", "extra": {"nested": true}})
        );
    }

    #[test]
    fn test_is_valid_checks_declared_types() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let valid = mapper
            .init(
                "Author",
                &json!({"id": 1, "name": "Alice", "email": "alice@example.com"}),
            )
            .unwrap();
        assert!(mapper.is_valid(&valid));

        let invalid = mapper
            .init(
                "Author",
                &json!({"id": "one", "name": "Alice", "email": "alice@example.com"}),
            )
            .unwrap();
        assert!(!mapper.is_valid(&invalid));
    }

    #[test]
    fn test_is_valid_skips_unannotated_fields() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        let mut inst = mapper
            .init(
                "Author",
                &json!({"id": 1, "name": "Alice", "email": "alice@example.com"}),
            )
            .unwrap();
        inst.set_value("scratch", json!([1, 2, 3]));
        assert!(mapper.is_valid(&inst));
    }

    #[test]
    fn test_is_valid_fails_on_null_scalar() {
        let registry = blog_registry();
        let mapper = Mapper::new(&registry);

        // email is absent, so it maps to null, and null is not a valid email.
        let inst = mapper.init("Author", &json!({"id": 1, "name": "a"})).unwrap();
        assert!(!mapper.is_valid(&inst));
    }
}
