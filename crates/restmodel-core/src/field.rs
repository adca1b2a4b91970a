//! Field annotation definitions.
//!
//! Annotations are authored once per model as explicit static tables and
//! consulted by the mapping engine. This replaces runtime property enumeration
//! with metadata that is visible to the type checker.

/// The declared type of a model field.
///
/// Scalar tags double as keys into the validator registry; `Relation` marks a
/// field whose value is resolved into another model (or a sequence of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    /// A JSON string.
    #[default]
    String,
    /// An integral JSON number.
    Int,
    /// A fractional JSON number.
    Float,
    /// A JSON boolean (not actually validated).
    Boolean,
    /// A date carried as an RFC 3339 string on the wire.
    Date,
    /// A string validated against the email pattern.
    Email,
    /// A link to another model, resolved during mapping.
    Relation,
}

impl FieldType {
    /// The wire-facing tag for this type, as it appears in annotation schemas.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Relation => "relation",
        }
    }
}

/// Whether a relation resolves to a single instance or an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationKind {
    /// A single related instance.
    #[default]
    One,
    /// An ordered sequence of related instances.
    Many,
}

/// A declared link from one model field to another model.
///
/// `model: None` means the related model is explicitly unset: foreign values
/// pass through the engine raw, unmapped. `foreign_field` names the key the
/// foreign value is read from in the raw source; it defaults to the owning
/// field's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationSpec {
    /// Kind of relation.
    pub kind: RelationKind,
    /// The related model's registry name, or `None` for raw passthrough.
    pub model: Option<&'static str>,
    /// Foreign field name in the raw source; defaults to the owning field's name.
    pub foreign_field: Option<&'static str>,
}

impl RelationSpec {
    /// A to-one relation mapped through the named model.
    #[must_use]
    pub const fn one(model: &'static str) -> Self {
        Self {
            kind: RelationKind::One,
            model: Some(model),
            foreign_field: None,
        }
    }

    /// A to-many relation mapped through the named model.
    #[must_use]
    pub const fn many(model: &'static str) -> Self {
        Self {
            kind: RelationKind::Many,
            model: Some(model),
            foreign_field: None,
        }
    }

    /// A to-one relation whose foreign value passes through unmapped.
    #[must_use]
    pub const fn one_raw() -> Self {
        Self {
            kind: RelationKind::One,
            model: None,
            foreign_field: None,
        }
    }

    /// A to-many relation whose foreign values pass through unmapped.
    #[must_use]
    pub const fn many_raw() -> Self {
        Self {
            kind: RelationKind::Many,
            model: None,
            foreign_field: None,
        }
    }

    /// Set the foreign field name the relation is read from.
    #[must_use]
    pub const fn foreign_field(mut self, name: &'static str) -> Self {
        self.foreign_field = Some(name);
        self
    }

    /// The effective foreign field name given the owning field's name.
    #[must_use]
    pub fn foreign_field_or<'a>(&self, field_name: &'a str) -> &'a str {
        match self.foreign_field {
            Some(name) => name,
            None => field_name,
        }
    }
}

/// What happens to a field when its instance is cleaned for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveDirective {
    /// Serialize the field as-is (relations still recurse).
    #[default]
    Keep,
    /// Remove the field from the payload entirely.
    Skip,
    /// Reduce the field's value to only its identifier field.
    Reference,
}

/// Metadata about one model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAnnotation {
    /// Field name as it appears in raw payloads and on instances.
    pub name: &'static str,
    /// Declared type.
    pub field_type: FieldType,
    /// Relation descriptor, present when `field_type` is `Relation`.
    pub relation: Option<RelationSpec>,
    /// Serialization directive applied during cleaning.
    pub save: SaveDirective,
}

impl FieldAnnotation {
    /// Create an annotation with the given type and no relation.
    #[must_use]
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            relation: None,
            save: SaveDirective::Keep,
        }
    }

    /// A string field.
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    /// An integer field.
    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldType::Int)
    }

    /// A float field.
    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldType::Float)
    }

    /// A boolean field.
    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// A date field.
    #[must_use]
    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// An email field.
    #[must_use]
    pub const fn email(name: &'static str) -> Self {
        Self::new(name, FieldType::Email)
    }

    /// A relation field with the given descriptor.
    #[must_use]
    pub const fn relation(name: &'static str, spec: RelationSpec) -> Self {
        Self {
            name,
            field_type: FieldType::Relation,
            relation: Some(spec),
            save: SaveDirective::Keep,
        }
    }

    /// Set the serialization directive.
    #[must_use]
    pub const fn save(mut self, directive: SaveDirective) -> Self {
        self.save = directive;
        self
    }

    /// Shorthand for `save(SaveDirective::Skip)`.
    #[must_use]
    pub const fn skip_on_save(self) -> Self {
        self.save(SaveDirective::Skip)
    }

    /// Shorthand for `save(SaveDirective::Reference)`.
    #[must_use]
    pub const fn reference_only(self) -> Self {
        self.save(SaveDirective::Reference)
    }
}
