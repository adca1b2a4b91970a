//! Model schema and mapping-engine re-exports.
//!
//! The implementation lives in the separate `restmodel-core` crate. This
//! module exists so the `restmodel` facade can expose the schema types and the
//! engine without forcing users to depend on sub-crates directly.

pub use restmodel_core::{
    FieldAnnotation, FieldType, FieldValue, Mapped, Mapper, ModelHooks, ModelInstance,
    ModelRegistry, ModelSchema, Pagination, RelationKind, RelationSpec, SaveDirective, WriteMethod,
    validate,
};
