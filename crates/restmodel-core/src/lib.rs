//! Core types and the mapping engine for RestModel Rust.
//!
//! `restmodel-core` is the **foundation layer** for the entire ecosystem. It defines
//! the per-field annotation schema, the runtime model value, and the engine that
//! moves data between raw JSON payloads and mapped model graphs.
//!
//! # Role In The Architecture
//!
//! - **Schema layer**: [`FieldAnnotation`] and [`ModelSchema`] describe each model
//!   field's type, relation semantics, and serialization directive as explicit,
//!   model-authored tables.
//! - **Data model**: [`ModelInstance`] and [`FieldValue`] represent mapped payloads;
//!   [`Pagination`] represents page-navigation metadata derived from list responses.
//! - **Engine**: [`Mapper`] performs inbound mapping (raw JSON into model graphs,
//!   relations resolved recursively), outbound cleaning (model graphs into
//!   write-ready payloads), and the validity check backed by the [`validate`]
//!   predicates.
//! - **Structured concurrency**: re-exports `Cx` and `Outcome` from asupersync so
//!   the endpoint layer's async operations are cancel-correct and budget-aware.
//!
//! # Who Uses This Crate
//!
//! - `restmodel-endpoint` drives the engine from its verb operations and consumes
//!   [`Pagination`] for page navigation.
//! - Applications author [`ModelSchema`] tables and register them in a
//!   [`ModelRegistry`]; most should use the `restmodel` facade rather than this
//!   crate directly.

// Re-export asupersync primitives for structured concurrency
pub use asupersync::{Budget, Cx, Outcome, RegionId, TaskId};

pub mod error;
pub mod field;
pub mod instance;
pub mod mapping;
pub mod pagination;
pub mod registry;
pub mod validate;

pub use error::{Error, Result};
pub use field::{FieldAnnotation, FieldType, RelationKind, RelationSpec, SaveDirective};
pub use instance::{FieldValue, ModelInstance};
pub use mapping::{Mapped, Mapper};
pub use pagination::Pagination;
pub use registry::{ModelHooks, ModelRegistry, ModelSchema, WriteMethod};
