//! RestModel Rust: typed binding for REST resources.
//!
//! `restmodel` is the **facade crate**: it re-exports the public surface of the
//! ecosystem so applications depend on one crate.
//!
//! # The Pieces
//!
//! - **Schemas**: [`ModelSchema`] tables of [`FieldAnnotation`]s, registered in
//!   a [`ModelRegistry`], describe how raw JSON maps onto model instances:
//!   scalar types, relations, and per-field save directives.
//! - **Engine**: [`Mapper`] resolves relations recursively on the way in and
//!   cleans instances into write-ready payloads on the way out.
//! - **Endpoints**: [`Endpoint`] wraps one backend resource behind a
//!   [`Transport`] and exposes the five verb operations; list reads carry a
//!   [`Pagination`] descriptor and lazy page navigation.
//!
//! # Example
//!
//! ```ignore
//! use restmodel::prelude::*;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register(
//!     ModelSchema::new("User")
//!         .field(FieldAnnotation::int("id"))
//!         .field(FieldAnnotation::string("name"))
//!         .field(FieldAnnotation::relation("posts", RelationSpec::many("Post"))),
//! );
//!
//! let api = ApiBuilder::new()
//!     .base_route("https://api.example.com")
//!     .endpoint("users", EndpointConfig::new("/users", "User"))
//!     .build(transport, Arc::new(registry));
//!
//! let page = api.endpoint("users").unwrap().get(&cx, &Params::new()).await?;
//! ```

pub mod endpoint;
pub mod model;

pub use restmodel_core::{
    Budget, Cx, Error, FieldAnnotation, FieldType, FieldValue, Mapped, Mapper, ModelHooks,
    ModelInstance, ModelRegistry, ModelSchema, Outcome, Pagination, RelationKind, RelationSpec,
    Result, SaveDirective, WriteMethod, validate,
};
pub use restmodel_endpoint::{
    Api, ApiBuilder, Endpoint, EndpointConfig, GetResult, Headers, Params, RawResponse, Transport,
};

/// Everything most applications need, in one import.
pub mod prelude {
    pub use restmodel_core::{
        Cx, Error, FieldAnnotation, FieldType, FieldValue, Mapped, Mapper, ModelHooks,
        ModelInstance, ModelRegistry, ModelSchema, Outcome, Pagination, RelationKind, RelationSpec,
        Result, SaveDirective, WriteMethod,
    };
    pub use restmodel_endpoint::{
        Api, ApiBuilder, Endpoint, EndpointConfig, GetResult, Headers, Params, RawResponse,
        Transport,
    };
}
