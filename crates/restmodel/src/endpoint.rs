//! Resource endpoint re-exports.
//!
//! `restmodel::Endpoint` wraps one backend resource behind a transport and
//! drives the mapping engine around its five verb operations.
//!
//! The implementation lives in the separate `restmodel-endpoint` crate. This
//! module exists so the `restmodel` facade can expose the endpoint layer
//! without forcing users to depend on sub-crates directly.

pub use restmodel_endpoint::{
    Api, ApiBuilder, Endpoint, EndpointConfig, GetResult, Headers, Params, RawResponse, Transport,
    transport,
};
