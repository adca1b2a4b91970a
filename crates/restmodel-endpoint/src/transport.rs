//! The transport seam.
//!
//! The HTTP layer is an external collaborator: endpoints are generic over a
//! [`Transport`] that exposes the five verb calls and returns plain JSON. The
//! trait mirrors how database drivers sit behind a connection trait; this
//! crate never opens a socket itself.

use std::collections::BTreeMap;

use asupersync::{Cx, Outcome};
use serde::Serialize;
use serde_json::Value;

use restmodel_core::Error;

/// Response headers, by name.
pub type Headers = BTreeMap<String, String>;

/// A raw verb response: status code plus decoded JSON body.
///
/// Transports report HTTP-level failures (status >= 400) here, body intact;
/// only outright call failures become [`Error::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded response body.
    pub body: Value,
}

impl RawResponse {
    /// Create a response from status and body.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// True when the status signals an error (>= 400).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Request parameters, merged over route templates or appended as query
/// parameters by the transport.
///
/// Ordered by key so merged parameter sets are deterministic. Serializes as a
/// plain map, so transports can feed it straight to a query-string encoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: BTreeMap<String, Value>,
}

impl Serialize for Params {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Fluent variant of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Merge `overrides` over this set; overriding keys win.
    #[must_use]
    pub fn merged(&self, overrides: &Params) -> Params {
        let mut merged = self.clone();
        for (key, value) in &overrides.entries {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Verb-based access to one backend, returning or accepting plain JSON.
///
/// Implementations decide how `route` and `params` combine into a request
/// (route templating, query strings) and enforce their own timeouts; this
/// layer imposes none. All methods are single-shot: no retries.
pub trait Transport: Send + Sync {
    /// Issue a GET.
    fn get(
        &self,
        cx: &Cx,
        route: &str,
        params: &Params,
    ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send;

    /// Issue a HEAD, returning response headers.
    fn head(
        &self,
        cx: &Cx,
        route: &str,
        params: &Params,
    ) -> impl Future<Output = Outcome<Headers, Error>> + Send;

    /// Issue a POST carrying a JSON body.
    fn post(
        &self,
        cx: &Cx,
        route: &str,
        params: &Params,
        body: &Value,
    ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send;

    /// Issue a PUT carrying a JSON body.
    fn put(
        &self,
        cx: &Cx,
        route: &str,
        params: &Params,
        body: &Value,
    ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send;

    /// Issue a DELETE.
    fn delete(
        &self,
        cx: &Cx,
        route: &str,
        params: &Params,
    ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send;
}
