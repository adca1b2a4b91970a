//! Resource endpoints for RestModel Rust.
//!
//! An [`Endpoint`] wraps one backend resource route and drives the mapping
//! engine around a [`Transport`]: responses are mapped into model graphs on
//! the way in, instances are cleaned into payloads on the way out, and list
//! responses carry a pagination descriptor with lazy page-navigation
//! continuations.
//!
//! # Design Philosophy
//!
//! - **Single-shot calls**: no retry, no batching, no local recovery; every
//!   failure surfaces to the caller as-is.
//! - **Raw errors**: a status >= 400 rejects with the unmapped response body.
//! - **Caller-owned instances**: writes clean *copies*; the caller's model
//!   values are never mutated or consumed.
//!
//! # Example
//!
//! ```ignore
//! let api = ApiBuilder::new()
//!     .base_route("https://api.example.com")
//!     .head_response_header_prefix("X-Pagination-")
//!     .endpoint("users", EndpointConfig::new("/users", "User"))
//!     .build(transport, registry);
//!
//! let users = api.endpoint("users").unwrap();
//! let page = users.get(&cx, &Params::new()).await?;
//! let next = page.next(&cx).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use asupersync::{Cx, Outcome};
use serde_json::Value;

use restmodel_core::{
    Error, Mapped, Mapper, ModelInstance, ModelRegistry, Pagination, Result, WriteMethod,
};

pub mod transport;

pub use transport::{Headers, Params, RawResponse, Transport};

// ============================================================================
// Endpoint Configuration
// ============================================================================

/// Configuration for one endpoint: route, model, response container.
///
/// A simple fluent record; the container defaults to the endpoint's
/// registration name, and the base route defaults to the API-wide one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    route: String,
    model: &'static str,
    container: Option<String>,
    base_route: Option<String>,
}

impl EndpointConfig {
    /// Configure an endpoint at `route`, mapped through the named model.
    #[must_use]
    pub fn new(route: impl Into<String>, model: &'static str) -> Self {
        Self {
            route: route.into(),
            model,
            container: None,
            base_route: None,
        }
    }

    /// Set the response field that wraps list payloads.
    #[must_use]
    pub fn container(mut self, name: impl Into<String>) -> Self {
        self.container = Some(name.into());
        self
    }

    /// Override the API-wide base route for this endpoint.
    #[must_use]
    pub fn base_route(mut self, route: impl Into<String>) -> Self {
        self.base_route = Some(route.into());
        self
    }
}

// ============================================================================
// API Registry
// ============================================================================

/// Builder collecting endpoint configurations before the transport exists.
#[derive(Debug, Default)]
pub struct ApiBuilder {
    base_route: String,
    head_prefix: Option<String>,
    endpoints: Vec<(String, EndpointConfig)>,
}

impl ApiBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base route prepended to every endpoint route.
    #[must_use]
    pub fn base_route(mut self, route: impl Into<String>) -> Self {
        self.base_route = route.into();
        self
    }

    /// Set the header prefix HEAD responses are filtered by.
    ///
    /// The wildcard `"*"` (or leaving this unset) passes headers through
    /// unfiltered.
    #[must_use]
    pub fn head_response_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.head_prefix = Some(prefix.into());
        self
    }

    /// Register an endpoint under a name.
    #[must_use]
    pub fn endpoint(mut self, name: impl Into<String>, config: EndpointConfig) -> Self {
        self.endpoints.push((name.into(), config));
        self
    }

    /// Instantiate every registered endpoint over the given transport.
    #[must_use]
    pub fn build<T: Transport>(self, transport: Arc<T>, registry: Arc<ModelRegistry>) -> Api<T> {
        let mut endpoints = HashMap::new();
        for (name, config) in self.endpoints {
            let base = config
                .base_route
                .clone()
                .unwrap_or_else(|| self.base_route.clone());
            let mut endpoint = Endpoint::new(
                name.clone(),
                config,
                Arc::clone(&transport),
                Arc::clone(&registry),
            );
            endpoint.route = format!("{base}{}", endpoint.route);
            if let Some(prefix) = &self.head_prefix {
                endpoint.head_prefix = Some(prefix.clone());
            }
            endpoints.insert(name, endpoint);
        }
        Api { endpoints }
    }
}

/// The built API: one endpoint per registered name.
#[derive(Debug)]
pub struct Api<T: Transport> {
    endpoints: HashMap<String, Endpoint<T>>,
}

impl<T: Transport> Api<T> {
    /// Look an endpoint up by its registration name.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint<T>> {
        self.endpoints.get(name)
    }

    /// Number of registered endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// True when no endpoints are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

// ============================================================================
// Endpoint
// ============================================================================

/// One backend resource, with the five verb operations.
pub struct Endpoint<T: Transport> {
    name: String,
    route: String,
    model: &'static str,
    container: String,
    head_prefix: Option<String>,
    transport: Arc<T>,
    registry: Arc<ModelRegistry>,
}

impl<T: Transport> std::fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("route", &self.route)
            .field("model", &self.model)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Endpoint<T> {
    /// Create an endpoint from its configuration.
    ///
    /// The container defaults to the endpoint name. When built through an
    /// [`ApiBuilder`], the base route and HEAD header prefix are applied on
    /// top of this.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        config: EndpointConfig,
        transport: Arc<T>,
        registry: Arc<ModelRegistry>,
    ) -> Self {
        let name = name.into();
        let container = config.container.unwrap_or_else(|| name.clone());
        Self {
            name,
            route: config.route,
            model: config.model,
            container,
            head_prefix: None,
            transport,
            registry,
        }
    }

    /// Set the header prefix HEAD responses are filtered by.
    #[must_use]
    pub fn head_response_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.head_prefix = Some(prefix.into());
        self
    }

    /// The endpoint's registration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full route this endpoint calls.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Reject error statuses with the raw body; pass others through.
    fn accept(&self, response: RawResponse) -> Result<Value> {
        if response.is_error() {
            return Err(Error::Http {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    fn map_body(&self, body: &Value) -> Result<Mapped> {
        Mapper::new(&self.registry).map_result(self.model, body, Some(self.container.as_str()))
    }

    /// Read the resource, mapping the response into model instances.
    ///
    /// The returned [`GetResult`] carries the response's pagination
    /// descriptor (when present) and re-issues this call for page
    /// navigation.
    #[tracing::instrument(level = "debug", skip(self, cx, params), fields(endpoint = %self.name))]
    pub async fn get(&self, cx: &Cx, params: &Params) -> Outcome<GetResult<'_, T>, Error> {
        tracing::debug!(endpoint = %self.name, "Endpoint called");

        let response = match self.transport.get(cx, &self.route, params).await {
            Outcome::Ok(response) => response,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        let body = match self.accept(response) {
            Ok(body) => body,
            Err(e) => return Outcome::Err(e),
        };

        let pagination = Pagination::from_body(&body);
        let result = match self.map_body(&body) {
            Ok(mapped) => mapped,
            Err(e) => return Outcome::Err(e),
        };

        Outcome::Ok(GetResult {
            endpoint: self,
            params: params.clone(),
            pagination,
            result,
        })
    }

    /// Issue a HEAD and return the response headers.
    ///
    /// With a configured prefix (other than the wildcard `"*"`), headers not
    /// starting with it (case-insensitive) are dropped, and matching headers
    /// are exposed a second time under the de-prefixed alias.
    #[tracing::instrument(level = "debug", skip(self, cx, params), fields(endpoint = %self.name))]
    pub async fn head(&self, cx: &Cx, params: &Params) -> Outcome<Headers, Error> {
        tracing::debug!(endpoint = %self.name, "Endpoint called (HEAD)");

        let headers = match self.transport.head(cx, &self.route, params).await {
            Outcome::Ok(headers) => headers,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };

        Outcome::Ok(self.filter_headers(headers))
    }

    fn filter_headers(&self, headers: Headers) -> Headers {
        let Some(prefix) = self.head_prefix.as_deref().filter(|p| *p != "*") else {
            return headers;
        };
        let prefix_lower = prefix.to_lowercase();

        let mut filtered = Headers::new();
        for (name, value) in headers {
            if !name.to_lowercase().starts_with(&prefix_lower) {
                continue;
            }
            let alias = name[prefix.len()..].to_string();
            filtered.insert(name, value.clone());
            filtered.insert(alias, value);
        }
        filtered
    }

    /// Create the resource from a cleaned copy of the instance.
    ///
    /// The response body is mapped exactly like a read response.
    #[tracing::instrument(level = "debug", skip(self, cx, params, model), fields(endpoint = %self.name))]
    pub async fn save(
        &self,
        cx: &Cx,
        params: &Params,
        model: &ModelInstance,
    ) -> Outcome<Mapped, Error> {
        let payload = match Mapper::new(&self.registry).clean(model.clone(), WriteMethod::Save) {
            Ok(payload) => payload,
            Err(e) => return Outcome::Err(e),
        };
        tracing::debug!(endpoint = %self.name, model = model.model(), "Model prepared for save");

        let response = match self.transport.post(cx, &self.route, params, &payload).await {
            Outcome::Ok(response) => response,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        let body = match self.accept(response) {
            Ok(body) => body,
            Err(e) => return Outcome::Err(e),
        };

        match self.map_body(&body) {
            Ok(mapped) => Outcome::Ok(mapped),
            Err(e) => Outcome::Err(e),
        }
    }

    /// Alias of [`Endpoint::save`].
    pub async fn post(
        &self,
        cx: &Cx,
        params: &Params,
        model: &ModelInstance,
    ) -> Outcome<Mapped, Error> {
        self.save(cx, params, model).await
    }

    /// Update the resource from a cleaned copy of the instance.
    #[tracing::instrument(level = "debug", skip(self, cx, params, model), fields(endpoint = %self.name))]
    pub async fn update(
        &self,
        cx: &Cx,
        params: &Params,
        model: &ModelInstance,
    ) -> Outcome<Mapped, Error> {
        let payload = match Mapper::new(&self.registry).clean(model.clone(), WriteMethod::Update) {
            Ok(payload) => payload,
            Err(e) => return Outcome::Err(e),
        };
        self.send_update(cx, params, payload).await
    }

    /// Update element-wise from cleaned copies of a sequence of instances.
    ///
    /// The caller's instances are left untouched.
    #[tracing::instrument(level = "debug", skip(self, cx, params, models), fields(endpoint = %self.name))]
    pub async fn update_many(
        &self,
        cx: &Cx,
        params: &Params,
        models: &[ModelInstance],
    ) -> Outcome<Mapped, Error> {
        let mapper = Mapper::new(&self.registry);
        let mut cleaned = Vec::with_capacity(models.len());
        for model in models {
            match mapper.clean(model.clone(), WriteMethod::Update) {
                Ok(payload) => cleaned.push(payload),
                Err(e) => return Outcome::Err(e),
            }
        }
        self.send_update(cx, params, Value::Array(cleaned)).await
    }

    async fn send_update(
        &self,
        cx: &Cx,
        params: &Params,
        payload: Value,
    ) -> Outcome<Mapped, Error> {
        tracing::debug!(endpoint = %self.name, "Model prepared for update");

        let response = match self.transport.put(cx, &self.route, params, &payload).await {
            Outcome::Ok(response) => response,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        let body = match self.accept(response) {
            Ok(body) => body,
            Err(e) => return Outcome::Err(e),
        };

        match self.map_body(&body) {
            Ok(mapped) => Outcome::Ok(mapped),
            Err(e) => Outcome::Err(e),
        }
    }

    /// Alias of [`Endpoint::update`].
    pub async fn put(
        &self,
        cx: &Cx,
        params: &Params,
        model: &ModelInstance,
    ) -> Outcome<Mapped, Error> {
        self.update(cx, params, model).await
    }

    /// Alias of [`Endpoint::update_many`].
    pub async fn put_many(
        &self,
        cx: &Cx,
        params: &Params,
        models: &[ModelInstance],
    ) -> Outcome<Mapped, Error> {
        self.update_many(cx, params, models).await
    }

    /// Delete the resource the instance identifies.
    ///
    /// The identifier value comes from the instance's schema reference field
    /// and is merged into the params under the key `id`; explicit params win
    /// on conflict. Resolves with no value.
    #[tracing::instrument(level = "debug", skip(self, cx, params, model), fields(endpoint = %self.name))]
    pub async fn remove(
        &self,
        cx: &Cx,
        params: &Params,
        model: &ModelInstance,
    ) -> Outcome<(), Error> {
        let schema = match self.registry.get(model.model()) {
            Ok(schema) => schema,
            Err(e) => return Outcome::Err(e),
        };
        let reference = schema.reference_field();
        let identifier = match model.get(reference) {
            Some(value) if !value.is_null() => value.clone().into_json(),
            _ => {
                return Outcome::Err(Error::MissingReference {
                    model: model.model().to_string(),
                    reference: reference.to_string(),
                });
            }
        };

        // The request key is literally `id`, whatever the reference field
        // is called; explicit params override it.
        let merged = Params::new().with("id", identifier).merged(params);
        tracing::debug!(endpoint = %self.name, model = model.model(), "Model prepared for remove");

        let response = match self.transport.delete(cx, &self.route, &merged).await {
            Outcome::Ok(response) => response,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        match self.accept(response) {
            Ok(_) => Outcome::Ok(()),
            Err(e) => Outcome::Err(e),
        }
    }

    /// Alias of [`Endpoint::remove`].
    pub async fn delete(
        &self,
        cx: &Cx,
        params: &Params,
        model: &ModelInstance,
    ) -> Outcome<(), Error> {
        self.remove(cx, params, model).await
    }
}

// ============================================================================
// Paginated Read Results
// ============================================================================

/// A mapped read result with its pagination descriptor and lazy page
/// navigation.
///
/// Navigation re-issues the originating `get` with `_skip`/`_limit`
/// recomputed from *this* result's descriptor, merged over the original
/// call's parameters.
#[derive(Debug)]
pub struct GetResult<'a, T: Transport> {
    endpoint: &'a Endpoint<T>,
    params: Params,
    /// The response's pagination descriptor, when the body carried one.
    pub pagination: Option<Pagination>,
    /// The mapped response.
    pub result: Mapped,
}

impl<'a, T: Transport> GetResult<'a, T> {
    /// The endpoint this result came from.
    #[must_use]
    pub fn endpoint(&self) -> &'a Endpoint<T> {
        self.endpoint
    }

    /// Consume into the mapped response.
    #[must_use]
    pub fn into_result(self) -> Mapped {
        self.result
    }

    async fn navigate(&self, cx: &Cx, skip: i64, limit: i64) -> Outcome<GetResult<'a, T>, Error> {
        let overrides = Params::new().with("_skip", skip).with("_limit", limit);
        let params = self.params.merged(&overrides);
        self.endpoint.get(cx, &params).await
    }

    /// Fetch the following page.
    pub async fn next(&self, cx: &Cx) -> Outcome<GetResult<'a, T>, Error> {
        match self.pagination.as_ref() {
            Some(p) => self.navigate(cx, p.next_skip(), p.limit).await,
            None => Outcome::Err(Error::MissingPagination),
        }
    }

    /// Fetch the preceding page.
    pub async fn previous(&self, cx: &Cx) -> Outcome<GetResult<'a, T>, Error> {
        match self.pagination.as_ref() {
            Some(p) => self.navigate(cx, p.previous_skip(), p.limit).await,
            None => Outcome::Err(Error::MissingPagination),
        }
    }

    /// Fetch an absolute page (1-based).
    pub async fn page(&self, cx: &Cx, page: i64) -> Outcome<GetResult<'a, T>, Error> {
        match self.pagination.as_ref() {
            Some(p) => self.navigate(cx, p.page_skip(page), p.limit).await,
            None => Outcome::Err(Error::MissingPagination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restmodel_core::{FieldAnnotation, ModelSchema};

    struct NoTransport;

    impl Transport for NoTransport {
        fn get(
            &self,
            _cx: &Cx,
            _route: &str,
            _params: &Params,
        ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send {
            async { Outcome::Err(Error::Transport("unreachable".to_string())) }
        }

        fn head(
            &self,
            _cx: &Cx,
            _route: &str,
            _params: &Params,
        ) -> impl Future<Output = Outcome<Headers, Error>> + Send {
            async { Outcome::Err(Error::Transport("unreachable".to_string())) }
        }

        fn post(
            &self,
            _cx: &Cx,
            _route: &str,
            _params: &Params,
            _body: &Value,
        ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send {
            async { Outcome::Err(Error::Transport("unreachable".to_string())) }
        }

        fn put(
            &self,
            _cx: &Cx,
            _route: &str,
            _params: &Params,
            _body: &Value,
        ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send {
            async { Outcome::Err(Error::Transport("unreachable".to_string())) }
        }

        fn delete(
            &self,
            _cx: &Cx,
            _route: &str,
            _params: &Params,
        ) -> impl Future<Output = Outcome<RawResponse, Error>> + Send {
            async { Outcome::Err(Error::Transport("unreachable".to_string())) }
        }
    }

    fn registry() -> Arc<ModelRegistry> {
        let mut registry = ModelRegistry::new();
        registry.register(ModelSchema::new("User").field(FieldAnnotation::int("id")));
        Arc::new(registry)
    }

    fn endpoint(config: EndpointConfig) -> Endpoint<NoTransport> {
        Endpoint::new("users", config, Arc::new(NoTransport), registry())
    }

    #[test]
    fn test_container_defaults_to_endpoint_name() {
        let ep = endpoint(EndpointConfig::new("/users", "User"));
        assert_eq!(ep.container, "users");

        let ep = endpoint(EndpointConfig::new("/users", "User").container("data"));
        assert_eq!(ep.container, "data");
    }

    #[test]
    fn test_api_builder_applies_base_route_and_prefix() {
        let api = ApiBuilder::new()
            .base_route("https://api.example.com")
            .head_response_header_prefix("X-Meta-")
            .endpoint("users", EndpointConfig::new("/users", "User"))
            .endpoint(
                "admin",
                EndpointConfig::new("/admin", "User").base_route("https://admin.example.com"),
            )
            .build(Arc::new(NoTransport), registry());

        assert_eq!(api.len(), 2);
        let users = api.endpoint("users").unwrap();
        assert_eq!(users.route(), "https://api.example.com/users");
        assert_eq!(users.head_prefix.as_deref(), Some("X-Meta-"));

        let admin = api.endpoint("admin").unwrap();
        assert_eq!(admin.route(), "https://admin.example.com/admin");
        assert!(api.endpoint("ghost").is_none());
    }

    #[test]
    fn test_filter_headers_prefix_and_alias() {
        let ep = endpoint(EndpointConfig::new("/users", "User"))
            .head_response_header_prefix("X-Pagination-");

        let mut headers = Headers::new();
        headers.insert("x-pagination-count".to_string(), "25".to_string());
        headers.insert("X-Pagination-Limit".to_string(), "10".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let filtered = ep.filter_headers(headers);
        assert_eq!(filtered.get("x-pagination-count").map(String::as_str), Some("25"));
        assert_eq!(filtered.get("count").map(String::as_str), Some("25"));
        assert_eq!(filtered.get("X-Pagination-Limit").map(String::as_str), Some("10"));
        assert_eq!(filtered.get("Limit").map(String::as_str), Some("10"));
        assert!(!filtered.contains_key("Content-Type"));
    }

    #[test]
    fn test_filter_headers_wildcard_passes_through() {
        let ep =
            endpoint(EndpointConfig::new("/users", "User")).head_response_header_prefix("*");

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let filtered = ep.filter_headers(headers.clone());
        assert_eq!(filtered, headers);
    }

    #[test]
    fn test_filter_headers_without_prefix_passes_through() {
        let ep = endpoint(EndpointConfig::new("/users", "User"));

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let filtered = ep.filter_headers(headers.clone());
        assert_eq!(filtered, headers);
    }

    #[test]
    fn test_accept_rejects_error_statuses_with_raw_body() {
        let ep = endpoint(EndpointConfig::new("/users", "User"));

        let body = serde_json::json!({"message": "boom"});
        let err = ep
            .accept(RawResponse::new(500, body.clone()))
            .unwrap_err();
        assert_eq!(
            err,
            Error::Http {
                status: 500,
                body,
            }
        );

        let ok = ep.accept(RawResponse::new(200, serde_json::json!({"id": 1})));
        assert!(ok.is_ok());
    }
}
