//! Router builder for the library HTTP server

use axum::{http::StatusCode, routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use library_kernel::ModuleRegistry;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge every module's routes and mount them under `namespace`
    pub fn mount_modules(mut self, namespace: &str, registry: &ModuleRegistry) -> Self {
        let mut api = Router::new();
        for module in registry.modules() {
            tracing::info!(
                module = module.name(),
                "mounting module routes under {}",
                namespace
            );
            api = api.merge(module.routes());
        }

        let namespace = normalize_namespace(namespace);
        self.router = if namespace.is_empty() {
            self.router.merge(api)
        } else {
            self.router.nest(&namespace, api)
        };
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware; the API is read-only so GET is all it allows
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([axum::http::Method::GET])
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(timeout_ms),
            ));
        self
    }

    /// Serve an OpenAPI document merged from every module's fragment
    pub fn with_openapi(mut self, namespace: &str, registry: &ModuleRegistry) -> Self {
        let document = merge_openapi(namespace, registry);

        if let Err(e) = serde_json::from_value::<utoipa::openapi::OpenApi>(document.clone()) {
            tracing::warn!(error = %e, "merged OpenAPI document does not validate");
        }

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(document.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensure a leading slash and drop a trailing one; `/` becomes empty
fn normalize_namespace(namespace: &str) -> String {
    let trimmed = namespace.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Collect the OpenAPI fragments of all modules into one document
fn merge_openapi(namespace: &str, registry: &ModuleRegistry) -> serde_json::Value {
    let namespace = normalize_namespace(namespace);

    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Library API",
            "version": "1.0.0",
            "description": "Read-only catalog of books, authors and categories"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "message": {
                "type": "string"
            }
        },
        "required": ["message"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": {
                                "type": "string"
                            }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                let prefixed_path = format!("{}{}", namespace, path);
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use library_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct PingModule;

    #[async_trait::async_trait]
    impl Module for PingModule {
        fn name(&self) -> &'static str {
            "ping"
        }

        fn routes(&self) -> Router {
            Router::new().route("/ping", get(|| async { "pong" }))
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({
                "paths": {
                    "/ping": {
                        "get": {
                            "summary": "Ping",
                            "responses": {"200": {"description": "pong"}}
                        }
                    }
                }
            }))
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(PingModule)).unwrap();
        registry
    }

    async fn get_status(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn test_namespace_normalization() {
        assert_eq!(normalize_namespace("/library/v1"), "/library/v1");
        assert_eq!(normalize_namespace("library/v1/"), "/library/v1");
        assert_eq!(normalize_namespace("/"), "");
    }

    #[tokio::test]
    async fn test_modules_mounted_under_namespace() {
        let router = RouterBuilder::new()
            .mount_modules("/library/v1", &registry())
            .build();

        assert_eq!(
            get_status(router.clone(), "/library/v1/ping").await,
            StatusCode::OK
        );
        assert_eq!(get_status(router, "/ping").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_middleware_chain() {
        let router = RouterBuilder::new()
            .route("/healthz", get(|| async { "ok" }))
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = router
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_openapi_paths_are_prefixed() {
        let router = RouterBuilder::new()
            .with_openapi("/library/v1", &registry())
            .build();

        let response = router
            .oneshot(
                Request::get("/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"].get("/library/v1/ping").is_some());
        assert!(doc["paths"].get("/healthz").is_some());
        assert!(doc["components"]["schemas"].get("ErrorResponse").is_some());
    }
}
