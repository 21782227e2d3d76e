//! Router builder for the bookstore HTTP server

use anyhow::anyhow;
use axum::{
    extract::Request,
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use std::{any::Any, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::Uuid;

use bookstore_kernel::ModuleRegistry;

use crate::error::AppError;

/// Restrict a method router to the methods it declares.
///
/// Any other method on the same path answers `400 Method is not allowed`.
/// That includes `HEAD`, which axum would otherwise serve from a `GET`
/// handler, so `route` must not declare `HEAD` itself.
pub fn strict<S>(route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.head(reject_method).fallback(reject_method)
}

/// Handler answering `400 Method is not allowed`.
pub async fn reject_method() -> AppError {
    AppError::method_not_allowed()
}

/// Turn a handler panic into a `500` carrying the panic message.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow!("handler panicked: {}", detail)).into_response()
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7().to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Builder for constructing the main HTTP router
///
/// `Router::layer` only wraps routes that already exist, so mount routes
/// before adding middleware.
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
    pub fn route(mut self, path: &str, route: MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router at the server root
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        tracing::info!(module = module_name, "mounting module routes");
        self.router = self.router.merge(module_router);
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

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        );
        self
    }

    /// Add request ID middleware, echoing the id on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Answer handler panics with a `500` instead of dropping the connection
    pub fn with_catch_panic(mut self) -> Self {
        self.router = self
            .router
            .layer(CatchPanicLayer::custom(panic_response));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = merge_openapi(registry);

        // Deserialize our JSON spec into a proper utoipa OpenApi object
        // so SwaggerUI can serve it
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|_| {
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Bookstore API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Also serve the raw JSON spec for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
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

/// Merge every module's OpenAPI fragment into one document
pub fn merge_openapi(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Bookstore API",
            "version": "1.0.0",
            "description": "In-memory bookstore service"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
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
                openapi_spec["paths"][path] = path_item.clone();
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
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_router_builder_basic() {
        let router = RouterBuilder::new()
            .route("/test", get(|| async { "test" }))
            .build();

        let (status, body) = send(router, Method::GET, "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "test");
    }

    #[tokio::test]
    async fn test_module_mounting_at_root() {
        let module_router = Router::new().route("/books", get(|| async { "module" }));

        let router = RouterBuilder::new()
            .mount_module("books", module_router)
            .build();

        let (status, body) = send(router, Method::GET, "/books").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "module");
    }

    #[tokio::test]
    async fn test_strict_route_rejects_other_methods() {
        let router = RouterBuilder::new()
            .route("/items", strict(post(|| async { "created" })))
            .build();

        let (status, body) = send(router.clone(), Method::GET, "/items").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Method is not allowed");

        let (status, _) = send(router, Method::POST, "/items").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_strict_get_route_rejects_head() {
        let router = RouterBuilder::new()
            .route("/items", strict(get(|| async { "listed" })))
            .build();

        let (status, _) = send(router.clone(), Method::HEAD, "/items").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(router, Method::GET, "/items").await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "listed"));
    }

    async fn explode() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let router = RouterBuilder::new()
            .route("/explode", get(explode))
            .with_catch_panic()
            .build();

        let request = Request::builder()
            .uri("/explode")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(crate::error::TRACE_ID_HEADER));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        if cfg!(debug_assertions) {
            assert_eq!(body, "handler panicked: boom");
        }
    }

    #[tokio::test]
    async fn test_middleware_chain_sets_request_id() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn test_openapi_without_modules_has_health_path() {
        let registry = ModuleRegistry::new();
        let spec = merge_openapi(&registry);
        assert!(spec["paths"]["/healthz"]["get"].is_object());
        assert_eq!(spec["info"]["title"], "Bookstore API");
    }
}
