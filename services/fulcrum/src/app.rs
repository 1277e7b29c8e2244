//! HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::observability;
use crate::store::FulcrumStore;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub api_version: String,
    pub store: Arc<dyn FulcrumStore + Send + Sync>,
}

impl AppState {
    pub fn new(store: Arc<dyn FulcrumStore + Send + Sync>) -> Self {
        Self {
            api_version: "v1".to_string(),
            store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route("/api/health", get(api::system::system_health))
        .route("/api/info", get(api::system::system_info))
        .route(
            "/api/onboardings",
            get(api::onboardings::list_onboardings).post(api::onboardings::create_onboarding),
        )
        .route(
            "/api/onboardings/:id",
            get(api::onboardings::get_onboarding)
                .put(api::onboardings::update_onboarding)
                .delete(api::onboardings::delete_onboarding),
        )
        .route(
            "/api/schemas",
            get(api::schemas::list_schemas).post(api::schemas::create_schema),
        )
        .route("/api/schemas/:id", get(api::schemas::get_schema))
        .route(
            "/api/schemas/:id/versions",
            axum::routing::post(api::schemas::add_schema_version),
        )
        .route(
            "/api/schemas/:id/versions/:version",
            get(api::schemas::get_schema_version),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .layer(trace_layer)
        .with_state(state)
}
