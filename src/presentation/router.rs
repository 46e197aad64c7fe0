use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    cancel_extraction_handler, close_workspace_handler, create_template_handler, export_handler,
    get_template_handler, get_workspace_handler, health_handler, list_templates_handler,
    open_workspace_handler, remove_document_handler, reset_workspace_handler, set_field_handler,
    start_extraction_handler, suggest_template_handler, upload_document_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart boundaries and the small text parts next to the file.
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Oversized files must reach intake so they get the TooLarge error, not a bare 413.
    let body_limit = usize::try_from(state.max_upload_bytes.saturating_mul(2) + FORM_OVERHEAD_BYTES)
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/templates",
            get(list_templates_handler).post(create_template_handler),
        )
        .route("/api/v1/templates/suggest", post(suggest_template_handler))
        .route("/api/v1/templates/{template_id}", get(get_template_handler))
        .route("/api/v1/workspaces", post(open_workspace_handler))
        .route(
            "/api/v1/workspaces/{id}",
            get(get_workspace_handler).delete(close_workspace_handler),
        )
        .route(
            "/api/v1/workspaces/{id}/document",
            put(upload_document_handler).delete(remove_document_handler),
        )
        .route("/api/v1/workspaces/{id}/extract", post(start_extraction_handler))
        .route("/api/v1/workspaces/{id}/cancel", post(cancel_extraction_handler))
        .route("/api/v1/workspaces/{id}/fields/{name}", put(set_field_handler))
        .route("/api/v1/workspaces/{id}/reset", post(reset_workspace_handler))
        .route("/api/v1/workspaces/{id}/export", get(export_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
