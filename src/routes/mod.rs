// src/routes/mod.rs
pub mod chat;
pub mod health;

use std::time::Instant;

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::config::AllowedOrigins;
use crate::state::SharedState;
use chat::{landing_chat_handler, registration_chat_handler};
use health::{ai_health_handler, health_handler, knowledge_summary_handler, root_handler};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub const ENDPOINTS: &[&str] = &[
    "/",
    "/health",
    "/api/ai/chat/landing",
    "/api/ai/chat/registration",
    "/api/ai/health",
    "/api/ai/knowledge/summary",
];

pub fn create_router() -> Router<SharedState> {
    let ai_routes = Router::new()
        .route("/chat/landing", post(landing_chat_handler))
        .route("/chat/registration", post(registration_chat_handler))
        .route("/health", get(ai_health_handler))
        .route("/knowledge/summary", get(knowledge_summary_handler))
        .method_not_allowed_fallback(method_not_allowed_handler);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .nest("/api/ai", ai_routes)
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

/// Full application: routes, state, request ids and CORS.
pub fn build_app(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    create_router()
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    match origins {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring unusable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

/// Tags each request with a fresh id, logs its outcome and echoes the id back.
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let mut response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "The requested endpoint does not exist",
            "status": 404,
            "available_endpoints": ENDPOINTS,
        })),
    )
}

async fn method_not_allowed_handler(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "method_not_allowed",
            "message": format!("Method {method} is not supported on this endpoint"),
            "status": 405,
            "available_endpoints": ENDPOINTS,
        })),
    )
}
