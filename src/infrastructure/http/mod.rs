use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::controllers::{
    audio::AudioController, health, motivation::MotivationController,
};
use crate::infrastructure::config::Config;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID wrapper type for extension
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Tag each request with a generated id, echoed in the response headers
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, header_value);
    }

    response
}

/// Assemble the application router with all routes configured.
/// Shared between the binary and the end-to-end tests.
pub fn build_router(
    motivation_controller: Arc<MotivationController>,
    audio_controller: Arc<AudioController>,
) -> Router {
    let motivation_routes = Router::new()
        .route("/get_motivation", post(MotivationController::get_motivation))
        .with_state(motivation_controller);

    let audio_routes = Router::new()
        .route("/generate_audio", post(AudioController::generate_audio))
        .route("/synthesize", post(AudioController::synthesize))
        .route("/audio_status/:audio_id", get(AudioController::audio_status))
        .route("/audio/:filename", get(AudioController::serve_audio))
        .with_state(audio_controller);

    // The paired front-end is served from another origin; preflights must
    // succeed for every endpoint
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health))
        .merge(motivation_routes)
        .merge(audio_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    motivation_controller: Arc<MotivationController>,
    audio_controller: Arc<AudioController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(motivation_controller, audio_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
