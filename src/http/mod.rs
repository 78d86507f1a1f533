pub mod handlers;
pub mod rate_limit;

use crate::config::AppConfig;
use crate::core::pipeline::SubmissionPipeline;
use crate::domain::ports::{DocumentStore, Notifier};
use crate::http::rate_limit::RateLimiter;
use crate::utils::error::{GatewayError, Result};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct AppState<S, N> {
    pub pipeline: SubmissionPipeline<S, N>,
    pub store: Arc<S>,
}

impl<S, N> Clone for AppState<S, N> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S, N> AppState<S, N>
where
    S: DocumentStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: &AppConfig) -> Self {
        let pipeline = SubmissionPipeline::new(
            Arc::clone(&store),
            notifier,
            config.notify_from.clone(),
            config.notify_to.clone(),
        );
        Self { pipeline, store }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::UnknownKind(_) => StatusCode::NOT_FOUND,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(
                "❌ Request failed: {} (category: {:?}, severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        }

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.user_friendly_message(),
        }));
        (status, body).into_response()
    }
}

/// Builds the application router: four submission endpoints behind the rate
/// limiter, plus listing and health.
pub fn router<S, N>(state: AppState<S, N>, config: &AppConfig) -> Result<Router>
where
    S: DocumentStore + 'static,
    N: Notifier + 'static,
{
    let cors = cors_layer(config)?;
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    let submissions = Router::new()
        .route("/api/contact", post(handlers::submit_contact::<S, N>))
        .route("/api/roi", post(handlers::submit_roi::<S, N>))
        .route(
            "/api/culture-quiz",
            post(handlers::submit_culture_quiz::<S, N>),
        )
        .route("/api/quiz-email", post(handlers::submit_quiz_email::<S, N>))
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit::enforce,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/submissions/{kind}",
            get(handlers::list_submissions::<S, N>),
        )
        .merge(submissions)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    match &config.allowed_origin {
        Some(origin) => {
            let origin = origin.parse::<HeaderValue>().map_err(|_| {
                GatewayError::InvalidConfigValue {
                    field: "server.allowed_origin".to_string(),
                    value: origin.clone(),
                    reason: "not a valid origin header value".to_string(),
                }
            })?;
            Ok(cors.allow_origin(origin))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> Result<()> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(GatewayError::Io)
}
