use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::{
    config::{AppConfig, CorsOrigins},
    error::ServiceError,
    gateway::ModelGateway,
    simplify::{SimplificationRequest, SimplificationResult, simplify},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn ModelGateway>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Health,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
}

pub fn build_router(config: Arc<AppConfig>, gateway: Arc<dyn ModelGateway>) -> Router {
    let cors = cors_layer(&config.cors_origins);
    let state = AppState { config, gateway };

    Router::new()
        .route("/health", get(health))
        .route("/simplify", post(simplify_text))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(acknowledge_preflight))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(cors::Any)
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.gateway.list_models().await {
        Ok(models) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: Health::Healthy,
                message: "Server and Ollama are running".to_string(),
                models: Some(models),
            }),
        ),
        Err(err) => {
            error!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: Health::Unhealthy,
                    message: err.to_string(),
                    models: None,
                }),
            )
        }
    }
}

/// The CORS layer answers every OPTIONS request with an empty body; browser
/// clients of `/simplify` expect `{"status": "ok"}` on top of the CORS headers.
async fn acknowledge_preflight(request: Request, next: Next) -> Response {
    let acknowledge = request.method() == Method::OPTIONS && request.uri().path() == "/simplify";
    let response = next.run(request).await;
    if !acknowledge || !response.status().is_success() {
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut ack = Json(serde_json::json!({ "status": "ok" })).into_response();
    ack.headers_mut().extend(parts.headers);
    ack
}

async fn simplify_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SimplificationResult>, ServiceError> {
    let request = SimplificationRequest::from_body(&body)?;
    let result = simplify(state.gateway.as_ref(), &state.config.model, request).await?;
    Ok(Json(result))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "request handler panicked");

    let body = serde_json::json!({ "error": detail });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
