use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use domain::Command;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const INVALID_RESULT_MESSAGE: &str = "Invalid result. Must be 'accepted' or 'rejected'.";

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/conveyor", post(conveyor_command))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn conveyor_command(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected conveyor request body");
            return invalid_result();
        }
    };

    let command = match body.get("result").and_then(Value::as_str) {
        Some(result) => match result.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Invalid conveyor result");
                return invalid_result();
            }
        },
        None => {
            warn!(body = %body, "Conveyor request without string result");
            return invalid_result();
        }
    };

    info!(command = %command, "Received command for conveyor");
    state.dispatcher.dispatch(command);

    (
        StatusCode::OK,
        Json(json!({
            "message": format!("Conveyor command '{}' received and processing.", command)
        })),
    )
        .into_response()
}

fn invalid_result() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": INVALID_RESULT_MESSAGE })),
    )
        .into_response()
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "backend": state.backend }))
}
