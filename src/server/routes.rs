//! Router and request handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::error::ApiError;
use crate::agent::Orchestrator;
use crate::error::WorkflowError;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Workflow engine; read-only across requests.
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Wraps an orchestrator for use as router state.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    /// Customer message.
    pub message: String,
    /// Opaque identifier echoed back unchanged.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Response of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Customer-facing answer.
    pub response: String,
    /// Identifier from the request, if any.
    pub conversation_id: Option<String>,
}

/// Builds the application router.
///
/// When `static_dir` names an existing directory it is served for every
/// path not matched by the API, with `index.html` as the not-found page.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state);

    if let Some(dir) = static_dir {
        if dir.is_dir() {
            info!(dir = %dir.display(), "serving static files");
            let serve_dir =
                ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            app = app.fallback_service(serve_dir);
        } else {
            warn!(dir = %dir.display(), "static directory not found, not serving files");
        }
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError> {
    if body.message.trim().is_empty() {
        return Err(WorkflowError::EmptyInput.into());
    }

    let response = state
        .orchestrator
        .run(&body.message)
        .await
        .inspect_err(|e| error!(error = %e, "chat request failed"))?;

    Ok(Json(ChatReply {
        response,
        conversation_id: body.conversation_id,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
