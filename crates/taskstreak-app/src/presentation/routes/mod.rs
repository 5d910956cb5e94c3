mod dashboard;
mod tasks;

use axum::response::{Html, IntoResponse};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::presentation::state::AppState;

pub type SharedState = Arc<AppState>;

const DASHBOARD_PAGE: &str = include_str!("../assets/index.html");

/// Build the Axum router with all routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::add_task))
        .route("/api/tasks/{id}", delete(tasks::delete_task))
        .route("/api/tasks/{id}/complete", post(tasks::complete_task))
        .route("/api/tasks/{id}/uncomplete", post(tasks::uncomplete_task))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index_handler() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
