use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct LiveStatus {
    pub status: &'static str,
}

pub async fn live() -> Json<LiveStatus> {
    Json(LiveStatus { status: "ok" })
}

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/health/live", root_path), get(live))
}
