use super::handlers::flag_diagnosis::{__path_flag_diagnosis, flag_diagnosis};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(flag_diagnosis))]
pub struct FlagApiDoc;

pub fn flag_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/flags", state.args.server.root_path),
        post(flag_diagnosis),
    )
}
