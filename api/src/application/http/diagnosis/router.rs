use super::handlers::{
    clear_diagnosis::{__path_clear_diagnosis, clear_diagnosis},
    submit_diagnosis::{MAX_IMAGE_SIZE, __path_submit_diagnosis, submit_diagnosis},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(submit_diagnosis, clear_diagnosis))]
pub struct DiagnosisApiDoc;

pub fn diagnosis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/diagnoses", state.args.server.root_path),
            post(submit_diagnosis).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 64 * 1024)),
        )
        .route(
            &format!("{}/diagnoses/clear", state.args.server.root_path),
            post(clear_diagnosis),
        )
}
