use axum::extract::State;
use doctorvision_core::domain::diagnosis::{ports::DiagnosisService, value_objects::ResetState};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClearDiagnosisResponse {
    pub data: ResetState,
}

#[utoipa::path(
    post,
    path = "/clear",
    tag = "diagnosis",
    summary = "Clear the form",
    description = "Returns the empty form state: no image, no symptoms, no record.",
    responses(
        (status = 200, body = ClearDiagnosisResponse)
    ),
)]
pub async fn clear_diagnosis(State(state): State<AppState>) -> Response<ClearDiagnosisResponse> {
    Response::OK(ClearDiagnosisResponse {
        data: state.service.clear(),
    })
}
