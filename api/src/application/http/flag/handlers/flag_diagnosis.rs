use axum::{Json, extract::State};
use doctorvision_core::domain::diagnosis::{
    entities::{DiagnosisRecord, FlagOutcome},
    ports::DiagnosisService,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FlagDiagnosisResponse {
    pub data: FlagOutcome,
}

#[utoipa::path(
    post,
    path = "",
    tag = "flag",
    summary = "Flag a diagnosis record",
    description = "Appends the record to the flag log. A failed write is reported as a warning in the body, never as an error status.",
    request_body = DiagnosisRecord,
    responses(
        (status = 200, body = FlagDiagnosisResponse)
    ),
)]
pub async fn flag_diagnosis(
    State(state): State<AppState>,
    Json(record): Json<DiagnosisRecord>,
) -> Response<FlagDiagnosisResponse> {
    let outcome = state.service.flag(record).await;

    Response::OK(FlagDiagnosisResponse { data: outcome })
}
