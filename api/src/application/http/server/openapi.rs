use crate::application::http::{diagnosis::router::DiagnosisApiDoc, flag::router::FlagApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DoctorVision API"
    ),
    nest(
        (path = "/diagnoses", api = DiagnosisApiDoc),
        (path = "/flags", api = FlagApiDoc),
    )
)]
pub struct ApiDoc;
