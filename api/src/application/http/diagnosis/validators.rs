use bytes::Bytes;
use utoipa::ToSchema;
use validator::Validate;

/// Multipart form accepted by the submit endpoint.
#[derive(Debug, Default, ToSchema, Validate)]
pub struct SubmitDiagnosisForm {
    /// Photo of the affected area
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Bytes>,
    #[validate(length(max = 5000, message = "symptoms must be at most 5000 characters"))]
    pub symptoms: String,
}
