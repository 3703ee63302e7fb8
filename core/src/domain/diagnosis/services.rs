use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    diagnosis::{
        entities::{DiagnosisRecord, FlagOutcome},
        helpers::{classify, resolve_doctor, resolve_solutions, resolve_type, resolve_urgency},
        ports::{DiagnosisService, FlagLog, ImageEncoder, VisionClient},
        prompt::{NO_IMAGE_ANSWER, build_vision_prompt},
        value_objects::{ResetState, SymptomRequest},
    },
};

impl<IE, VC, FL> DiagnosisService for Service<IE, VC, FL>
where
    IE: ImageEncoder,
    VC: VisionClient,
    FL: FlagLog,
{
    async fn submit(&self, request: SymptomRequest) -> Result<DiagnosisRecord, CoreError> {
        // 1. Normalize symptoms
        let symptom_text = request.symptom_text.trim().to_string();

        // 2. Ask the model, only when there is something to look at
        let answer = match request.image() {
            Some(image_path) => {
                let image = self.image_encoder.encode(image_path.clone()).await?;
                self.vision_client
                    .query(
                        build_vision_prompt(&symptom_text),
                        image,
                        self.model.clone(),
                    )
                    .await?
            }
            None => NO_IMAGE_ANSWER.to_string(),
        };

        // 3. Classify and resolve attributes
        let category = classify(&format!("{answer}\n{symptom_text}"));

        info!(
            category = %category,
            has_image = request.image().is_some(),
            "diagnosis classified"
        );

        Ok(DiagnosisRecord {
            symptom_text,
            disease_category: category,
            disease_type: resolve_type(category),
            solutions: resolve_solutions(category),
            recommended_doctor: resolve_doctor(category),
            urgency: resolve_urgency(category),
            uploaded_image_path: request
                .image()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            created_at: Utc::now(),
        })
    }

    fn clear(&self) -> ResetState {
        ResetState::default()
    }

    async fn flag(&self, record: DiagnosisRecord) -> FlagOutcome {
        match self.flag_log.append(record).await {
            Ok(()) => FlagOutcome::flagged(),
            Err(e) => {
                warn!(error = %e, "could not flag diagnosis record");
                FlagOutcome::warning(e)
            }
        }
    }
}
