use crate::{
    domain::common::{DoctorVisionConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{flag_log::FileFlagLog, image::FsImageEncoder, llm::GroqVisionClient},
};

pub type DoctorVisionService = Service<FsImageEncoder, GroqVisionClient, FileFlagLog>;

pub fn create_service(config: DoctorVisionConfig) -> Result<DoctorVisionService, CoreError> {
    let vision_client = GroqVisionClient::new(&config.vision)?;
    let flag_log = FileFlagLog::new(&config.flag_log);

    tracing::debug!(
        model = %config.vision.model,
        flag_log = %config.flag_log.path.display(),
        "diagnosis service configured"
    );

    Ok(Service::new(
        FsImageEncoder::new(),
        vision_client,
        flag_log,
        config.vision.model,
    ))
}
