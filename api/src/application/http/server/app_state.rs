use std::sync::Arc;

use doctorvision_core::application::DoctorVisionService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DoctorVisionService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DoctorVisionService) -> Self {
        Self { args, service }
    }
}
