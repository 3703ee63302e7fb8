use std::future::Future;
use std::path::PathBuf;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diagnosis::{
        entities::{DiagnosisRecord, EncodedImage, FlagOutcome},
        value_objects::{ResetState, SymptomRequest},
    },
};

/// Turns an on-disk image into a transport-ready payload
#[cfg_attr(test, mockall::automock)]
pub trait ImageEncoder: Send + Sync {
    fn encode(&self, path: PathBuf) -> impl Future<Output = Result<EncodedImage, CoreError>> + Send;
}

/// Client for the hosted vision model
#[cfg_attr(test, mockall::automock)]
pub trait VisionClient: Send + Sync {
    fn query(
        &self,
        prompt: String,
        image: EncodedImage,
        model: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Append-only store for flagged records
#[cfg_attr(test, mockall::automock)]
pub trait FlagLog: Send + Sync {
    fn append(
        &self,
        record: DiagnosisRecord,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for the diagnosis form operations
pub trait DiagnosisService: Send + Sync {
    fn submit(
        &self,
        request: SymptomRequest,
    ) -> impl Future<Output = Result<DiagnosisRecord, CoreError>> + Send;

    fn clear(&self) -> ResetState;

    fn flag(&self, record: DiagnosisRecord) -> impl Future<Output = FlagOutcome> + Send;
}
