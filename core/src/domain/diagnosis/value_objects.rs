use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default)]
pub struct SymptomRequest {
    pub image_path: Option<PathBuf>,
    pub symptom_text: String,
}

impl SymptomRequest {
    pub fn new(image_path: Option<PathBuf>, symptom_text: impl Into<String>) -> Self {
        Self {
            image_path,
            symptom_text: symptom_text.into(),
        }
    }

    /// The image path, unless it is absent or empty.
    pub fn image(&self) -> Option<&PathBuf> {
        self.image_path
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Empty form state returned by a clear action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResetState {
    pub image: Option<String>,
    pub symptoms: String,
    pub record: serde_json::Value,
}

impl Default for ResetState {
    fn default() -> Self {
        Self {
            image: None,
            symptoms: String::new(),
            record: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}
