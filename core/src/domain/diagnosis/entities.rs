use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Condition label assigned by keyword search over the model answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLabel {
    Acne,
    Dandruff,
    Rash,
    Eczema,
    Psoriasis,
    FungalInfection,
    AllergicReaction,
    BacterialInfection,
    Infection,
    Rosacea,
    Hives,
    Unknown,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 12] = [
        CategoryLabel::Acne,
        CategoryLabel::Dandruff,
        CategoryLabel::Rash,
        CategoryLabel::Eczema,
        CategoryLabel::Psoriasis,
        CategoryLabel::FungalInfection,
        CategoryLabel::AllergicReaction,
        CategoryLabel::BacterialInfection,
        CategoryLabel::Infection,
        CategoryLabel::Rosacea,
        CategoryLabel::Hives,
        CategoryLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Acne => "acne",
            CategoryLabel::Dandruff => "dandruff",
            CategoryLabel::Rash => "rash",
            CategoryLabel::Eczema => "eczema",
            CategoryLabel::Psoriasis => "psoriasis",
            CategoryLabel::FungalInfection => "fungal_infection",
            CategoryLabel::AllergicReaction => "allergic_reaction",
            CategoryLabel::BacterialInfection => "bacterial_infection",
            CategoryLabel::Infection => "infection",
            CategoryLabel::Rosacea => "rosacea",
            CategoryLabel::Hives => "hives",
            CategoryLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseType {
    ScalpCondition,
    Dermatologic,
    Immunologic,
    Infectious,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    NonEmergency,
}

/// Structured answer produced for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisRecord {
    #[serde(rename = "user_prompt")]
    pub symptom_text: String,
    pub disease_category: CategoryLabel,
    pub disease_type: DiseaseType,
    pub solutions: Vec<String>,
    pub recommended_doctor: String,
    pub urgency: Urgency,
    #[serde(rename = "uploaded_image")]
    pub uploaded_image_path: String,
    pub created_at: DateTime<Utc>,
}

/// Image payload ready to be embedded in a vision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Result of a flag action. Write failures are reported here, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FlagOutcome {
    Flagged { message: String },
    Warning { message: String },
}

impl FlagOutcome {
    pub fn flagged() -> Self {
        FlagOutcome::Flagged {
            message: "Flagged. Thank you.".to_string(),
        }
    }

    pub fn warning(cause: impl fmt::Display) -> Self {
        FlagOutcome::Warning {
            message: format!("Could not flag: {cause}"),
        }
    }
}
