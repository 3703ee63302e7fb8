use crate::domain::diagnosis::entities::{CategoryLabel, DiseaseType, Urgency};

/// Keywords tested in declaration order; the first substring hit wins.
pub const KEYWORD_TABLE: &[(&str, CategoryLabel)] = &[
    ("acne", CategoryLabel::Acne),
    ("pimple", CategoryLabel::Acne),
    ("blackhead", CategoryLabel::Acne),
    ("whitehead", CategoryLabel::Acne),
    ("dandruff", CategoryLabel::Dandruff),
    ("seborrheic", CategoryLabel::Dandruff),
    ("rash", CategoryLabel::Rash),
    ("eczema", CategoryLabel::Eczema),
    ("dermatitis", CategoryLabel::Eczema),
    ("psoriasis", CategoryLabel::Psoriasis),
    ("fungal", CategoryLabel::FungalInfection),
    ("ringworm", CategoryLabel::FungalInfection),
    ("allergy", CategoryLabel::AllergicReaction),
    ("allergic", CategoryLabel::AllergicReaction),
    ("bacterial", CategoryLabel::BacterialInfection),
    ("infection", CategoryLabel::Infection),
    ("rosacea", CategoryLabel::Rosacea),
    ("hives", CategoryLabel::Hives),
];

pub const DEFAULT_DOCTOR: &str = "Primary care physician";

/// Classify free text into a category label
pub fn classify(text: &str) -> CategoryLabel {
    let text = text.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(CategoryLabel::Unknown)
}

pub fn resolve_type(category: CategoryLabel) -> DiseaseType {
    match category {
        CategoryLabel::Dandruff => DiseaseType::ScalpCondition,
        CategoryLabel::Acne
        | CategoryLabel::Eczema
        | CategoryLabel::Psoriasis
        | CategoryLabel::FungalInfection
        | CategoryLabel::Rosacea
        | CategoryLabel::Rash => DiseaseType::Dermatologic,
        CategoryLabel::Hives | CategoryLabel::AllergicReaction => DiseaseType::Immunologic,
        CategoryLabel::BacterialInfection | CategoryLabel::Infection => DiseaseType::Infectious,
        CategoryLabel::Unknown => DiseaseType::Unknown,
    }
}

pub fn resolve_solutions(category: CategoryLabel) -> Vec<String> {
    let solutions: &[&str] = match category {
        CategoryLabel::Dandruff => &[
            "Use medicated anti-dandruff shampoo (ketoconazole, zinc pyrithione, or selenium sulfide)",
            "Avoid harsh hair products with alcohol",
            "Moisturize scalp with light oil (e.g., tea tree oil or diluted coconut oil)",
            "Maintain a balanced diet with zinc, omega-3, and B vitamins",
        ],
        CategoryLabel::Acne => &[
            "Use gentle cleanser; avoid over-washing",
            "Apply benzoyl peroxide or salicylic acid spot treatments",
            "Non-comedogenic moisturizer and sunscreen daily",
            "See a dermatologist if nodular/cystic or scarring",
        ],
        CategoryLabel::Eczema => &[
            "Fragrance-free emollients multiple times daily",
            "Short lukewarm showers; avoid hot water",
            "Low-potency topical steroid for flares (consult clinician)",
            "Identify and avoid triggers (soaps, wool, allergens)",
        ],
        CategoryLabel::Psoriasis => &[
            "Use coal tar or salicylic acid shampoos for scalp",
            "Topical corticosteroids/vitamin D analogs (per clinician)",
            "Manage stress; avoid skin trauma",
        ],
        CategoryLabel::FungalInfection => &[
            "Topical antifungal (clotrimazole/ketoconazole) as directed",
            "Keep area clean, dry, and cool",
            "Avoid sharing towels/clothing",
        ],
        CategoryLabel::AllergicReaction | CategoryLabel::Hives => &[
            "Oral antihistamine (non-drowsy) as needed",
            "Cold compresses to reduce itching",
            "Identify and avoid suspected allergen",
        ],
        CategoryLabel::BacterialInfection | CategoryLabel::Infection => &[
            "Keep affected area clean",
            "Seek evaluation for possible antibiotics",
            "Monitor fever, spreading redness, or pain",
        ],
        CategoryLabel::Rash | CategoryLabel::Rosacea | CategoryLabel::Unknown => &[
            "Monitor symptoms and avoid irritants",
            "Over-the-counter relief where appropriate",
            "Consult a clinician if symptoms persist or worsen",
        ],
    };

    solutions.iter().map(|s| s.to_string()).collect()
}

pub fn resolve_doctor(category: CategoryLabel) -> String {
    match category {
        CategoryLabel::Acne
        | CategoryLabel::Eczema
        | CategoryLabel::Psoriasis
        | CategoryLabel::FungalInfection
        | CategoryLabel::Rosacea
        | CategoryLabel::Dandruff
        | CategoryLabel::Rash => "Dermatologist".to_string(),
        CategoryLabel::AllergicReaction | CategoryLabel::Hives => {
            "Allergist/Immunologist".to_string()
        }
        CategoryLabel::BacterialInfection | CategoryLabel::Infection | CategoryLabel::Unknown => {
            DEFAULT_DOCTOR.to_string()
        }
    }
}

pub fn resolve_urgency(category: CategoryLabel) -> Urgency {
    match category {
        CategoryLabel::BacterialInfection | CategoryLabel::Infection => Urgency::Urgent,
        _ => Urgency::NonEmergency,
    }
}
