/// Doctor-persona instruction sent ahead of the symptom line.
pub const SYSTEM_PROMPT: &str = concat!(
    "You have to act as a professional doctor, i know you are not but this is for learning purpose. \n",
    "            What's in this image?. Do you find anything wrong with it medically? \n",
    "            If you make a differential, suggest some remedies for them. Donot add any numbers or special characters in \n",
    "            your response. Your response should be in one long paragraph. Also always answer as if you are answering to a real person.\n",
    "            Donot say 'In the image I see' but say 'With what I see, I think you have ....'\n",
    "            Dont respond as an AI model in markdown, your answer should mimic that of an actual doctor not an AI bot, \n",
    "            Keep your answer concise (max 2 sentences). No preamble, start your answer right away please",
);

/// Answer used in place of a model call when no image was uploaded.
pub const NO_IMAGE_ANSWER: &str = "No image provided for me to analyze";

pub const NO_SYMPTOMS_LINE: &str = "No symptoms provided";

/// Builds the symptom line from already-trimmed text.
pub fn symptom_line(symptom_text: &str) -> String {
    if symptom_text.is_empty() {
        NO_SYMPTOMS_LINE.to_string()
    } else {
        format!("Typed symptoms: {symptom_text}")
    }
}

pub fn build_vision_prompt(symptom_text: &str) -> String {
    format!("{SYSTEM_PROMPT}\n{}", symptom_line(symptom_text))
}
