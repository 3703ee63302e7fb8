pub mod clear_diagnosis;
pub mod submit_diagnosis;
