pub mod flag_log;
pub mod image;
pub mod llm;
