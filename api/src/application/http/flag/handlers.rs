pub mod flag_diagnosis;
