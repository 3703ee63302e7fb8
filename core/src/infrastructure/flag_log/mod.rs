pub mod file_flag_log;

pub use file_flag_log::FileFlagLog;
