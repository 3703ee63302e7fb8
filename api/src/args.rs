use std::{path::PathBuf, time::Duration};

use clap::Parser;
use doctorvision_core::domain::common::{DoctorVisionConfig, FlagLogConfig, VisionConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "doctorvision", version, about = "DoctorVision API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,
    #[command(flatten)]
    pub vision: VisionArgs,
    #[command(flatten)]
    pub flag_log: FlagLogArgs,
    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 7860)]
    pub port: u16,
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,
    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:7860,http://127.0.0.1:7860"
    )]
    pub allowed_origins: Vec<String>,
    /// Directory uploaded images are stored in before analysis
    #[arg(long = "upload-dir", env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct VisionArgs {
    #[arg(
        long = "groq-api-key",
        env = "GROQ_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub api_key: String,
    #[arg(
        long = "vision-base-url",
        env = "VISION_BASE_URL",
        default_value = "https://api.groq.com/openai/v1"
    )]
    pub base_url: String,
    #[arg(
        long = "vision-model",
        env = "VISION_MODEL",
        default_value = "meta-llama/llama-4-scout-17b-16e-instruct"
    )]
    pub model: String,
    /// Request timeout for the vision call, in seconds
    #[arg(long = "vision-timeout", env = "VISION_TIMEOUT", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FlagLogArgs {
    #[arg(long = "flag-log-path", env = "FLAG_LOG_PATH", default_value = "flags.log")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for DoctorVisionConfig {
    fn from(args: Args) -> Self {
        Self {
            vision: VisionConfig {
                api_key: args.vision.api_key,
                base_url: args.vision.base_url,
                model: args.vision.model,
                request_timeout: Duration::from_secs(args.vision.timeout_secs),
            },
            flag_log: FlagLogConfig {
                path: args.flag_log.path,
            },
        }
    }
}
