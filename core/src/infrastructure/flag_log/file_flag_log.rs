use std::{path::PathBuf, sync::Arc};

use chrono::{SecondsFormat, Utc};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use crate::domain::{
    common::{FlagLogConfig, entities::app_errors::CoreError},
    diagnosis::{entities::DiagnosisRecord, ports::FlagLog},
};

/// Appends flagged records to a plain-text file, one JSON object per line.
///
/// Clones share the same lock, so concurrent appends never interleave.
#[derive(Debug, Clone)]
pub struct FileFlagLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileFlagLog {
    pub fn new(config: &FlagLogConfig) -> Self {
        Self {
            path: config.path.clone(),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

impl FlagLog for FileFlagLog {
    async fn append(&self, record: DiagnosisRecord) -> Result<(), CoreError> {
        let json = serde_json::to_string(&record).map_err(|e| {
            tracing::error!("Failed to serialize diagnosis record: {}", e);
            CoreError::LogWriteError(e.to_string())
        })?;

        let _guard = self.lock.lock().await;

        // timestamp taken under the lock keeps file order and time order aligned
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);
        let line = format!("{timestamp} {json}\n");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| CoreError::LogWriteError(format!("{}: {}", self.path.display(), e)))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| CoreError::LogWriteError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| CoreError::LogWriteError(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "diagnosis record flagged");

        Ok(())
    }
}
