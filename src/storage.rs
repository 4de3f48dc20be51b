use crate::errors::AppError;
use crate::models::{JobConfig, LogBook};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

/// The two persisted records: the configuration and the day log.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub config: PathBuf,
    pub log: PathBuf,
}

pub fn resolve_store_paths() -> StorePaths {
    let config = env::var("APP_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/config.json"));
    let log = env::var("APP_LOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/log.json"));

    StorePaths { config, log }
}

/// Absent or unreadable configuration is simply "not configured yet".
pub async fn load_config(path: &Path) -> Option<JobConfig> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                error!("failed to parse config file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read config file: {err}");
            None
        }
    }
}

pub async fn persist_config(path: &Path, cfg: &JobConfig) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(cfg).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// A log that cannot be read starts over empty.
pub async fn load_log(path: &Path) -> LogBook {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(log) => log,
            Err(err) => {
                error!("failed to parse log file: {err}");
                LogBook::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LogBook::default(),
        Err(err) => {
            error!("failed to read log file: {err}");
            LogBook::default()
        }
    }
}

pub async fn persist_log(path: &Path, log: &LogBook) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(log).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "field_mailer_store_{}_{}_{tag}.json",
            std::process::id(),
            nanos
        ));
        path
    }

    #[tokio::test]
    async fn absent_config_loads_as_none() {
        let path = scratch_path("absent_config");
        assert!(load_config(&path).await.is_none());
    }

    #[tokio::test]
    async fn malformed_config_loads_as_none() {
        let path = scratch_path("bad_config");
        fs::write(&path, b"{not json").await.unwrap();
        assert!(load_config(&path).await.is_none());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_log_loads_empty() {
        let path = scratch_path("bad_log");
        fs::write(&path, b"[[[").await.unwrap();
        let log = load_log(&path).await;
        assert!(log.days.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn log_file_is_the_bare_date_mapping() {
        let path = scratch_path("bare_log");
        fs::write(
            &path,
            br#"{"2026-01-05":[{"type":"Start of Day","time":"08:05:09 AM"}]}"#,
        )
        .await
        .unwrap();
        let log = load_log(&path).await;
        assert_eq!(log.day("2026-01-05").len(), 1);
        let _ = fs::remove_file(&path).await;
    }
}
