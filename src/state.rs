use crate::models::{JobConfig, LogBook};
use crate::storage::StorePaths;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub paths: StorePaths,
    pub config: Arc<Mutex<Option<JobConfig>>>,
    pub log: Arc<Mutex<LogBook>>,
}

impl AppState {
    pub fn new(paths: StorePaths, config: Option<JobConfig>, log: LogBook) -> Self {
        Self {
            paths,
            config: Arc::new(Mutex::new(config)),
            log: Arc::new(Mutex::new(log)),
        }
    }
}
