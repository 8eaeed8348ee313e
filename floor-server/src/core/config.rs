use std::path::{Path, PathBuf};

/// Server configuration.
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/floor-server | Work directory (store, logs) |
/// | FLOOR_PASSCODE | 0000 | Passcode installed on first run |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log verbosity |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/floor FLOOR_PASSCODE=8142 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the snapshot store and log files.
    pub work_dir: String,
    /// Passcode written to the store on first run. Once a snapshot exists
    /// the stored passcode wins and this value is ignored.
    pub bootstrap_passcode: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log verbosity passed to the subscriber.
    pub log_level: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/floor-server".into()),
            bootstrap_passcode: std::env::var("FLOOR_PASSCODE")
                .unwrap_or_else(|_| "0000".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the work directory and passcode, for test setups.
    pub fn with_overrides(work_dir: impl Into<String>, passcode: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.bootstrap_passcode = passcode.into();
        config
    }

    /// Path of the floor snapshot store.
    pub fn data_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("floor.redb")
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
