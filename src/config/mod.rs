use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::ConfigError,
    ledger::BalanceThresholds,
    utils::persistence::{ensure_dir, write_atomic},
};

const HOME_ENV: &str = "CASH_PROJECTION_HOME";
const DEFAULT_DIR_NAME: &str = ".cash_projection";
const CONFIG_FILE: &str = "config.json";
const LEDGER_FILE: &str = "CashProjection.json";
const SAMPLE_FILE: &str = "SampleData.json";
const ONEDRIVE_ENV: &str = "OneDrive";

/// User preferences persisted next to the application data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_path: Option<PathBuf>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub danger_threshold: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub warning_threshold: Decimal,
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = BalanceThresholds::default();
        Self {
            ledger_path: None,
            sample_path: None,
            danger_threshold: thresholds.danger,
            warning_threshold: thresholds.warning,
            ui_color_enabled: true,
        }
    }
}

impl Config {
    pub fn thresholds(&self) -> BalanceThresholds {
        BalanceThresholds {
            danger: self.danger_threshold,
            warning: self.warning_threshold,
        }
    }

    /// Snapshot file the ledger is loaded from and saved to.
    pub fn resolved_ledger_path(&self) -> PathBuf {
        self.ledger_path.clone().unwrap_or_else(default_ledger_path)
    }

    /// Read-only sample snapshot used when the primary file is unavailable.
    pub fn resolved_sample_path(&self) -> PathBuf {
        self.sample_path.clone().unwrap_or_else(default_sample_path)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_home())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file; using defaults");
                return Ok(Config::default());
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(config).map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Application home: `$CASH_PROJECTION_HOME`, else `~/.cash_projection`.
pub fn app_home() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// `CashProjection.json` under OneDrive when configured, else the documents directory,
/// else home, else the working directory.
pub fn default_ledger_path() -> PathBuf {
    let onedrive = env::var_os(ONEDRIVE_ENV)
        .filter(|value| !value.to_string_lossy().trim().is_empty())
        .map(PathBuf::from);
    onedrive
        .or_else(dirs::document_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LEDGER_FILE)
}

/// `SampleData.json` beside the running executable.
pub fn default_sample_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SAMPLE_FILE)
}
