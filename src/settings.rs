use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::notification::NotificationBackend;

const DEFAULT_NOTIFICATION_BACKEND: &str = "footer";
const MIN_NOTIFICATION_DURATION_MS: u64 = 500;
const MAX_NOTIFICATION_DURATION_MS: u64 = 10_000;
const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 2_000;
const MIN_TRUNCATE_WIDTH: u16 = 10;
const MAX_TRUNCATE_WIDTH: u16 = 120;
const DEFAULT_TRUNCATE_WIDTH: u16 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub notification_backend: String,
    pub notification_duration_ms: u64,
    pub display_truncate_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notification_backend: DEFAULT_NOTIFICATION_BACKEND.to_string(),
            notification_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
            display_truncate_width: DEFAULT_TRUNCATE_WIDTH,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("taskpad");
        path.push("settings.toml");
        Some(path)
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    settings.validate();
                    settings
                }
                Err(error) => {
                    warn!(
                        "failed to parse settings config '{}': {}",
                        path.display(),
                        error
                    );
                    Self::default()
                }
            },
            Err(error) => {
                warn!(
                    "failed to read settings config '{}': {}",
                    path.display(),
                    error
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path().ok_or_else(|| anyhow!("unable to determine config path"))?;
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("invalid settings config path"))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory '{}'", parent.display()))?;

        let mut validated = self.clone();
        validated.validate();
        let contents =
            toml::to_string_pretty(&validated).context("failed to serialize settings to TOML")?;

        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow!("invalid settings config file name"))?
            .to_string_lossy()
            .to_string();
        let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

        fs::write(&tmp_path, contents).with_context(|| {
            format!(
                "failed to write temporary settings file '{}'",
                tmp_path.display()
            )
        })?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "failed to atomically rename settings file '{}' to '{}'",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    pub fn backend(&self) -> NotificationBackend {
        NotificationBackend::from_settings_value(&self.notification_backend).unwrap_or_default()
    }

    fn validate(&mut self) {
        self.notification_duration_ms = self
            .notification_duration_ms
            .clamp(MIN_NOTIFICATION_DURATION_MS, MAX_NOTIFICATION_DURATION_MS);
        self.display_truncate_width = self
            .display_truncate_width
            .clamp(MIN_TRUNCATE_WIDTH, MAX_TRUNCATE_WIDTH);

        self.notification_backend =
            match NotificationBackend::from_settings_value(&self.notification_backend) {
                Some(backend) => backend.as_str().to_string(),
                None => {
                    warn!(
                        "invalid notification_backend '{}' in settings config; falling back to {}",
                        self.notification_backend, DEFAULT_NOTIFICATION_BACKEND
                    );
                    DEFAULT_NOTIFICATION_BACKEND.to_string()
                }
            };
    }
}
