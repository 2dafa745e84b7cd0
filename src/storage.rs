use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::warn;

/// String-keyed persistent store, one file per key under the root directory.
///
/// Values are opaque strings; callers own serialization. Reads fail closed:
/// a missing or unreadable key loads as absent rather than surfacing an
/// error, so a corrupted value degrades to the caller's default.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow!("unable to determine local data directory"))?;
        Ok(Self::open(data_dir.join("taskpad").join("state")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(error) => {
                warn!(
                    "failed to read stored value '{}': {}; treating as absent",
                    path.display(),
                    error
                );
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| {
            format!("failed to create storage directory '{}'", self.root.display())
        })?;

        let path = self.key_path(key);
        let tmp_path = self.root.join(format!(".{key}.tmp"));

        fs::write(&tmp_path, value).with_context(|| {
            format!("failed to write temporary file '{}'", tmp_path.display())
        })?;
        fs::rename(&tmp_path, &path).with_context(|| {
            format!(
                "failed to atomically rename '{}' to '{}'",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}
