//! Whole-file JSON documents.
//!
//! Writes go to a sibling `.tmp` file first and are renamed over the target, so a
//! reader never observes a half-written document.
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::RosterError;

#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, RosterError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&data)?))
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), RosterError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(value)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("Wrote {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
