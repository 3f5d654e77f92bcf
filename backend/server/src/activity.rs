//! Current activity name, shown on every scanner and echoed in check-in responses.
use std::path::Path;

use roster::{RosterError, document::JsonDocument};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;

pub const DEFAULT_ACTIVITY_NAME: &str = "HKACM";
pub const EMPTY_ACTIVITY_MESSAGE: &str = "活動名稱不能為空";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityDocument {
    #[serde(default, alias = "activityLabel")]
    current_activity_name: String,
}

pub struct ActivityLabel {
    document: JsonDocument,
    name: String,
}

impl ActivityLabel {
    /// Loads the stored name, or writes `default` when there is none yet.
    pub fn open(path: impl AsRef<Path>, default: &str) -> Result<Self, RosterError> {
        let document = JsonDocument::new(path.as_ref());

        let stored = document
            .load::<ActivityDocument>()?
            .map(|doc| doc.current_activity_name)
            .filter(|name| !name.trim().is_empty());

        let label = match stored {
            Some(name) => Self { document, name },
            None => {
                let label = Self {
                    document,
                    name: default.to_string(),
                };
                label.save(&label.name)?;
                label
            }
        };

        info!("Current activity: {}", label.name);
        Ok(label)
    }

    pub fn get(&self) -> &str {
        &self.name
    }

    pub fn set(&mut self, name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation(EMPTY_ACTIVITY_MESSAGE.to_string()));
        }

        self.save(name)?;
        self.name = name.to_string();

        info!("Current activity set to {name}");
        Ok(())
    }

    fn save(&self, name: &str) -> Result<(), RosterError> {
        self.document.save(&ActivityDocument {
            current_activity_name: name.to_string(),
        })
    }
}
