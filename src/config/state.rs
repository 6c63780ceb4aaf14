use crate::domain::ports::StateStore;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Sent-notification IDs persisted as a JSON array of strings.
///
/// A missing file is an empty set, so first runs and wiped state
/// directories need no special casing.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    async fn load_sent_ids(&self) -> Result<HashSet<String>> {
        if !self.path.is_file() {
            return Ok(HashSet::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let ids: Vec<String> = serde_json::from_str(&data)?;
        Ok(ids.into_iter().collect())
    }

    async fn save_sent_ids(&self, ids: &HashSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Sorted so repeated saves of the same set produce identical files.
        let mut sorted: Vec<&String> = ids.iter().collect();
        sorted.sort();

        fs::write(&self.path, serde_json::to_vec(&sorted)?)?;
        Ok(())
    }
}
