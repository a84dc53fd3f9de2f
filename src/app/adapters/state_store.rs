//! Rotation state persistence
//!
//! The broadcast rotation state is a plain value; between process runs it
//! is kept in a small JSON file so a restarted process resumes the sequence.
//! Without a state file a process starts again at Alpha.

use crate::app::models::RotationState;
use crate::constants::{APP_DATA_DIR, ROTATION_STATE_FILE};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default state file under the user's data directory
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DATA_DIR).join(ROTATION_STATE_FILE))
}

/// JSON file holding the rotation state
#[derive(Debug, Clone)]
pub struct RotationStore {
    path: PathBuf,
}

impl RotationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state; a missing file yields the initial state
    pub fn load(&self) -> Result<RotationState> {
        if !self.path.exists() {
            debug!(
                "No rotation state at {}, starting from the beginning",
                self.path.display()
            );
            return Ok(RotationState::default());
        }

        let text = fs::read_to_string(&self.path)?;
        let state: RotationState = serde_json::from_str(&text)?;
        debug!(
            "Loaded rotation state from {}: {}",
            self.path.display(),
            state.identifier()
        );
        Ok(state)
    }

    /// Write the state, creating parent directories as needed
    pub fn save(&self, state: &RotationState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Stage beside the target, then rename over it
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(state)?)?;
        fs::rename(&staging, &self.path)?;

        debug!("Saved rotation state to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored state so the next report starts at Alpha
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Removed rotation state {}", self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_initial_state() {
        let dir = TempDir::new().unwrap();
        let store = RotationStore::new(dir.path().join("rotation.json"));
        let state = store.load().unwrap();
        assert_eq!(state, RotationState::default());
    }

    #[test]
    fn test_save_then_load_resumes_sequence() {
        let dir = TempDir::new().unwrap();
        let store = RotationStore::new(dir.path().join("nested").join("rotation.json"));
        let state = RotationState {
            current_index: 7,
            last_observation_time: Some("10:20".to_string()),
        };

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
        assert_eq!(store.load().unwrap().identifier().word(), "Hotel");
    }

    #[test]
    fn test_reset_removes_state() {
        let dir = TempDir::new().unwrap();
        let store = RotationStore::new(dir.path().join("rotation.json"));
        store.save(&RotationState::default()).unwrap();
        assert!(store.path().exists());

        store.reset().unwrap();
        assert!(!store.path().exists());
        store.reset().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotation.json");
        fs::write(&path, "not json").unwrap();
        assert!(RotationStore::new(path).load().is_err());
    }
}
