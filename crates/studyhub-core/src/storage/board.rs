//! Saved-board persistence on top of a blob store.

use crate::scene::Scene;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Key the board is stored under.
pub const BOARD_KEY: &str = "study-hub-board";

/// Saves and restores the board's scene as JSON.
pub struct BoardStore<S: Storage> {
    storage: Arc<S>,
    key: String,
}

impl<S: Storage> BoardStore<S> {
    /// A store using [`BOARD_KEY`].
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, BOARD_KEY)
    }

    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Write the scene.
    pub async fn save(&self, scene: &Scene) -> StorageResult<()> {
        let json = scene
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, json.into_bytes()).await?;
        log::info!("Saved board '{}' ({} elements)", self.key, scene.len());
        Ok(())
    }

    /// Read the saved scene.
    ///
    /// Returns `None` when nothing is stored or the stored data cannot be read
    /// or parsed; the failure is logged and the board starts empty.
    pub async fn restore(&self) -> Option<Scene> {
        let bytes = match self.storage.get(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Failed to read board '{}': {}", self.key, e);
                return None;
            }
        };

        let json = match String::from_utf8(bytes) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Board '{}' is not valid UTF-8: {}", self.key, e);
                return None;
            }
        };

        match Scene::from_json(&json) {
            Ok(scene) => {
                log::info!("Restored board '{}' ({} elements)", self.key, scene.len());
                Some(scene)
            }
            Err(e) => {
                log::warn!("Board '{}' is corrupt, starting empty: {}", self.key, e);
                None
            }
        }
    }

    /// Remove the saved board, if any.
    pub async fn forget(&self) -> StorageResult<()> {
        match self.storage.delete(&self.key).await {
            Ok(()) | Err(StorageError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
