//! API handlers for the web UI.

pub mod file;
pub mod organize;

pub use file::*;
pub use organize::*;

use std::sync::Arc;

use crate::config::FilesConfig;
use crate::file::FileStorage;
use crate::Result;

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// Upload and organized roots.
    pub storage: FileStorage,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: FileStorage, max_upload_size: u64) -> Self {
        Self {
            storage,
            max_upload_size,
        }
    }

    /// Build the state from the files configuration, creating both roots.
    pub fn from_config(config: &FilesConfig) -> Result<Arc<Self>> {
        let storage = FileStorage::new(&config.upload_dir, &config.organized_dir)?;
        tracing::info!(
            upload_dir = %config.upload_dir,
            organized_dir = %config.organized_dir,
            "File storage initialized"
        );
        Ok(Arc::new(Self::new(storage, config.max_upload_size_bytes)))
    }
}
