//! Application error type.

use std::path::PathBuf;
use studyhub_core::{ExportError, StorageError};
use studyhub_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid session {}: {source}", .path.display())]
    Session {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

pub type AppResult<T> = Result<T, AppError>;
