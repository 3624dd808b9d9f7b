//! Save-to-file sink for exported images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Export errors. Nothing is written when one is returned.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export unavailable: {0}")]
    Unavailable(String),
}

/// What happened to an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// The user or sink declined; no file was written.
    Cancelled,
}

/// Destination for exported image bytes.
pub trait ExportSink {
    fn save_image(&self, bytes: &[u8], suggested_name: &str) -> Result<ExportOutcome, ExportError>;
}

/// `px-study-<unix millis>.png`.
pub fn default_export_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("px-study-{millis}.png")
}

/// Writes exports into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's picture directory, falling back to the home directory.
    pub fn default_location() -> Result<Self, ExportError> {
        dirs::picture_dir()
            .or_else(dirs::home_dir)
            .map(Self::new)
            .ok_or_else(|| ExportError::Unavailable("no picture directory".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectoryExportSink {
    fn save_image(&self, bytes: &[u8], suggested_name: &str) -> Result<ExportOutcome, ExportError> {
        // Only the final path component is honoured.
        let Some(name) = Path::new(suggested_name).file_name() else {
            return Ok(ExportOutcome::Cancelled);
        };
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        log::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(ExportOutcome::Saved(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_name_shape() {
        let name = default_export_name();
        assert!(name.starts_with("px-study-"));
        assert!(name.ends_with(".png"));
        let millis = &name["px-study-".len()..name.len() - ".png".len()];
        assert!(millis.parse::<u128>().unwrap() > 0);
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempdir().unwrap();
        let sink = DirectoryExportSink::new(dir.path().join("exports"));

        let outcome = sink.save_image(&[1, 2, 3], "board.png").unwrap();
        let expected = dir.path().join("exports").join("board.png");
        assert_eq!(outcome, ExportOutcome::Saved(expected.clone()));
        assert_eq!(fs::read(expected).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_directory_sink_strips_directories() {
        let dir = tempdir().unwrap();
        let sink = DirectoryExportSink::new(dir.path());

        let outcome = sink.save_image(&[9], "../../elsewhere/x.png").unwrap();
        assert_eq!(outcome, ExportOutcome::Saved(dir.path().join("x.png")));
    }

    #[test]
    fn test_directory_sink_empty_name_cancels() {
        let dir = tempdir().unwrap();
        let sink = DirectoryExportSink::new(dir.path());
        assert_eq!(sink.save_image(&[9], "").unwrap(), ExportOutcome::Cancelled);
        assert_eq!(sink.save_image(&[9], "..").unwrap(), ExportOutcome::Cancelled);
    }
}
