//! Headless application shell: restore the saved board, replay input, then
//! persist and export.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::session::{ReplayStats, Session};
use image::RgbaImage;
use std::sync::Arc;
use studyhub_core::{
    BoardStore, DirectoryExportSink, ExportOutcome, ExportSink, FileStorage, Storage, Whiteboard,
    default_export_name,
};
use studyhub_render::{RenderContext, render_image};

/// What a single [`App::run`] should do after restoring the board.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub session: Option<Session>,
    /// Save the board back to storage when done.
    pub persist: bool,
    /// Export a PNG under this name (or the default name when empty).
    pub export_name: Option<String>,
}

/// Result of [`App::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub restored: bool,
    pub replay: ReplayStats,
    pub saved: bool,
    pub export: Option<ExportOutcome>,
}

/// Main application struct.
pub struct App<S: Storage = FileStorage> {
    config: AppConfig,
    board: Whiteboard,
    store: BoardStore<S>,
}

impl App<FileStorage> {
    /// Create an app backed by file storage in the configured (or default) directory.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let storage = match &config.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::info!("Board storage at {}", storage.base_path().display());
        Ok(Self::with_storage(config, Arc::new(storage)))
    }
}

impl<S: Storage> App<S> {
    pub fn with_storage(config: AppConfig, storage: Arc<S>) -> Self {
        let store = BoardStore::with_key(storage, config.board_key.clone());
        Self {
            config,
            board: Whiteboard::new(),
            store,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn board(&self) -> &Whiteboard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Whiteboard {
        &mut self.board
    }

    /// Load the saved board, if there is a readable one.
    pub async fn restore(&mut self) -> bool {
        match self.store.restore().await {
            Some(scene) => {
                self.board.load_scene(scene);
                true
            }
            None => false,
        }
    }

    pub fn replay(&mut self, session: &Session) -> ReplayStats {
        session.replay(&mut self.board)
    }

    pub async fn save(&self) -> AppResult<()> {
        self.store.save(self.board.scene()).await?;
        Ok(())
    }

    /// Render context for the current view, including any in-progress element.
    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(self.board.scene(), *self.board.camera())
            .with_live(self.board.live_element())
            .with_background(self.config.background_color())
            .with_grid(self.config.grid_style())
            .with_grid_spacing(self.config.grid_spacing)
    }

    /// Render the current view at the configured viewport size.
    pub fn render_frame(&self) -> AppResult<RgbaImage> {
        Ok(render_image(
            &self.render_context(),
            self.config.width,
            self.config.height,
        )?)
    }

    /// Sink for exported images: the configured directory or the pictures directory.
    pub fn export_sink(&self) -> AppResult<DirectoryExportSink> {
        Ok(match &self.config.export_dir {
            Some(dir) => DirectoryExportSink::new(dir.clone()),
            None => DirectoryExportSink::default_location()?,
        })
    }

    /// Export the committed board as seen through the current camera.
    ///
    /// Renders from a snapshot of the scene; the board is never modified.
    pub fn export(&self, sink: &dyn ExportSink, name: &str) -> AppResult<ExportOutcome> {
        let snapshot = self.board.scene().clone();
        let ctx = RenderContext::new(&snapshot, *self.board.camera())
            .with_background(self.config.background_color())
            .with_grid(self.config.grid_style())
            .with_grid_spacing(self.config.grid_spacing);
        Ok(studyhub_render::export_png(
            &ctx,
            self.config.width,
            self.config.height,
            sink,
            name,
        )?)
    }

    /// Restore, replay, then optionally persist and export.
    pub async fn run(&mut self, options: &RunOptions) -> AppResult<RunSummary> {
        log::info!("Starting {}", self.config.title);
        let mut summary = RunSummary {
            restored: self.restore().await,
            ..Default::default()
        };

        if let Some(session) = &options.session {
            summary.replay = self.replay(session);
        }

        if options.persist {
            self.save().await?;
            summary.saved = true;
        }

        if let Some(name) = &options.export_name {
            let name = if name.is_empty() {
                default_export_name()
            } else {
                name.clone()
            };
            let sink = self.export_sink()?;
            summary.export = Some(self.export(&sink, &name)?);
        }

        Ok(summary)
    }
}
