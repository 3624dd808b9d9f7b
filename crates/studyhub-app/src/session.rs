//! Recorded input sessions replayed against a board without a window.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use studyhub_core::{InputEvent, Whiteboard};

/// An ordered list of device events, stored as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub events: Vec<InputEvent>,
}

/// What happened while replaying a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    /// Events the board acted on.
    pub handled: usize,
    /// Display ticks that had a pending redraw.
    pub frames: usize,
}

impl Session {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let session = Self::from_json(&json).map_err(|source| AppError::Session {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded session with {} events from {}",
            session.events.len(),
            path.display()
        );
        Ok(session)
    }

    /// Feed every event to `board`, ticking the redraw scheduler after each one.
    pub fn replay(&self, board: &mut Whiteboard) -> ReplayStats {
        let mut stats = ReplayStats {
            events: self.events.len(),
            ..Default::default()
        };
        for event in &self.events {
            if board.handle_event(event) {
                stats.handled += 1;
            }
            if board.take_redraw() {
                stats.frames += 1;
            }
        }
        log::debug!(
            "Replayed {} events ({} handled, {} frames)",
            stats.events,
            stats.handled,
            stats.frames
        );
        stats
    }
}
