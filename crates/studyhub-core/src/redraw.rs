//! Frame coalescing.

/// Collapses any number of redraw requests between display ticks into one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedrawScheduler {
    pending: bool,
    frames: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a frame as needed. Repeated calls before the next tick are merged.
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Called at a display tick; true if a frame should be painted now.
    pub fn take_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.frames += 1;
        true
    }

    /// Frames handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce() {
        let mut redraw = RedrawScheduler::new();
        assert!(!redraw.take_frame());

        redraw.request();
        redraw.request();
        redraw.request();
        assert!(redraw.is_pending());
        assert!(redraw.take_frame());
        assert!(!redraw.take_frame());
        assert_eq!(redraw.frames(), 1);

        redraw.request();
        assert!(redraw.take_frame());
        assert_eq!(redraw.frames(), 2);
    }
}
