use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::frame::FrameSender;

/// Handle for freezing the sticky header's classification.
///
/// Handed out when the sticky header initializes. While suspended, scroll and
/// sentinel signals no longer move the header between states; a hidden
/// section still releases it. Cloning shares the same flag.
#[derive(Debug, Clone)]
pub struct StickyRelease {
    suspended: Arc<AtomicBool>,
    frames: FrameSender,
}

impl StickyRelease {
    pub(super) fn new(frames: FrameSender) -> Self {
        Self {
            suspended: Arc::new(AtomicBool::new(false)),
            frames,
        }
    }

    /// Keep the current state until [`resume`](Self::resume) is called.
    pub fn suspend(&self) {
        if !self.suspended.swap(true, Ordering::SeqCst) {
            log::debug!("[sticky] Release suspended");
        }
    }

    /// Lift the freeze and request a frame so the header is re-classified.
    pub fn resume(&self) {
        if self.suspended.swap(false, Ordering::SeqCst) {
            log::debug!("[sticky] Release resumed");
            self.frames.request();
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }
}
