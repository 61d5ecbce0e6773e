//! Animation-frame requests.
//!
//! Scroll events arrive far more often than the header needs re-evaluating.
//! Handlers send a frame request instead of evaluating directly; the host
//! checks [`FrameReceiver::take`] once per frame and runs a single evaluation
//! no matter how many requests piled up.

use tokio::sync::mpsc;

/// Sender half of the frame channel.
#[derive(Clone, Debug)]
pub struct FrameSender {
    tx: mpsc::Sender<()>,
}

impl FrameSender {
    /// Request a frame.
    ///
    /// Non-blocking. A full channel already holds a pending request and a
    /// dropped receiver means the table is gone, so errors are ignored.
    pub fn request(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiver half of the frame channel.
#[derive(Debug)]
pub struct FrameReceiver {
    rx: mpsc::Receiver<()>,
}

impl FrameReceiver {
    /// Consume all pending requests. Returns true if there was at least one.
    ///
    /// Multiple buffered requests collapse into a single frame.
    pub fn take(&mut self) -> bool {
        let mut requested = false;
        while self.rx.try_recv().is_ok() {
            requested = true;
        }
        requested
    }

    /// Whether a request is waiting, without consuming it.
    pub fn is_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}

/// Create a new frame channel pair.
pub fn channel() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = mpsc::channel(16);
    (FrameSender { tx }, FrameReceiver { rx })
}
