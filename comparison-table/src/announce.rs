//! Screen reader announcements.
//!
//! One polite live region per table. Each message replaces the previous one
//! and is cleared after the configured delay so that repeating the same
//! message is announced again.

use std::time::{Duration, Instant};

use blockdom::{Document, Element, NodeId};

use crate::classes;
use crate::timers::{TimerTask, Timers};

#[derive(Debug)]
pub struct Announcer {
    region: NodeId,
    generation: u64,
}

impl Announcer {
    /// Append the live region to `block`.
    pub fn new(doc: &mut Document, block: NodeId) -> Self {
        let region = doc.insert(
            block,
            Element::div()
                .class(classes::ANNOUNCER)
                .attr("aria-live", "polite")
                .attr("aria-atomic", "true")
                .attr("role", "status"),
        );
        Self {
            region,
            generation: 0,
        }
    }

    /// Current text of the live region.
    pub fn message<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        doc.text(self.region)
    }

    /// Show `message` and schedule its removal after `delay`.
    pub fn announce(
        &mut self,
        doc: &mut Document,
        timers: &mut Timers,
        now: Instant,
        message: impl Into<String>,
        delay: Duration,
    ) {
        let message = message.into();
        log::debug!("[announce] {}", message);
        self.generation += 1;
        doc.set_text(self.region, message);
        timers.schedule(
            now,
            delay,
            TimerTask::ClearAnnouncement {
                generation: self.generation,
            },
        );
    }

    /// Clear the region unless a newer message replaced `generation`.
    pub fn clear(&mut self, doc: &mut Document, generation: u64) {
        if generation == self.generation {
            doc.clear_text(self.region);
        }
    }

    pub fn remove(&self, doc: &mut Document) {
        doc.remove(self.region);
    }
}
