//! Sticky header.
//!
//! The header row pins itself to the trigger line once the table's top has
//! scrolled past it, and retracts once the table content has scrolled away as
//! well. Every signal source (throttled scroll, sentinel intersection, section
//! mutation) funnels into [`classify`] and then into one transition function,
//! so re-entering the current state never touches the DOM.

mod classify;
mod release;

pub use classify::{StickySignals, StickyState, classify};
pub use release::StickyRelease;

use blockdom::element::is_heading;
use blockdom::{Document, DomRect, Element, IntersectionEntry, NodeId};

use crate::classes;
use crate::config::{Breakpoint, TableConfig};
use crate::dropdown::DropdownController;
use crate::error::TableError;
use crate::frame::{self, FrameReceiver, FrameSender};
use crate::header::BuiltHeader;

/// Pin/retract controller for one table's header.
#[derive(Debug)]
pub struct StickyHeader {
    block: NodeId,
    header: NodeId,
    sentinel: NodeId,
    placeholder: NodeId,
    state: StickyState,
    /// A scroll evaluation is already queued for the next frame.
    ticking: bool,
    torn_down: bool,
    frame_tx: FrameSender,
    frame_rx: FrameReceiver,
    release: StickyRelease,
}

impl StickyHeader {
    /// Insert the sentinel and placeholder and start in [`StickyState::Normal`].
    ///
    /// The returned [`StickyRelease`] lets other components freeze the
    /// header in its current state.
    pub fn init(
        doc: &mut Document,
        built: &BuiltHeader,
    ) -> Result<(Self, StickyRelease), TableError> {
        let block = built.block;
        let header = built.header;

        let block_rect = doc.rect(block);
        let sentinel = doc.build(
            Element::div()
                .class(classes::SENTINEL)
                .attr("aria-hidden", "true")
                .style("position", "absolute")
                .style("height", "1px")
                .rect(DomRect::new(block_rect.x, block_rect.y, block_rect.width, 1.0)),
        );
        if let Some(parent) = doc.parent(block) {
            doc.insert_before(parent, sentinel, Some(block))?;
        }

        let placeholder = doc.build(
            Element::div()
                .class(classes::PLACEHOLDER)
                .attr("aria-hidden", "true")
                .style("display", "none"),
        );
        let after_header = doc
            .index_in_parent(header)
            .and_then(|i| doc.children(block).get(i + 1).copied());
        doc.insert_before(block, placeholder, after_header)?;

        let (frame_tx, frame_rx) = frame::channel();
        let release = StickyRelease::new(frame_tx.clone());
        log::debug!("[sticky] Initialized for {}", block);

        let sticky = Self {
            block,
            header,
            sentinel,
            placeholder,
            state: StickyState::Normal,
            ticking: false,
            torn_down: false,
            frame_tx,
            frame_rx,
            release: release.clone(),
        };
        Ok((sticky, release))
    }

    pub fn state(&self) -> StickyState {
        self.state
    }

    pub fn sentinel(&self) -> NodeId {
        self.sentinel
    }

    pub fn placeholder(&self) -> NodeId {
        self.placeholder
    }

    pub fn release(&self) -> &StickyRelease {
        &self.release
    }

    /// Whether a frame has been requested and not yet run.
    pub fn frame_requested(&self) -> bool {
        self.frame_rx.is_pending()
    }

    /// Measure the current signals from the document.
    pub fn signals(&self, doc: &Document, config: &TableConfig) -> StickySignals {
        StickySignals {
            header_top: doc.rect(self.sentinel).top(),
            sticky_trigger_offset: trigger_offset(doc, config),
            content_bottom: content_bottom(doc, self.block),
            sticky_header_height: doc.rect(self.header).height,
            section_hidden: section_hidden(doc, self.block, config),
        }
    }

    /// Queue one evaluation for the next animation frame.
    ///
    /// Scroll bursts between two frames collapse into that one evaluation.
    pub fn on_scroll(&mut self) {
        if self.torn_down || self.ticking {
            return;
        }
        self.ticking = true;
        self.frame_tx.request();
    }

    /// Run the queued evaluation, if any. Returns true if one ran.
    pub fn on_animation_frame(
        &mut self,
        doc: &mut Document,
        dropdowns: &mut DropdownController,
        config: &TableConfig,
    ) -> bool {
        if !self.frame_rx.take() {
            return false;
        }
        self.ticking = false;
        if self.torn_down {
            return false;
        }
        self.evaluate(doc, dropdowns, config);
        true
    }

    /// Sentinel crossed the viewport edge.
    ///
    /// A sentinel back in view at or below the trigger line releases the
    /// header immediately, even if the throttled scroll handler missed it.
    pub fn on_sentinel_intersection(
        &mut self,
        doc: &mut Document,
        dropdowns: &mut DropdownController,
        entry: IntersectionEntry,
        config: &TableConfig,
    ) {
        if self.torn_down || self.release.is_suspended() {
            return;
        }
        if entry.is_intersecting && entry.bounding_top >= trigger_offset(doc, config) {
            self.transition(doc, dropdowns, StickyState::Normal, config);
        } else {
            self.evaluate(doc, dropdowns, config);
        }
    }

    /// Class or style of the enclosing section changed.
    ///
    /// Hiding the section releases the header even while suspended.
    pub fn on_section_mutation(
        &mut self,
        doc: &mut Document,
        dropdowns: &mut DropdownController,
        config: &TableConfig,
    ) {
        if self.torn_down {
            return;
        }
        if section_hidden(doc, self.block, config) {
            log::debug!("[sticky] Section hidden, releasing header");
            self.transition(doc, dropdowns, StickyState::Normal, config);
        } else {
            self.evaluate(doc, dropdowns, config);
        }
    }

    /// Whether `node` is the section whose mutations this header watches.
    pub fn observes_section(&self, doc: &Document, node: NodeId) -> bool {
        enclosing_section(doc, self.block) == Some(node)
    }

    /// Classify from current signals and move to the result.
    pub fn evaluate(
        &mut self,
        doc: &mut Document,
        dropdowns: &mut DropdownController,
        config: &TableConfig,
    ) -> StickyState {
        let signals = self.signals(doc, config);
        if self.release.is_suspended() && !signals.section_hidden {
            log::trace!("[sticky] Suspended, keeping {:?}", self.state);
            return self.state;
        }
        let next = classify(&signals);
        log::trace!("[sticky] {:?} -> {:?}", signals, next);
        self.transition(doc, dropdowns, next, config);
        self.state
    }

    /// Move to `next`. A no-op when already there.
    pub fn transition(
        &mut self,
        doc: &mut Document,
        dropdowns: &mut DropdownController,
        next: StickyState,
        config: &TableConfig,
    ) {
        if self.state == next {
            if next == StickyState::Stuck {
                self.sync_gnav_offset(doc, config);
            }
            return;
        }
        log::debug!("[sticky] {:?} -> {:?}", self.state, next);

        match next {
            StickyState::Normal => self.unpin(doc),
            StickyState::Stuck => {
                if self.state == StickyState::Normal {
                    self.pin(doc, dropdowns);
                }
                self.extend(doc, config);
            }
            StickyState::StuckRetracted => {
                if self.state == StickyState::Normal {
                    self.pin(doc, dropdowns);
                }
                self.retract(doc);
            }
        }
        self.state = next;
    }

    /// Restore the header to the document flow and remove the nodes added
    /// by [`init`](Self::init). Later events are ignored.
    pub fn teardown(&mut self, doc: &mut Document) {
        if self.torn_down {
            return;
        }
        if self.state.is_pinned() {
            self.unpin(doc);
            self.state = StickyState::Normal;
        }
        doc.remove(self.sentinel);
        doc.remove(self.placeholder);
        self.frame_rx.take();
        self.ticking = false;
        self.torn_down = true;
        log::debug!("[sticky] Torn down for {}", self.block);
    }

    /// Normal -> pinned: the header leaves the flow and becomes decorative.
    fn pin(&self, doc: &mut Document, dropdowns: &mut DropdownController) {
        for heading in doc.descendants(self.header) {
            let tag = doc.tag(heading).to_string();
            if is_heading(&tag) {
                doc.set_attr(heading, classes::DATA_STICKY_HEADING, tag);
                doc.set_tag(heading, "div");
            }
        }
        dropdowns.close_all(doc);
        doc.blur();
        doc.set_attr(self.header, "aria-hidden", "true");
        doc.add_class(self.header, classes::IS_STUCK);
    }

    /// Show the pinned header with a placeholder holding its place.
    fn extend(&self, doc: &mut Document, config: &TableConfig) {
        let height = doc.rect(self.header).height;
        doc.set_style(self.placeholder, "height", format!("{height}px"));
        doc.remove_style(self.placeholder, "display");
        doc.remove_class(self.header, classes::IS_RETRACTED);
        self.sync_gnav_offset(doc, config);
    }

    /// The extended header clears the global nav only at desktop widths.
    fn sync_gnav_offset(&self, doc: &mut Document, config: &TableConfig) {
        let desktop = config.breakpoint(doc.viewport().width) == Breakpoint::Desktop;
        doc.toggle_class(self.header, classes::GNAV_OFFSET, desktop);
    }

    /// Hide the pinned header and collapse the placeholder. Headings stay
    /// converted.
    fn retract(&self, doc: &mut Document) {
        self.hide_placeholder(doc);
        doc.add_class(self.header, classes::IS_RETRACTED);
        doc.remove_class(self.header, classes::GNAV_OFFSET);
    }

    fn unpin(&self, doc: &mut Document) {
        for heading in doc.descendants(self.header) {
            if let Some(tag) = doc.remove_attr(heading, classes::DATA_STICKY_HEADING) {
                doc.set_tag(heading, tag);
            }
        }
        doc.remove_attr(self.header, "aria-hidden");
        doc.remove_class(self.header, classes::IS_STUCK);
        doc.remove_class(self.header, classes::IS_RETRACTED);
        doc.remove_class(self.header, classes::GNAV_OFFSET);
        self.hide_placeholder(doc);
    }

    fn hide_placeholder(&self, doc: &mut Document) {
        doc.set_style(self.placeholder, "display", "none");
        doc.remove_style(self.placeholder, "height");
    }
}

/// Global nav height at desktop widths, else 0.
fn trigger_offset(doc: &Document, config: &TableConfig) -> f64 {
    if config.breakpoint(doc.viewport().width) != Breakpoint::Desktop {
        return 0.0;
    }
    doc.custom_property(&config.nav_offset_property)
        .and_then(parse_px)
        .unwrap_or(0.0)
}

fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

fn content_bottom(doc: &Document, block: NodeId) -> f64 {
    doc.query_class_all(block, classes::TABLE_CONTAINER)
        .last()
        .map_or_else(|| doc.rect(block).bottom(), |container| doc.rect(*container).bottom())
}

fn enclosing_section(doc: &Document, block: NodeId) -> Option<NodeId> {
    let parent = doc.parent(block)?;
    doc.closest(parent, |doc, n| doc.tag(n) == "section" || doc.has_class(n, "section"))
}

fn section_hidden(doc: &Document, block: NodeId, config: &TableConfig) -> bool {
    let Some(section) = enclosing_section(doc, block) else {
        return false;
    };
    config
        .hidden_section_classes
        .iter()
        .any(|class| doc.has_class(section, class))
        || doc.style(section, "display").is_some_and(|d| d.trim() == "none")
}
