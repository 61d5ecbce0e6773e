//! A decorated comparison table.

use std::fmt;
use std::time::Instant;

use blockdom::{Document, Event, NodeId, Viewport};

use crate::announce::Announcer;
use crate::classes;
use crate::config::TableConfig;
use crate::dropdown::{DropdownController, DropdownOutcome};
use crate::error::TableError;
use crate::header::{BuiltHeader, build_header};
use crate::plans::{PlanIndex, PlanSwap, PlanVisibility, VisibleWindow};
use crate::sticky::{StickyHeader, StickyRelease};
use crate::timers::{TimerTask, Timers};
use crate::tooltip::TooltipPositioner;

/// Result of routing a host event to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, let other handlers see it.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<&DropdownOutcome> for EventResult {
    fn from(outcome: &DropdownOutcome) -> Self {
        match outcome {
            DropdownOutcome::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        }
    }
}

/// One comparison-table block with its header, plan selectors and sticky
/// behavior.
///
/// The host owns the [`Document`] and drives the table by passing events to
/// [`handle_event`](Self::handle_event) and calling [`tick`](Self::tick)
/// when [`next_deadline`](Self::next_deadline) passes.
pub struct ComparisonTable {
    config: TableConfig,
    header: BuiltHeader,
    plans: PlanVisibility,
    dropdowns: DropdownController,
    sticky: Option<StickyHeader>,
    announcer: Announcer,
    timers: Timers,
    tooltip: Option<Box<dyn TooltipPositioner>>,
    destroyed: bool,
}

impl fmt::Debug for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonTable")
            .field("block", &self.header.block)
            .field("window", &self.plans.window())
            .field("open_dropdown", &self.dropdowns.open_index())
            .field("sticky", &self.sticky.as_ref().map(StickyHeader::state))
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl ComparisonTable {
    /// Decorate `block`: build the header, render the initial `(0, 1)`
    /// window and set up the sticky header.
    pub fn decorate(
        doc: &mut Document,
        block: NodeId,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        let header = build_header(doc, block).inspect_err(|e| {
            log::warn!("[table] Failed to decorate {}: {}", block, e);
        })?;
        let plans = PlanVisibility::initialize(doc, &header)?;
        let dropdowns = DropdownController::new(header.selectors.clone());
        let sticky = if config.sticky_header {
            Some(StickyHeader::init(doc, &header)?.0)
        } else {
            None
        };
        let announcer = Announcer::new(doc, block);

        log::info!(
            "[table] Decorated {} ({} plans, sticky: {})",
            block,
            header.plan_count(),
            sticky.is_some()
        );
        Ok(Self {
            config,
            header,
            plans,
            dropdowns,
            sticky,
            announcer,
            timers: Timers::new(),
            tooltip: None,
            destroyed: false,
        })
    }

    /// Install the tooltip collaborator called after every swap.
    pub fn with_tooltip_positioner(mut self, positioner: impl TooltipPositioner + 'static) -> Self {
        self.tooltip = Some(Box::new(positioner));
        self
    }

    pub fn block(&self) -> NodeId {
        self.header.block
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn header(&self) -> &BuiltHeader {
        &self.header
    }

    pub fn window(&self) -> VisibleWindow {
        self.plans.window()
    }

    pub fn plans(&self) -> &PlanVisibility {
        &self.plans
    }

    pub fn dropdowns(&self) -> &DropdownController {
        &self.dropdowns
    }

    pub fn sticky(&self) -> Option<&StickyHeader> {
        self.sticky.as_ref()
    }

    /// Suspend/resume handle for the sticky header, if enabled.
    pub fn sticky_release(&self) -> Option<StickyRelease> {
        self.sticky.as_ref().map(|s| s.release().clone())
    }

    /// Text currently in the live region.
    pub fn announcement<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        self.announcer.message(doc)
    }

    /// When [`tick`](Self::tick) next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether the table wants an [`Event::AnimationFrame`].
    pub fn frame_requested(&self) -> bool {
        self.sticky.as_ref().is_some_and(StickyHeader::frame_requested)
    }

    /// Route a host event.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event, now: Instant) -> EventResult {
        if self.destroyed {
            return EventResult::Ignored;
        }
        match event {
            Event::Click { target } => {
                let outcome = self.dropdowns.handle_click(doc, *target, &self.config);
                self.apply_outcome(doc, outcome, now)
            }
            Event::Key {
                target,
                key,
                modifiers,
            } => {
                let outcome = self
                    .dropdowns
                    .handle_key(doc, *target, *key, *modifiers, &self.config);
                self.apply_outcome(doc, outcome, now)
            }
            Event::Scroll => {
                if let Some(sticky) = &mut self.sticky {
                    sticky.on_scroll();
                }
                EventResult::Ignored
            }
            Event::Resize { width, height } => {
                doc.set_viewport(Viewport::new(*width, *height));
                if let Some(sticky) = &mut self.sticky {
                    sticky.on_scroll();
                }
                EventResult::Ignored
            }
            Event::Intersection { target, entry } => match &mut self.sticky {
                Some(sticky) if sticky.sentinel() == *target => {
                    sticky.on_sentinel_intersection(doc, &mut self.dropdowns, *entry, &self.config);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            Event::Mutation { target } => match &mut self.sticky {
                Some(sticky) if sticky.observes_section(doc, *target) => {
                    sticky.on_section_mutation(doc, &mut self.dropdowns, &self.config);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            Event::AnimationFrame => {
                let evaluated = self.sticky.as_mut().is_some_and(|sticky| {
                    sticky.on_animation_frame(doc, &mut self.dropdowns, &self.config)
                });
                if evaluated {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    fn apply_outcome(
        &mut self,
        doc: &mut Document,
        outcome: DropdownOutcome,
        now: Instant,
    ) -> EventResult {
        let result = EventResult::from(&outcome);
        match outcome {
            DropdownOutcome::Navigated {
                label,
                position,
                total,
            } => {
                let message = format!("{label}, {position} of {total}");
                self.announce(doc, now, message);
            }
            DropdownOutcome::Selected { selector, plan } => {
                if let Err(e) = self.select_plan(doc, selector, plan, now) {
                    log::warn!("[table] Plan selection failed: {}", e);
                }
            }
            DropdownOutcome::Ignored | DropdownOutcome::Consumed => {}
        }
        result
    }

    /// Swap `plan` into the column held by the plan owning `selector`.
    ///
    /// Choosing a plan that is already visible does nothing and returns
    /// `Ok(None)`. On a swap the change is announced, the incoming cells fade
    /// in, tooltips are repositioned and focus moves to the incoming plan's
    /// selector, since the outgoing one is now hidden.
    pub fn select_plan(
        &mut self,
        doc: &mut Document,
        selector: PlanIndex,
        plan: PlanIndex,
        now: Instant,
    ) -> Result<Option<PlanSwap>, TableError> {
        if self.plans.window().contains(plan) {
            log::debug!("[table] Plan {} is already visible", plan);
            return Ok(None);
        }
        let swap = self.plans.update_visible_plan(doc, selector, plan)?;

        let message = format!(
            "Plan in {} column changed from {} to {}",
            swap.slot.name(),
            self.title(swap.from),
            self.title(swap.to)
        );
        self.announce(doc, now, message);

        for cell in self.plans.cells_for(doc, swap.to) {
            doc.add_class(cell, classes::PLAN_FADE_IN);
            self.timers.schedule(
                now,
                self.config.fade_duration,
                TimerTask::RemoveClass {
                    node: cell,
                    class: classes::PLAN_FADE_IN,
                },
            );
        }

        if let Some(tooltip) = &mut self.tooltip {
            tooltip.adjust_element_position(doc, self.header.block);
        }

        if let Some(index) = self.dropdowns.selector_for_plan(swap.to) {
            let trigger = self.dropdowns.selectors()[index].trigger;
            doc.focus(trigger);
        }
        Ok(Some(swap))
    }

    /// Run timers that are due at `now`.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        for task in self.timers.due(now) {
            match task {
                TimerTask::ClearAnnouncement { generation } => {
                    self.announcer.clear(doc, generation);
                }
                TimerTask::RemoveClass { node, class } => {
                    doc.remove_class(node, class);
                }
            }
        }
    }

    /// Undo the sticky header, close dropdowns and drop pending timers.
    /// The decorated header and current plan choice stay in place.
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.dropdowns.close_all(doc);
        if let Some(sticky) = &mut self.sticky {
            sticky.teardown(doc);
        }
        for task in self.timers.take_all() {
            if let TimerTask::RemoveClass { node, class } = task {
                doc.remove_class(node, class);
            }
        }
        self.announcer.remove(doc);
        self.destroyed = true;
        log::info!("[table] Destroyed {}", self.header.block);
    }

    fn announce(&mut self, doc: &mut Document, now: Instant, message: String) {
        self.announcer
            .announce(doc, &mut self.timers, now, message, self.config.announcement_delay);
    }

    fn title(&self, plan: PlanIndex) -> &str {
        self.header.titles.get(plan).map_or("", String::as_str)
    }
}
