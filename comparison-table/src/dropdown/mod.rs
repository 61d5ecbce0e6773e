//! Plan selector dropdowns.
//!
//! Every selector owns a [`DropdownState`]; the controller keeps at most one of
//! them open. Opening a dropdown force-closes all others first.

mod events;
mod state;

pub use state::{DropdownState, Selector};

use blockdom::{Document, NodeId};

use crate::classes;
use crate::config::{Breakpoint, TableConfig};
use crate::plans::PlanIndex;

/// What a click or key press did to the dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownOutcome {
    /// Not a dropdown event; let other handlers see it.
    Ignored,
    /// Handled with no further effect.
    Consumed,
    /// The roving focus moved to an option.
    Navigated {
        label: String,
        /// 1-based position among the visible options.
        position: usize,
        total: usize,
    },
    /// An option was chosen. The dropdown is already closed and focus is
    /// back on its trigger.
    Selected {
        selector: PlanIndex,
        plan: PlanIndex,
    },
}

/// Open/closed state and keyboard navigation for all selectors of a table.
#[derive(Debug, Default)]
pub struct DropdownController {
    selectors: Vec<Selector>,
    states: Vec<DropdownState>,
}

impl DropdownController {
    pub fn new(selectors: Vec<Selector>) -> Self {
        let states = vec![DropdownState::default(); selectors.len()];
        Self { selectors, states }
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn state(&self, index: usize) -> Option<DropdownState> {
        self.states.get(index).copied()
    }

    /// Index of the open dropdown, if any.
    pub fn open_index(&self) -> Option<usize> {
        self.states.iter().position(|state| state.is_open)
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.states.get(index).is_some_and(|state| state.is_open)
    }

    /// Selector owned by `plan`'s header cell.
    pub fn selector_for_plan(&self, plan: PlanIndex) -> Option<usize> {
        self.selectors.iter().position(|s| s.plan == plan)
    }

    /// Open dropdown `index`, closing every other dropdown first.
    pub fn open_dropdown(&mut self, doc: &mut Document, index: usize, config: &TableConfig) {
        if index >= self.selectors.len() {
            return;
        }
        for other in 0..self.selectors.len() {
            if other != index {
                self.close_dropdown(doc, other);
            }
        }

        self.place(doc, index, config);

        let selector = &self.selectors[index];
        doc.set_attr(selector.trigger, "aria-expanded", "true");
        doc.remove_class(selector.listbox, classes::INVISIBLE);
        self.states[index].is_open = true;
        log::debug!("[dropdown] Opened selector for plan {}", selector.plan);
    }

    /// Close dropdown `index` and reset its options' roving tabindex.
    ///
    /// Safe to call on a closed dropdown; the DOM is reset either way.
    pub fn close_dropdown(&mut self, doc: &mut Document, index: usize) {
        let Some(selector) = self.selectors.get(index) else {
            return;
        };
        doc.set_attr(selector.trigger, "aria-expanded", "false");
        doc.add_class(selector.listbox, classes::INVISIBLE);
        for (_, option) in &selector.options {
            doc.set_attr(*option, "tabindex", "-1");
            doc.remove_class(*option, classes::FOCUSED_OPTION);
        }

        let state = &mut self.states[index];
        if state.is_open {
            log::debug!("[dropdown] Closed selector for plan {}", selector.plan);
        }
        *state = DropdownState::default();
    }

    /// Close whichever dropdown is open. Returns true if one was.
    pub fn close_all(&mut self, doc: &mut Document) -> bool {
        match self.open_index() {
            Some(index) => {
                self.close_dropdown(doc, index);
                true
            }
            None => false,
        }
    }

    /// On mobile, open towards the left when the dropdown would run past the
    /// middle of the viewport.
    fn place(&self, doc: &mut Document, index: usize, config: &TableConfig) {
        let selector = &self.selectors[index];
        let viewport = doc.viewport();
        let right_aligned = config.breakpoint(viewport.width) == Breakpoint::Mobile && {
            let wrapper_left = doc.rect(selector.wrapper).left();
            let dropdown_width = doc.rect(selector.listbox).width;
            wrapper_left + dropdown_width > viewport.width / 2.0
        };
        doc.toggle_class(selector.listbox, &config.right_aligned_class, right_aligned);
    }

    /// Move the roving focus marker, `tabindex` and DOM focus to `option`.
    fn mark_focused(
        &mut self,
        doc: &mut Document,
        index: usize,
        option: NodeId,
    ) -> DropdownOutcome {
        let selector = &self.selectors[index];
        for (_, node) in &selector.options {
            let focused = *node == option;
            doc.set_attr(*node, "tabindex", if focused { "0" } else { "-1" });
            doc.toggle_class(*node, classes::FOCUSED_OPTION, focused);
        }
        doc.focus(option);

        let visible = selector.visible_options(doc);
        let position = visible.iter().position(|n| *n == option).map_or(0, |i| i + 1);
        let outcome = DropdownOutcome::Navigated {
            label: doc.text_content(option),
            position,
            total: visible.len(),
        };
        self.states[index].focused_option = selector.options.iter().position(|(_, n)| *n == option);
        outcome
    }

    /// Pick `option` of dropdown `index`: close it and return focus to the trigger.
    fn select(&mut self, doc: &mut Document, index: usize, option: NodeId) -> DropdownOutcome {
        let selector = &self.selectors[index];
        let (selector_plan, trigger) = (selector.plan, selector.trigger);
        let Some(plan) = selector.option_plan(option) else {
            return DropdownOutcome::Ignored;
        };
        self.close_dropdown(doc, index);
        doc.focus(trigger);
        DropdownOutcome::Selected {
            selector: selector_plan,
            plan,
        }
    }
}
