//! Click and key handling for the plan selector dropdowns.

use blockdom::{Document, Key, Modifiers, NodeId};

use crate::classes;
use crate::config::TableConfig;

use super::{DropdownController, DropdownOutcome};

impl DropdownController {
    /// Route a click. Clicks outside the open dropdown close it but are
    /// reported as ignored so the rest of the page still sees them.
    pub fn handle_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        config: &TableConfig,
    ) -> DropdownOutcome {
        if let Some(index) = self.trigger_index(doc, target) {
            if self.is_open(index) {
                self.close_dropdown(doc, index);
            } else {
                self.open_dropdown(doc, index, config);
            }
            return DropdownOutcome::Consumed;
        }

        if let Some((index, option)) = self.option_index(doc, target) {
            if doc.has_class(option, classes::INVISIBLE) || !self.is_open(index) {
                return DropdownOutcome::Consumed;
            }
            return self.select(doc, index, option);
        }

        if let Some(open) = self.open_index()
            && !doc.contains(self.selectors[open].wrapper, target)
        {
            self.close_dropdown(doc, open);
        }
        DropdownOutcome::Ignored
    }

    /// Route a key press targeted at `target`.
    ///
    /// Tab and Shift+Tab on an option cycle through the visible options
    /// instead of leaving the listbox. Tab on the trigger of an open dropdown
    /// closes it and lets focus move on.
    pub fn handle_key(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        key: Key,
        modifiers: Modifiers,
        config: &TableConfig,
    ) -> DropdownOutcome {
        // Ignore keys with ctrl/alt modifiers
        if modifiers.ctrl || modifiers.alt {
            return DropdownOutcome::Ignored;
        }

        if let Some(index) = self.trigger_index(doc, target) {
            return self.on_trigger_key(doc, index, key, config);
        }
        if let Some((index, option)) = self.option_index(doc, target)
            && self.is_open(index)
        {
            return self.on_option_key(doc, index, option, key, modifiers);
        }
        DropdownOutcome::Ignored
    }

    fn on_trigger_key(
        &mut self,
        doc: &mut Document,
        index: usize,
        key: Key,
        config: &TableConfig,
    ) -> DropdownOutcome {
        if !self.is_open(index) {
            // Closed state - open on Enter, Space, or Down
            return match key {
                k if k.is_activation() => {
                    self.open_dropdown(doc, index, config);
                    DropdownOutcome::Consumed
                }
                Key::Down => {
                    self.open_dropdown(doc, index, config);
                    self.focus_edge(doc, index, true)
                }
                _ => DropdownOutcome::Ignored,
            };
        }

        match key {
            k if k.is_activation() => {
                self.close_dropdown(doc, index);
                DropdownOutcome::Consumed
            }
            Key::Escape => {
                self.close_dropdown(doc, index);
                DropdownOutcome::Consumed
            }
            Key::Tab | Key::BackTab => {
                self.close_dropdown(doc, index);
                DropdownOutcome::Ignored
            }
            Key::Down | Key::Home => self.focus_edge(doc, index, true),
            Key::Up | Key::End => self.focus_edge(doc, index, false),
            _ => DropdownOutcome::Ignored,
        }
    }

    fn on_option_key(
        &mut self,
        doc: &mut Document,
        index: usize,
        option: NodeId,
        key: Key,
        modifiers: Modifiers,
    ) -> DropdownOutcome {
        match key {
            Key::Down => self.focus_step(doc, index, true),
            Key::Up => self.focus_step(doc, index, false),
            Key::Tab => self.focus_step(doc, index, !modifiers.shift),
            Key::BackTab => self.focus_step(doc, index, false),
            Key::Home => self.focus_edge(doc, index, true),
            Key::End => self.focus_edge(doc, index, false),
            k if k.is_activation() => {
                if doc.has_class(option, classes::INVISIBLE) {
                    return DropdownOutcome::Consumed;
                }
                self.select(doc, index, option)
            }
            Key::Escape => {
                let trigger = self.selectors[index].trigger;
                self.close_dropdown(doc, index);
                doc.focus(trigger);
                DropdownOutcome::Consumed
            }
            _ => DropdownOutcome::Ignored,
        }
    }

    /// Focus the first (`first = true`) or last visible option.
    fn focus_edge(&mut self, doc: &mut Document, index: usize, first: bool) -> DropdownOutcome {
        let visible = self.selectors[index].visible_options(doc);
        let edge = if first { visible.first() } else { visible.last() };
        match edge.copied() {
            Some(option) => self.mark_focused(doc, index, option),
            None => DropdownOutcome::Consumed,
        }
    }

    /// Move focus one visible option forward or back, wrapping around.
    fn focus_step(&mut self, doc: &mut Document, index: usize, forward: bool) -> DropdownOutcome {
        let visible = self.selectors[index].visible_options(doc);
        let moved = if forward {
            doc.focus_next(&visible)
        } else {
            doc.focus_prev(&visible)
        };
        match moved {
            Some(option) => self.mark_focused(doc, index, option),
            None => DropdownOutcome::Consumed,
        }
    }

    fn trigger_index(&self, doc: &Document, target: NodeId) -> Option<usize> {
        self.selectors
            .iter()
            .position(|selector| selector.owns_trigger(doc, target))
    }

    fn option_index(&self, doc: &Document, target: NodeId) -> Option<(usize, NodeId)> {
        self.selectors
            .iter()
            .enumerate()
            .find_map(|(index, selector)| selector.option_at(doc, target).map(|o| (index, o)))
    }
}
