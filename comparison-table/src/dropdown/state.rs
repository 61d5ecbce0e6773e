//! Selector nodes and per-selector dropdown state.

use blockdom::{Document, NodeId};

use crate::classes;
use crate::plans::PlanIndex;

/// DOM nodes of one plan selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Plan whose header cell carries this selector.
    pub plan: PlanIndex,
    /// `.plan-selector-wrapper`, the positioning anchor.
    pub wrapper: NodeId,
    /// `role=button` trigger.
    pub trigger: NodeId,
    /// `role=listbox` container.
    pub listbox: NodeId,
    /// Options in authored plan order.
    pub options: Vec<(PlanIndex, NodeId)>,
}

impl Selector {
    /// Options not hidden by plan availability, in DOM order.
    pub fn visible_options(&self, doc: &Document) -> Vec<NodeId> {
        self.options
            .iter()
            .map(|(_, option)| *option)
            .filter(|option| !doc.has_class(*option, classes::INVISIBLE))
            .collect()
    }

    pub fn option_plan(&self, option: NodeId) -> Option<PlanIndex> {
        self.options
            .iter()
            .find(|(_, node)| *node == option)
            .map(|(plan, _)| *plan)
    }

    /// True if `node` is the trigger or anything inside it.
    pub fn owns_trigger(&self, doc: &Document, node: NodeId) -> bool {
        doc.contains(self.trigger, node)
    }

    /// Option that is, or contains, `node`.
    pub fn option_at(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        self.options
            .iter()
            .map(|(_, option)| *option)
            .find(|option| doc.contains(*option, node))
    }
}

/// Open/closed state of one dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    pub is_open: bool,
    /// Index into the selector's options of the option holding the
    /// roving "focused" marker.
    pub focused_option: Option<usize>,
}
