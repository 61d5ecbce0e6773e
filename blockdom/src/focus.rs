use crate::NodeId;

/// Tracks which node currently holds DOM focus.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Programmatically focus a node.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.focused == Some(id) {
            return false;
        }
        log::trace!("[focus] Changing focus from {:?} to {}", self.focused, id);
        self.focused = Some(id);
        true
    }

    /// Clear focus.
    /// Returns the node that lost focus, if any.
    pub fn blur(&mut self) -> Option<NodeId> {
        self.focused.take()
    }

    /// Focus the next candidate after the current one, wrapping around.
    /// Starts at the first candidate when focus is outside the list.
    /// Returns the newly focused node if focus changed.
    pub fn focus_next(&mut self, candidates: &[NodeId]) -> Option<NodeId> {
        if candidates.is_empty() {
            return None;
        }

        let new_focus = match self.position_in(candidates) {
            Some(i) => candidates[(i + 1) % candidates.len()],
            None => candidates[0],
        };

        self.focus(new_focus).then_some(new_focus)
    }

    /// Focus the previous candidate, wrapping around.
    /// Starts at the last candidate when focus is outside the list.
    /// Returns the newly focused node if focus changed.
    pub fn focus_prev(&mut self, candidates: &[NodeId]) -> Option<NodeId> {
        if candidates.is_empty() {
            return None;
        }

        let last = candidates.len() - 1;
        let new_focus = match self.position_in(candidates) {
            Some(0) | None => candidates[last],
            Some(i) => candidates[i - 1],
        };

        self.focus(new_focus).then_some(new_focus)
    }

    fn position_in(&self, candidates: &[NodeId]) -> Option<usize> {
        let current = self.focused?;
        candidates.iter().position(|id| *id == current)
    }
}
