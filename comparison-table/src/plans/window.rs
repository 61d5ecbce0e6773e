//! The two visible plan columns.

use crate::classes;
use crate::error::TableError;

/// Identity of an authored plan column, `0..N`.
pub type PlanIndex = usize;

/// One of the two visible columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::Left => Slot::Right,
            Slot::Right => Slot::Left,
        }
    }

    /// Side name used in announcements.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Left => "left",
            Slot::Right => "right",
        }
    }

    /// Class carried by every cell in this column.
    pub fn class(self) -> &'static str {
        match self {
            Slot::Left => classes::LEFT_PLAN,
            Slot::Right => classes::RIGHT_PLAN,
        }
    }
}

/// Ordered pair of distinct, in-range plan indices.
///
/// Both constructors and [`replace`](Self::replace) reject windows that would
/// show the same plan twice or a plan that does not exist, so a value of this
/// type always satisfies the two-distinct-plans invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    left: PlanIndex,
    right: PlanIndex,
    count: usize,
}

impl VisibleWindow {
    pub fn new(left: PlanIndex, right: PlanIndex, count: usize) -> Result<Self, TableError> {
        if count < 2 {
            return Err(TableError::TooFewPlans { found: count });
        }
        for plan in [left, right] {
            if plan >= count {
                return Err(TableError::PlanOutOfRange { plan, count });
            }
        }
        if left == right {
            return Err(TableError::PlanAlreadyVisible(right));
        }
        Ok(Self { left, right, count })
    }

    /// The window every table starts with: the first two authored plans.
    pub fn initial(count: usize) -> Result<Self, TableError> {
        Self::new(0, 1, count)
    }

    pub fn left(&self) -> PlanIndex {
        self.left
    }

    pub fn right(&self) -> PlanIndex {
        self.right
    }

    pub fn plan_count(&self) -> usize {
        self.count
    }

    pub fn get(&self, slot: Slot) -> PlanIndex {
        match slot {
            Slot::Left => self.left,
            Slot::Right => self.right,
        }
    }

    pub fn plans(&self) -> [PlanIndex; 2] {
        [self.left, self.right]
    }

    pub fn contains(&self, plan: PlanIndex) -> bool {
        self.left == plan || self.right == plan
    }

    pub fn slot_of(&self, plan: PlanIndex) -> Option<Slot> {
        if plan == self.left {
            Some(Slot::Left)
        } else if plan == self.right {
            Some(Slot::Right)
        } else {
            None
        }
    }

    /// Window with `slot` showing `plan` instead.
    pub fn replace(self, slot: Slot, plan: PlanIndex) -> Result<Self, TableError> {
        if plan >= self.count {
            return Err(TableError::PlanOutOfRange {
                plan,
                count: self.count,
            });
        }
        if self.contains(plan) {
            return Err(TableError::PlanAlreadyVisible(plan));
        }
        Ok(match slot {
            Slot::Left => Self { left: plan, ..self },
            Slot::Right => Self {
                right: plan,
                ..self
            },
        })
    }

    /// Slots whose plan differs between `self` and `next`, with the outgoing
    /// and incoming plan for each.
    pub fn changes_to(&self, next: &Self) -> Vec<(Slot, PlanIndex, PlanIndex)> {
        [Slot::Left, Slot::Right]
            .into_iter()
            .filter(|slot| self.get(*slot) != next.get(*slot))
            .map(|slot| (slot, self.get(slot), next.get(slot)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_window() {
        let window = VisibleWindow::initial(4).unwrap();
        assert_eq!(window.plans(), [0, 1]);
        assert_eq!(window.slot_of(1), Some(Slot::Right));
        assert_eq!(window.slot_of(2), None);
    }

    #[test]
    fn rejects_invalid_windows() {
        assert_eq!(
            VisibleWindow::initial(1),
            Err(TableError::TooFewPlans { found: 1 })
        );
        assert_eq!(
            VisibleWindow::new(2, 2, 3),
            Err(TableError::PlanAlreadyVisible(2))
        );
        assert_eq!(
            VisibleWindow::new(0, 3, 3),
            Err(TableError::PlanOutOfRange { plan: 3, count: 3 })
        );
    }

    #[test]
    fn replace_keeps_other_slot() {
        let window = VisibleWindow::initial(4).unwrap();
        let next = window.replace(Slot::Left, 2).unwrap();
        assert_eq!(next.plans(), [2, 1]);
        assert_eq!(window.changes_to(&next), vec![(Slot::Left, 0, 2)]);
    }

    #[test]
    fn replace_rejects_visible_plan() {
        let window = VisibleWindow::initial(3).unwrap();
        assert_eq!(
            window.replace(Slot::Left, 1),
            Err(TableError::PlanAlreadyVisible(1))
        );
        assert_eq!(
            window.replace(Slot::Right, 1),
            Err(TableError::PlanAlreadyVisible(1))
        );
    }

    #[test]
    fn any_sequence_of_replacements_keeps_two_distinct_plans() {
        for count in 2..=6 {
            let mut window = VisibleWindow::initial(count).unwrap();
            for step in 0..50 {
                let slot = if step % 3 == 0 { Slot::Right } else { Slot::Left };
                let plan = (step * 7 + 3) % count;
                if let Ok(next) = window.replace(slot, plan) {
                    window = next;
                }
                assert_ne!(window.left(), window.right());
                assert!(window.left() < count && window.right() < count);
            }
        }
    }
}
