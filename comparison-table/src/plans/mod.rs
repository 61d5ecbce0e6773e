//! Which two plans are visible, and keeping the DOM in step with that.
//!
//! [`VisibleWindow`] is the single source of truth. Every DOM effect comes
//! from two steps over it:
//!
//! - a diff step ([`PlanVisibility::apply_moves`]) that turns the change
//!   between the previous and next window into `insertBefore`/append moves
//!   on the header row and on every feature row;
//! - a render step ([`PlanVisibility::render`]) that derives the visibility
//!   and column classes of every cell and the availability of every
//!   dropdown option from the window alone.

mod window;

pub use window::{PlanIndex, Slot, VisibleWindow};

use blockdom::{Document, NodeId};

use crate::classes;
use crate::dropdown::Selector;
use crate::error::TableError;
use crate::header::BuiltHeader;

/// Outcome of a successful swap, for announcements and follow-up effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSwap {
    pub slot: Slot,
    pub from: PlanIndex,
    pub to: PlanIndex,
}

/// Visible-plan model for one table instance.
#[derive(Debug)]
pub struct PlanVisibility {
    window: VisibleWindow,
    header: NodeId,
    plan_cells: Vec<NodeId>,
    rows: Vec<NodeId>,
    selectors: Vec<Selector>,
}

impl PlanVisibility {
    /// Wire the header's selectors and render the initial `(0, 1)` window.
    pub fn initialize(doc: &mut Document, built: &BuiltHeader) -> Result<Self, TableError> {
        let window = VisibleWindow::initial(built.plan_count())?;
        let model = Self {
            window,
            header: built.header,
            plan_cells: built.plan_cells.clone(),
            rows: built.rows.clone(),
            selectors: built.selectors.clone(),
        };
        model.render(doc);
        Ok(model)
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn plan_count(&self) -> usize {
        self.plan_cells.len()
    }

    /// Header cell for `plan`.
    pub fn plan_cell(&self, plan: PlanIndex) -> Option<NodeId> {
        self.plan_cells.get(plan).copied()
    }

    /// Show `new_plan` in the column currently held by the plan that owns
    /// `selector`.
    ///
    /// Callers check visibility first (the click handler treats an already
    /// visible plan as a no-op); a visible or out-of-range `new_plan` is still
    /// rejected here without touching the DOM.
    pub fn update_visible_plan(
        &mut self,
        doc: &mut Document,
        selector: PlanIndex,
        new_plan: PlanIndex,
    ) -> Result<PlanSwap, TableError> {
        let slot = self
            .window
            .slot_of(selector)
            .ok_or(TableError::PlanNotVisible(selector))?;
        let previous = self.window;
        let next = previous.replace(slot, new_plan)?;

        self.apply_moves(doc, &previous, &next)?;
        self.window = next;
        self.render(doc);

        log::debug!(
            "[plans] {} column: plan {} -> plan {} (window {:?})",
            slot.name(),
            previous.get(slot),
            new_plan,
            next.plans()
        );
        Ok(PlanSwap {
            slot,
            from: previous.get(slot),
            to: new_plan,
        })
    }

    /// Reorder header and row cells so the DOM column order follows `next`.
    ///
    /// For each changed slot the incoming cell is inserted before the
    /// outgoing one, which then moves to the end of its row.
    fn apply_moves(
        &self,
        doc: &mut Document,
        previous: &VisibleWindow,
        next: &VisibleWindow,
    ) -> Result<(), TableError> {
        for (_, outgoing, incoming) in previous.changes_to(next) {
            if let (Some(out_cell), Some(in_cell)) =
                (self.plan_cell(outgoing), self.plan_cell(incoming))
            {
                swap_cells(doc, self.header, out_cell, in_cell)?;
            }

            for row in &self.rows {
                let out_cell = row_cell(doc, *row, outgoing);
                let in_cell = row_cell(doc, *row, incoming);
                if let (Some(out_cell), Some(in_cell)) = (out_cell, in_cell) {
                    swap_cells(doc, *row, out_cell, in_cell)?;
                }
            }
        }
        Ok(())
    }

    /// Derive every class and option state from the current window.
    ///
    /// Idempotent: rendering twice leaves the DOM unchanged.
    pub fn render(&self, doc: &mut Document) {
        for (plan, cell) in self.plan_cells.iter().enumerate() {
            self.render_cell(doc, *cell, plan);
        }

        for row in &self.rows {
            for cell in doc.children(*row).to_vec() {
                if let Some(plan) = cell_plan(doc, cell) {
                    self.render_cell(doc, cell, plan);
                }
            }
        }

        for selector in &self.selectors {
            for (option_plan, option) in &selector.options {
                let own = *option_plan == selector.plan;
                // Own plan is already selected; the other column's plan can't be chosen twice.
                let unavailable = own || self.window.contains(*option_plan);
                doc.toggle_class(*option, classes::INVISIBLE, unavailable);
                doc.set_attr(*option, "aria-selected", own.to_string());
            }
        }
    }

    fn render_cell(&self, doc: &mut Document, cell: NodeId, plan: PlanIndex) {
        let slot = self.window.slot_of(plan);
        doc.toggle_class(cell, classes::INVISIBLE, slot.is_none());
        for side in [Slot::Left, Slot::Right] {
            doc.toggle_class(cell, side.class(), slot == Some(side));
        }
    }

    /// Cells for `plan` in the header and every row.
    pub fn cells_for(&self, doc: &Document, plan: PlanIndex) -> Vec<NodeId> {
        self.plan_cell(plan)
            .into_iter()
            .chain(self.rows.iter().filter_map(|row| row_cell(doc, *row, plan)))
            .collect()
    }
}

fn swap_cells(
    doc: &mut Document,
    parent: NodeId,
    outgoing: NodeId,
    incoming: NodeId,
) -> Result<(), TableError> {
    doc.insert_before(parent, incoming, Some(outgoing))?;
    doc.append_child(parent, outgoing)?;
    Ok(())
}

fn cell_plan(doc: &Document, cell: NodeId) -> Option<PlanIndex> {
    doc.attr(cell, classes::DATA_PLAN_INDEX)?.parse().ok()
}

fn row_cell(doc: &Document, row: NodeId, plan: PlanIndex) -> Option<NodeId> {
    doc.children(row)
        .iter()
        .copied()
        .find(|cell| cell_plan(doc, *cell) == Some(plan))
}
