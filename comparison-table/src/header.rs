//! Turns the authored header row into the interactive sticky header.

use blockdom::element::is_heading;
use blockdom::{Document, Element, NodeId};

use crate::classes;
use crate::dropdown::Selector;
use crate::error::TableError;
use crate::plans::PlanIndex;

/// Nodes produced by [`build_header`], shared by the plan model, the
/// dropdowns and the sticky controller.
#[derive(Debug, Clone)]
pub struct BuiltHeader {
    /// The block root (table root).
    pub block: NodeId,
    /// The `.sticky-header` wrapper that replaced the authored header row.
    pub header: NodeId,
    /// Label column cell.
    pub first_cell: NodeId,
    /// Header cell per plan, indexed by [`PlanIndex`].
    pub plan_cells: Vec<NodeId>,
    /// Plan titles, indexed by [`PlanIndex`].
    pub titles: Vec<String>,
    /// One selector per plan cell. Empty for two-plan tables.
    pub selectors: Vec<Selector>,
    /// Feature rows whose cells follow the visible window.
    pub rows: Vec<NodeId>,
}

impl BuiltHeader {
    pub fn plan_count(&self) -> usize {
        self.plan_cells.len()
    }
}

/// Build the interactive header for `block`.
///
/// The block's second top-level child is the authored header row: its first
/// cell is the label column and every following cell is a plan. The row is
/// replaced by a `.sticky-header` wrapper holding the same cells, each plan
/// cell gaining a `.plan-cell-wrapper`, a selector when more than two plans
/// exist, and its call-to-action hoisted back onto the cell.
pub fn build_header(doc: &mut Document, block: NodeId) -> Result<BuiltHeader, TableError> {
    let header_row = doc
        .children(block)
        .get(1)
        .copied()
        .ok_or(TableError::MissingHeaderRow)?;
    let cells = doc.children(header_row).to_vec();
    let Some((&first_cell, plan_sources)) = cells.split_first() else {
        return Err(TableError::MissingHeaderRow);
    };
    if plan_sources.len() < 2 {
        return Err(TableError::TooFewPlans {
            found: plan_sources.len(),
        });
    }

    let plan_count = plan_sources.len();
    let titles: Vec<String> = plan_sources
        .iter()
        .enumerate()
        .map(|(plan, cell)| plan_title(doc, *cell, plan))
        .collect();

    let header = doc.build(
        Element::div()
            .class(classes::STICKY_HEADER)
            .attr("role", "row"),
    );
    doc.insert_before(block, header, Some(header_row))?;
    doc.set_rect(header, doc.rect(header_row));

    doc.add_class(first_cell, classes::FIRST_CELL);
    doc.append_child(header, first_cell)?;

    let mut plan_cells = Vec::with_capacity(plan_count);
    let mut selectors = Vec::new();
    for (plan, cell) in plan_sources.iter().copied().enumerate() {
        doc.add_class(cell, classes::PLAN_CELL);
        doc.set_attr(cell, classes::DATA_PLAN_INDEX, plan.to_string());
        doc.append_child(header, cell)?;

        let wrapper = wrap_cell_content(doc, cell)?;
        if plan_count > 2 {
            selectors.push(build_selector(doc, block, wrapper, plan, &titles));
        }
        hoist_actions(doc, cell, wrapper)?;
        plan_cells.push(cell);
    }
    doc.remove(header_row);

    doc.add_class(block, &classes::columns(plan_count));
    doc.toggle_class(block, classes::TWO_COLUMNS, plan_count == 2);
    let has_subheaders = doc.query_class(block, classes::SUB_HEADER).is_some();
    doc.toggle_class(block, classes::NO_SUBHEADERS, !has_subheaders);

    let rows = feature_rows(doc, block, header);
    log::debug!(
        "[header] Built header for {} with {} plans, {} selectors, {} rows",
        block,
        plan_count,
        selectors.len(),
        rows.len()
    );

    Ok(BuiltHeader {
        block,
        header,
        first_cell,
        plan_cells,
        titles,
        selectors,
        rows,
    })
}

/// First heading's text, else the whole cell's text.
fn plan_title(doc: &Document, cell: NodeId, plan: PlanIndex) -> String {
    let source = doc
        .find(cell, |doc, n| is_heading(doc.tag(n)))
        .unwrap_or(cell);
    let title = doc.text_content(source);
    if title.is_empty() {
        format!("Plan {}", plan + 1)
    } else {
        title
    }
}

/// Move the cell's authored content into a fresh `.plan-cell-wrapper`.
fn wrap_cell_content(doc: &mut Document, cell: NodeId) -> Result<NodeId, TableError> {
    let wrapper = doc.build(Element::div().class(classes::PLAN_CELL_WRAPPER));
    for child in doc.children(cell).to_vec() {
        doc.append_child(wrapper, child)?;
    }
    if let Some(text) = doc.text(cell).map(str::to_string) {
        doc.set_text(wrapper, text);
        doc.clear_text(cell);
    }
    doc.append_child(cell, wrapper)?;
    Ok(wrapper)
}

/// Move call-to-action elements out of the wrapper so they are not nested
/// inside the selector's interactive region.
fn hoist_actions(doc: &mut Document, cell: NodeId, wrapper: NodeId) -> Result<(), TableError> {
    let actions: Vec<NodeId> = doc
        .descendants(wrapper)
        .into_iter()
        .filter(|n| doc.has_class(*n, classes::CTA) || doc.has_class(*n, classes::ACTION_AREA))
        .collect();
    // Nested matches travel with their outermost ancestor.
    let outermost: Vec<NodeId> = actions
        .iter()
        .copied()
        .filter(|n| {
            !actions
                .iter()
                .any(|other| other != n && doc.contains(*other, *n))
        })
        .collect();
    for action in outermost {
        doc.append_child(cell, action)?;
    }
    Ok(())
}

fn build_selector(
    doc: &mut Document,
    block: NodeId,
    wrapper: NodeId,
    plan: PlanIndex,
    titles: &[String],
) -> Selector {
    let listbox_id = format!("{block}-plan-{plan}-options");
    let selector_wrapper = doc.insert(wrapper, Element::div().class(classes::SELECTOR_WRAPPER));
    let trigger = doc.insert(
        selector_wrapper,
        Element::div()
            .class(classes::SELECTOR_TRIGGER)
            .attr("role", "button")
            .attr("tabindex", "0")
            .attr("aria-haspopup", "listbox")
            .attr("aria-expanded", "false")
            .attr("aria-controls", listbox_id.clone())
            .attr("aria-label", format!("Change plan, {} selected", titles[plan])),
    );
    let listbox = doc.insert(
        selector_wrapper,
        Element::div()
            .class(classes::SELECTOR_OPTIONS)
            .class(classes::INVISIBLE)
            .attr("role", "listbox")
            .attr("id", listbox_id),
    );

    let options = titles
        .iter()
        .enumerate()
        .map(|(option_plan, title)| {
            let option = doc.insert(
                listbox,
                Element::div()
                    .class(classes::SELECTOR_OPTION)
                    .attr("role", "option")
                    .attr("tabindex", "-1")
                    .attr(classes::DATA_PLAN_INDEX, option_plan.to_string())
                    .attr("aria-selected", (option_plan == plan).to_string())
                    .text(title.clone()),
            );
            (option_plan, option)
        })
        .collect();

    Selector {
        plan,
        wrapper: selector_wrapper,
        trigger,
        listbox,
        options,
    }
}

/// Rows after the header, flattening `.table-container` groups.
fn feature_rows(doc: &Document, block: NodeId, header: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    let after_header = doc
        .children(block)
        .iter()
        .skip_while(|n| **n != header)
        .skip(1);
    for child in after_header {
        if doc.has_class(*child, classes::TABLE_CONTAINER) {
            rows.extend(doc.children(*child).iter().copied());
        } else {
            rows.push(*child);
        }
    }
    rows
}
