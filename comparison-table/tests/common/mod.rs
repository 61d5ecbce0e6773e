#![allow(dead_code)]

use std::time::Instant;

use blockdom::{Document, DomRect, Element, Event, Key, Modifiers, NodeId, Viewport};
use comparison_table::{ComparisonTable, TableConfig};

pub const TITLES: [&str; 5] = ["Basic", "Standard", "Premium", "Business", "Enterprise"];

pub const DESKTOP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};
pub const MOBILE: Viewport = Viewport {
    width: 375.0,
    height: 700.0,
};

/// An authored, undecorated block inside a section.
pub struct Authored {
    pub doc: Document,
    pub section: NodeId,
    pub block: NodeId,
    pub header_row: NodeId,
    pub container: NodeId,
    /// Feature rows, each `[label, plan 0, plan 1, ...]`.
    pub rows: Vec<Vec<NodeId>>,
}

/// Block layout (viewport coordinates before scrolling):
///
/// - block: y 200..1500
/// - header row: y 260..360
/// - table container: y 360..1460
pub fn authored(plans: usize, viewport: Viewport) -> Authored {
    authored_with(plans, viewport, true)
}

pub fn authored_with(plans: usize, viewport: Viewport, sub_header: bool) -> Authored {
    let mut doc = Document::new(viewport);
    let section = doc.insert(doc.root(), Element::new("section").class("section"));
    let block = doc.insert(
        section,
        Element::div()
            .class("comparison-table")
            .rect(DomRect::new(0.0, 200.0, 1000.0, 1300.0)),
    );
    doc.insert(block, Element::div().class("title-row").text("Compare plans"));

    let mut header = Element::div()
        .class("row")
        .rect(DomRect::new(0.0, 260.0, 1000.0, 100.0))
        .child(Element::div().text("Features"));
    for title in TITLES.iter().take(plans) {
        header = header.child(
            Element::div()
                .child(Element::heading(3, *title))
                .child(Element::span().class("price").text("$10"))
                .child(
                    Element::div()
                        .class("action-area")
                        .child(Element::link("#buy", "Buy now").class("con-button")),
                ),
        );
    }
    let header_row = doc.insert(block, header);

    let container = doc.insert(
        block,
        Element::div()
            .class("table-container")
            .rect(DomRect::new(0.0, 360.0, 1000.0, 1100.0)),
    );
    if sub_header {
        doc.insert(container, Element::div().class("row").class("sub-header").text("Storage"));
    }

    let mut rows = Vec::new();
    for r in 0..3 {
        let row = doc.insert(container, Element::div().class("row"));
        let mut cells = vec![doc.insert(row, Element::div().text(format!("Feature {r}")))];
        for plan in 0..plans {
            cells.push(doc.insert(
                row,
                Element::div()
                    .attr("data-plan-index", plan.to_string())
                    .text(format!("{} feature {r}", TITLES[plan])),
            ));
        }
        rows.push(cells);
    }

    Authored {
        doc,
        section,
        block,
        header_row,
        container,
        rows,
    }
}

/// Decorated block plus its authored nodes.
pub struct Fixture {
    pub doc: Document,
    pub table: ComparisonTable,
    pub section: NodeId,
    pub block: NodeId,
    pub container: NodeId,
    pub rows: Vec<Vec<NodeId>>,
    pub now: Instant,
}

pub fn decorated(plans: usize, viewport: Viewport) -> Fixture {
    decorated_with(plans, viewport, TableConfig::default())
}

pub fn decorated_with(plans: usize, viewport: Viewport, config: TableConfig) -> Fixture {
    let Authored {
        mut doc,
        section,
        block,
        container,
        rows,
        ..
    } = authored(plans, viewport);
    let table = ComparisonTable::decorate(&mut doc, block, config).unwrap();
    Fixture {
        doc,
        table,
        section,
        block,
        container,
        rows,
        now: Instant::now(),
    }
}

impl Fixture {
    pub fn send(&mut self, event: Event) -> comparison_table::EventResult {
        self.table.handle_event(&mut self.doc, &event, self.now)
    }

    pub fn click(&mut self, target: NodeId) -> comparison_table::EventResult {
        self.send(Event::Click { target })
    }

    pub fn key(&mut self, target: NodeId, key: Key) -> comparison_table::EventResult {
        self.send(Event::Key {
            target,
            key,
            modifiers: Modifiers::new(),
        })
    }

    /// Key press on whatever holds focus.
    pub fn key_focused(&mut self, key: Key) -> comparison_table::EventResult {
        let target = self.doc.active_element().unwrap_or(self.doc.root());
        self.key(target, key)
    }

    /// Scroll the window down by `dy` and run the resulting frame.
    pub fn scroll(&mut self, dy: f64) {
        self.doc.scroll_by(dy);
        self.send(Event::Scroll);
        self.send(Event::AnimationFrame);
    }

    pub fn trigger(&self, plan: usize) -> NodeId {
        let index = self.table.dropdowns().selector_for_plan(plan).unwrap();
        self.table.dropdowns().selectors()[index].trigger
    }

    pub fn listbox(&self, plan: usize) -> NodeId {
        let index = self.table.dropdowns().selector_for_plan(plan).unwrap();
        self.table.dropdowns().selectors()[index].listbox
    }

    /// Option for `option_plan` in the selector owned by `plan`.
    pub fn option(&self, plan: usize, option_plan: usize) -> NodeId {
        let index = self.table.dropdowns().selector_for_plan(plan).unwrap();
        self.table.dropdowns().selectors()[index]
            .options
            .iter()
            .find(|(p, _)| *p == option_plan)
            .map(|(_, node)| *node)
            .unwrap()
    }

    pub fn header(&self) -> NodeId {
        self.table.header().header
    }

    pub fn plan_cell(&self, plan: usize) -> NodeId {
        self.table.header().plan_cells[plan]
    }

    /// Plan indices of the header's non-first cells in DOM order.
    pub fn header_order(&self) -> Vec<usize> {
        plan_order(&self.doc, self.header())
    }

    /// Plan indices of a feature row's cells in DOM order.
    pub fn row_order(&self, row: usize) -> Vec<usize> {
        let parent = self.doc.parent(self.rows[row][0]).unwrap();
        plan_order(&self.doc, parent)
    }
}

pub fn plan_order(doc: &Document, parent: NodeId) -> Vec<usize> {
    doc.children(parent)
        .iter()
        .filter_map(|c| doc.attr(*c, "data-plan-index"))
        .map(|v| v.parse().unwrap())
        .collect()
}
