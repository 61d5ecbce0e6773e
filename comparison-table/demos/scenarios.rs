//! Walks a four-plan comparison table through plan swaps, dropdown use and
//! a full scroll cycle, printing the state after each step.
//!
//! Run with `cargo run --example scenarios`; debug logs go to `scenarios.log`.

use std::fs::File;
use std::time::{Duration, Instant};

use blockdom::{Document, DomRect, Element, Event, Key, Modifiers, NodeId, Viewport};
use comparison_table::{ComparisonTable, TableConfig};
use simplelog::{Config, LevelFilter, WriteLogger};

const PLANS: [(&str, &str); 4] = [
    ("Basic", "$9"),
    ("Standard", "$19"),
    ("Premium", "$39"),
    ("Business", "$79"),
];
const FEATURES: [&str; 4] = ["Cloud storage", "Seats", "Support", "Admin console"];

fn build_page(doc: &mut Document) -> (NodeId, NodeId) {
    let section = doc.insert(doc.root(), Element::new("section").class("section"));
    let block = doc.insert(
        section,
        Element::div()
            .class("comparison-table")
            .rect(DomRect::new(0.0, 400.0, 1280.0, 900.0)),
    );
    doc.insert(block, Element::div().child(Element::heading(2, "Compare plans")));

    let mut header = Element::div()
        .rect(DomRect::new(0.0, 460.0, 1280.0, 120.0))
        .child(Element::div().text("Features"));
    for (title, price) in PLANS {
        header = header.child(
            Element::div()
                .child(Element::heading(3, title))
                .child(Element::span().text(format!("{price}/mo")))
                .child(Element::link("#buy", "Buy now").class("con-button")),
        );
    }
    doc.insert(block, header);

    let container = doc.insert(
        block,
        Element::div()
            .class("table-container")
            .rect(DomRect::new(0.0, 580.0, 1280.0, 700.0)),
    );
    for (row, feature) in FEATURES.iter().enumerate() {
        let mut cells = Element::div().class("row").child(Element::div().text(*feature));
        for (plan, (title, _)) in PLANS.iter().enumerate() {
            cells = cells.child(
                Element::div()
                    .attr("data-plan-index", plan.to_string())
                    .text(format!("{title}: tier {}", row + plan)),
            );
        }
        doc.insert(container, cells);
    }
    (section, block)
}

fn visible_titles(table: &ComparisonTable) -> String {
    let [left, right] = table.window().plans();
    format!("{} | {}", PLANS[left].0, PLANS[right].0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("scenarios.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut doc = Document::new(Viewport::new(1280.0, 800.0));
    doc.set_custom_property("--global-nav-height", "64px");
    let (section, block) = build_page(&mut doc);

    let config = TableConfig::default();
    let mut table = ComparisonTable::decorate(&mut doc, block, config)?
        .with_tooltip_positioner(|_: &mut Document, block: NodeId| {
            log::debug!("[demo] Repositioning tooltips in {}", block);
        });
    let mut now = Instant::now();
    println!("decorated:        {}", visible_titles(&table));

    // Swap Premium into the left column through the keyboard.
    let trigger = table.dropdowns().selectors()[0].trigger;
    let press = |target, key| Event::Key {
        target,
        key,
        modifiers: Modifiers::new(),
    };
    table.handle_event(&mut doc, &press(trigger, Key::Down), now);
    println!("opened selector:  {:?}", table.announcement(&doc));
    if let Some(option) = doc.active_element() {
        table.handle_event(&mut doc, &press(option, Key::Enter), now);
    }
    println!("swapped:          {}", visible_titles(&table));
    println!("announced:        {:?}", table.announcement(&doc));

    now += Duration::from_millis(150);
    table.tick(&mut doc, now);
    println!("after 150ms:      {:?}", table.announcement(&doc));

    // Opening one selector closes the other.
    let left = table.dropdowns().selectors()[2].trigger;
    let right = table.dropdowns().selectors()[1].trigger;
    table.handle_event(&mut doc, &Event::Click { target: left }, now);
    table.handle_event(&mut doc, &Event::Click { target: right }, now);
    println!("open selector:    {:?}", table.dropdowns().open_index());

    // Scroll past the nav line, then to the end of the table.
    for dy in [350.0, 900.0, -1250.0] {
        doc.scroll_by(dy);
        table.handle_event(&mut doc, &Event::Scroll, now);
        table.handle_event(&mut doc, &Event::AnimationFrame, now);
        let state = table.sticky().map(|s| s.state());
        println!("scrolled {dy:>7}:  {state:?}");
    }

    // Hiding the section releases a pinned header.
    doc.scroll_by(400.0);
    table.handle_event(&mut doc, &Event::Scroll, now);
    table.handle_event(&mut doc, &Event::AnimationFrame, now);
    doc.add_class(section, "hidden");
    table.handle_event(&mut doc, &Event::Mutation { target: section }, now);
    println!("section hidden:   {:?}", table.sticky().map(|s| s.state()));

    table.destroy(&mut doc);
    println!("destroyed:        {:?}", table);
    Ok(())
}
