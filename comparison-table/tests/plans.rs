mod common;

use comparison_table::classes;
use comparison_table::{PlanSwap, PlanVisibility, Slot, TableError, VisibleWindow, build_header};

use common::{DESKTOP, authored, plan_order};

fn initialized(plans: usize) -> (common::Authored, comparison_table::BuiltHeader, PlanVisibility) {
    let mut a = authored(plans, DESKTOP);
    let built = build_header(&mut a.doc, a.block).unwrap();
    let model = PlanVisibility::initialize(&mut a.doc, &built).unwrap();
    (a, built, model)
}

fn visible(doc: &blockdom::Document, cells: &[blockdom::NodeId]) -> Vec<bool> {
    cells
        .iter()
        .map(|c| !doc.has_class(*c, classes::INVISIBLE))
        .collect()
}

// ============================================================================
// Initial render
// ============================================================================

#[test]
fn test_initial_window_shows_first_two_plans() {
    let (a, built, model) = initialized(4);

    assert_eq!(model.window(), VisibleWindow::new(0, 1, 4).unwrap());
    assert_eq!(visible(&a.doc, &built.plan_cells), vec![true, true, false, false]);
    assert!(a.doc.has_class(built.plan_cells[0], classes::LEFT_PLAN));
    assert!(a.doc.has_class(built.plan_cells[1], classes::RIGHT_PLAN));

    for row in &a.rows {
        assert_eq!(visible(&a.doc, &row[1..]), vec![true, true, false, false]);
    }
}

#[test]
fn test_initial_option_availability() {
    let (a, built, _) = initialized(3);

    // Selector of plan 0: own plan and the right column's plan are unavailable.
    let hidden: Vec<bool> = built.selectors[0]
        .options
        .iter()
        .map(|(_, o)| a.doc.has_class(*o, classes::INVISIBLE))
        .collect();
    assert_eq!(hidden, vec![true, true, false]);
}

#[test]
fn test_render_is_idempotent() {
    let (mut a, built, model) = initialized(3);
    let before: Vec<Vec<String>> = built
        .plan_cells
        .iter()
        .map(|c| a.doc.classes(*c).to_vec())
        .collect();

    model.render(&mut a.doc);
    model.render(&mut a.doc);

    let after: Vec<Vec<String>> = built
        .plan_cells
        .iter()
        .map(|c| a.doc.classes(*c).to_vec())
        .collect();
    assert_eq!(before, after);
}

// ============================================================================
// Swapping
// ============================================================================

#[test]
fn test_swap_into_left_column() {
    let (mut a, built, mut model) = initialized(3);

    let swap = model.update_visible_plan(&mut a.doc, 0, 2).unwrap();

    assert_eq!(
        swap,
        PlanSwap {
            slot: Slot::Left,
            from: 0,
            to: 2
        }
    );
    assert_eq!(model.window().plans(), [2, 1]);
    assert_eq!(plan_order(&a.doc, built.header), vec![2, 1, 0]);
    assert_eq!(visible(&a.doc, &built.plan_cells), vec![false, true, true]);
    assert!(a.doc.has_class(built.plan_cells[2], classes::LEFT_PLAN));
    assert!(!a.doc.has_class(built.plan_cells[0], classes::LEFT_PLAN));

    for row in &a.rows {
        let parent = a.doc.parent(row[0]).unwrap();
        assert_eq!(plan_order(&a.doc, parent), vec![2, 1, 0]);
        assert_eq!(a.doc.children(parent)[0], row[0]);
        assert_eq!(visible(&a.doc, &row[1..]), vec![false, true, true]);
    }
}

#[test]
fn test_swap_recomputes_every_selector() {
    let (mut a, built, mut model) = initialized(3);
    model.update_visible_plan(&mut a.doc, 0, 2).unwrap();

    let hidden = |selector: usize| -> Vec<bool> {
        built.selectors[selector]
            .options
            .iter()
            .map(|(_, o)| a.doc.has_class(*o, classes::INVISIBLE))
            .collect()
    };
    // Basic is the only plan not on screen, so it is the only choice left.
    assert_eq!(hidden(2), vec![false, true, true]);
    assert_eq!(hidden(1), vec![false, true, true]);

    let selected: Vec<&str> = built.selectors[2]
        .options
        .iter()
        .filter_map(|(_, o)| a.doc.attr(*o, "aria-selected"))
        .collect();
    assert_eq!(selected, vec!["false", "false", "true"]);
}

#[test]
fn test_swap_into_right_column() {
    let (mut a, built, mut model) = initialized(4);

    model.update_visible_plan(&mut a.doc, 1, 3).unwrap();

    assert_eq!(model.window().plans(), [0, 3]);
    assert_eq!(&plan_order(&a.doc, built.header)[..2], &[0, 3]);
    assert!(a.doc.has_class(built.plan_cells[3], classes::RIGHT_PLAN));
}

#[test]
fn test_left_column_precedes_right_across_swaps() {
    let (mut a, built, mut model) = initialized(5);
    let moves = [(0, 2), (1, 4), (2, 3), (4, 0), (3, 1), (0, 2), (1, 3)];

    for (selector, plan) in moves {
        model.update_visible_plan(&mut a.doc, selector, plan).unwrap();

        let window = model.window();
        let order = plan_order(&a.doc, built.header);
        assert_eq!(&order[..2], &window.plans());
        for row in &a.rows {
            let parent = a.doc.parent(row[0]).unwrap();
            assert_eq!(&plan_order(&a.doc, parent)[..2], &window.plans());
        }
        let shown = built
            .plan_cells
            .iter()
            .filter(|c| !a.doc.has_class(**c, classes::INVISIBLE))
            .count();
        assert_eq!(shown, 2);
    }
}

// ============================================================================
// Rejected swaps
// ============================================================================

#[test]
fn test_visible_plan_is_rejected_without_dom_change() {
    let (mut a, built, mut model) = initialized(3);
    let before = plan_order(&a.doc, built.header);

    assert_eq!(
        model.update_visible_plan(&mut a.doc, 0, 1),
        Err(TableError::PlanAlreadyVisible(1))
    );
    assert_eq!(plan_order(&a.doc, built.header), before);
    assert_eq!(model.window().plans(), [0, 1]);
}

#[test]
fn test_out_of_range_and_hidden_selector() {
    let (mut a, _, mut model) = initialized(3);

    assert_eq!(
        model.update_visible_plan(&mut a.doc, 0, 7),
        Err(TableError::PlanOutOfRange { plan: 7, count: 3 })
    );
    assert_eq!(
        model.update_visible_plan(&mut a.doc, 2, 0),
        Err(TableError::PlanNotVisible(2))
    );
}

#[test]
fn test_cells_for_plan() {
    let (a, built, model) = initialized(3);

    let cells = model.cells_for(&a.doc, 2);
    assert_eq!(cells.len(), 1 + a.rows.len());
    assert_eq!(cells[0], built.plan_cells[2]);
    assert!(cells[1..].iter().all(|c| a.rows.iter().any(|r| r[3] == *c)));
}
