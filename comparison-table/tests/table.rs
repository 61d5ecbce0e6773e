mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use blockdom::Key;
use comparison_table::classes;
use comparison_table::{ComparisonTable, Slot, TableConfig, TableError};

use common::{DESKTOP, authored, decorated, decorated_with};

// ============================================================================
// Decoration
// ============================================================================

#[test]
fn test_decorate_renders_initial_window() {
    let f = decorated(4, DESKTOP);

    assert_eq!(f.table.window().plans(), [0, 1]);
    assert_eq!(f.header_order()[..2], [0, 1]);
    assert_eq!(f.row_order(0)[..2], [0, 1]);
    assert!(f.doc.has_class(f.block, "columns-4"));

    let announcer = f.doc.query_class(f.block, classes::ANNOUNCER).unwrap();
    assert_eq!(f.doc.attr(announcer, "aria-live"), Some("polite"));
    assert_eq!(f.table.announcement(&f.doc), None);
}

#[test]
fn test_decorate_error_is_returned() {
    let mut a = authored(1, DESKTOP);

    let result = ComparisonTable::decorate(&mut a.doc, a.block, TableConfig::default());

    assert_eq!(result.unwrap_err(), TableError::TooFewPlans { found: 1 });
}

// ============================================================================
// Selecting plans
// ============================================================================

#[test]
fn test_select_plan_swaps_and_announces() {
    let mut f = decorated(3, DESKTOP);
    let now = f.now;

    let swap = f.table.select_plan(&mut f.doc, 0, 2, now).unwrap().unwrap();

    assert_eq!(swap.slot, Slot::Left);
    assert_eq!(f.header_order(), vec![2, 1, 0]);
    assert_eq!(f.row_order(2), vec![2, 1, 0]);
    assert_eq!(
        f.table.announcement(&f.doc),
        Some("Plan in left column changed from Basic to Premium")
    );
}

#[test]
fn test_announcement_clears_after_delay() {
    let mut f = decorated(3, DESKTOP);
    let now = f.now;
    f.table.select_plan(&mut f.doc, 1, 2, now).unwrap();
    assert_eq!(f.table.next_deadline(), Some(now + Duration::from_millis(100)));

    f.table.tick(&mut f.doc, now + Duration::from_millis(99));
    assert_eq!(
        f.table.announcement(&f.doc),
        Some("Plan in right column changed from Standard to Premium")
    );

    f.table.tick(&mut f.doc, now + Duration::from_millis(100));
    assert_eq!(f.table.announcement(&f.doc), None);
}

#[test]
fn test_newer_announcement_survives_older_clear() {
    let mut f = decorated(4, DESKTOP);
    let now = f.now;
    f.table.select_plan(&mut f.doc, 0, 2, now).unwrap();
    f.table
        .select_plan(&mut f.doc, 2, 3, now + Duration::from_millis(60))
        .unwrap();

    f.table.tick(&mut f.doc, now + Duration::from_millis(120));

    assert_eq!(
        f.table.announcement(&f.doc),
        Some("Plan in left column changed from Premium to Business")
    );
    f.table.tick(&mut f.doc, now + Duration::from_millis(160));
    assert_eq!(f.table.announcement(&f.doc), None);
}

#[test]
fn test_configured_announcement_delay() {
    let config = TableConfig::default().with_announcement_delay(Duration::from_millis(250));
    let mut f = decorated_with(3, DESKTOP, config);
    let now = f.now;
    f.table.select_plan(&mut f.doc, 0, 2, now).unwrap();

    f.table.tick(&mut f.doc, now + Duration::from_millis(200));
    assert!(f.table.announcement(&f.doc).is_some());
    f.table.tick(&mut f.doc, now + Duration::from_millis(250));
    assert!(f.table.announcement(&f.doc).is_none());
}

#[test]
fn test_incoming_cells_fade_in() {
    let mut f = decorated(3, DESKTOP);
    let now = f.now;
    f.table.select_plan(&mut f.doc, 0, 2, now).unwrap();

    let cells = f.table.plans().cells_for(&f.doc, 2);
    assert!(cells.iter().all(|c| f.doc.has_class(*c, classes::PLAN_FADE_IN)));
    assert!(!f.doc.has_class(f.plan_cell(1), classes::PLAN_FADE_IN));

    f.table.tick(&mut f.doc, now + Duration::from_millis(300));
    assert!(cells.iter().all(|c| !f.doc.has_class(*c, classes::PLAN_FADE_IN)));
}

#[test]
fn test_selecting_visible_plan_is_a_no_op() {
    let mut f = decorated(3, DESKTOP);
    let now = f.now;

    let result = f.table.select_plan(&mut f.doc, 0, 1, now);

    assert_eq!(result, Ok(None));
    assert_eq!(f.table.window().plans(), [0, 1]);
    assert_eq!(f.table.announcement(&f.doc), None);
    assert_eq!(f.table.next_deadline(), None);
}

#[test]
fn test_hidden_selector_is_an_error() {
    let mut f = decorated(4, DESKTOP);
    let now = f.now;

    let result = f.table.select_plan(&mut f.doc, 3, 2, now);

    assert_eq!(result, Err(TableError::PlanNotVisible(3)));
    assert_eq!(f.table.window().plans(), [0, 1]);
}

#[test]
fn test_focus_moves_to_incoming_selector() {
    let mut f = decorated(3, DESKTOP);
    let now = f.now;

    f.table.select_plan(&mut f.doc, 0, 2, now).unwrap();

    assert_eq!(f.doc.active_element(), Some(f.trigger(2)));
}

// ============================================================================
// Tooltip collaborator
// ============================================================================

#[test]
fn test_tooltip_positioner_runs_after_each_swap() {
    let mut a = authored(3, DESKTOP);
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let block = a.block;
    let mut table = ComparisonTable::decorate(&mut a.doc, a.block, TableConfig::default())
        .unwrap()
        .with_tooltip_positioner(move |_: &mut blockdom::Document, target: blockdom::NodeId| {
            assert_eq!(target, block);
            seen.set(seen.get() + 1);
        });
    let now = std::time::Instant::now();

    table.select_plan(&mut a.doc, 0, 2, now).unwrap();
    table.select_plan(&mut a.doc, 2, 0, now).unwrap();
    table.select_plan(&mut a.doc, 0, 1, now).unwrap();

    // The last call picked a visible plan and changed nothing.
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_missing_tooltip_positioner_is_fine() {
    let mut f = decorated(3, DESKTOP);
    f.key(f.trigger(0), Key::Down);
    f.key_focused(Key::Enter);

    assert_eq!(f.table.window().plans(), [2, 1]);
}

// ============================================================================
// Destroy
// ============================================================================

#[test]
fn test_destroy_clears_transient_state() {
    let mut f = decorated(3, DESKTOP);
    let now = f.now;
    f.table.select_plan(&mut f.doc, 0, 2, now).unwrap();
    f.click(f.trigger(2));
    let announcer = f.doc.query_class(f.block, classes::ANNOUNCER).unwrap();

    f.table.destroy(&mut f.doc);

    assert_eq!(f.table.dropdowns().open_index(), None);
    assert!(!f.doc.is_connected(announcer));
    assert!(!f.doc.has_class(f.plan_cell(2), classes::PLAN_FADE_IN));
    assert_eq!(f.table.next_deadline(), None);
    // The chosen plans stay on screen.
    assert_eq!(f.header_order()[..2], [2, 1]);
}
