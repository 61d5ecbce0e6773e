//! Class and attribute names shared with the block's stylesheet.

pub const STICKY_HEADER: &str = "sticky-header";
pub const IS_STUCK: &str = "is-stuck";
pub const IS_RETRACTED: &str = "is-retracted";
pub const GNAV_OFFSET: &str = "gnav-offset";
pub const FIRST_CELL: &str = "first-cell";
pub const PLAN_CELL: &str = "plan-cell";
pub const PLAN_CELL_WRAPPER: &str = "plan-cell-wrapper";
pub const INVISIBLE: &str = "invisible-content";
pub const LEFT_PLAN: &str = "left-plan";
pub const RIGHT_PLAN: &str = "right-plan";
pub const NO_SUBHEADERS: &str = "no-subheaders";
pub const TWO_COLUMNS: &str = "two-columns";
pub const PLAN_FADE_IN: &str = "plan-fade-in";

pub const TABLE_CONTAINER: &str = "table-container";
pub const SUB_HEADER: &str = "sub-header";
pub const CTA: &str = "con-button";
pub const ACTION_AREA: &str = "action-area";

pub const SELECTOR_WRAPPER: &str = "plan-selector-wrapper";
pub const SELECTOR_TRIGGER: &str = "plan-selector";
pub const SELECTOR_OPTIONS: &str = "plan-selector-options";
pub const SELECTOR_OPTION: &str = "plan-selector-option";
pub const FOCUSED_OPTION: &str = "focused";

pub const SENTINEL: &str = "sticky-header-sentinel";
pub const PLACEHOLDER: &str = "sticky-header-placeholder";
pub const ANNOUNCER: &str = "plan-announcer";

pub const DATA_PLAN_INDEX: &str = "data-plan-index";
pub const DATA_STICKY_HEADING: &str = "data-sticky-heading";

/// `columns-N` class for a table with `plans` plan columns.
pub fn columns(plans: usize) -> String {
    format!("columns-{plans}")
}
