//! Plan selector and sticky header for comparison-table blocks.
//!
//! A decorated block shows two of its N plans side by side. Each visible plan
//! header carries a dropdown for swapping another plan into its column, and the
//! header row pins itself to the top of the viewport while the table scrolls.
//!
//! [`ComparisonTable`] is the entry point: decorate a block once, then feed it
//! host events and the current time.

pub mod announce;
pub mod classes;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod frame;
pub mod header;
pub mod plans;
pub mod sticky;
pub mod table;
pub mod timers;
pub mod tooltip;

pub use config::{Breakpoint, TableConfig};
pub use dropdown::{DropdownController, DropdownOutcome, DropdownState, Selector};
pub use error::TableError;
pub use header::{BuiltHeader, build_header};
pub use plans::{PlanIndex, PlanSwap, PlanVisibility, Slot, VisibleWindow};
pub use sticky::{StickyHeader, StickyRelease, StickySignals, StickyState, classify};
pub use table::{ComparisonTable, EventResult};
pub use tooltip::TooltipPositioner;
