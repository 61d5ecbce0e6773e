//! Error types.

use blockdom::DomError;
use thiserror::Error;

use crate::plans::PlanIndex;

/// Errors raised while decorating a block or swapping plans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The block has no second top-level row to build the header from.
    #[error("Comparison table has no header row")]
    MissingHeaderRow,

    /// Fewer than two plan columns were authored.
    #[error("Header row has {found} plan columns, at least 2 are required")]
    TooFewPlans {
        /// Number of plan columns found.
        found: usize,
    },

    /// A plan index outside `0..count`.
    #[error("Plan {plan} is out of range ({count} plans)")]
    PlanOutOfRange {
        /// The offending index.
        plan: PlanIndex,
        /// Number of plans in the table.
        count: usize,
    },

    /// The plan already occupies a visible column.
    #[error("Plan {0} is already visible")]
    PlanAlreadyVisible(PlanIndex),

    /// The selector's plan is not in a visible column, so it has no slot to swap.
    #[error("Plan {0} is not in a visible column")]
    PlanNotVisible(PlanIndex),

    /// A structural DOM operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}
