use thiserror::Error;

use crate::NodeId;

/// Errors from structural tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// `insert_before` was given a reference node that is not a child of the parent.
    #[error("node {reference} is not a child of {parent}")]
    NotAChild { parent: NodeId, reference: NodeId },

    /// The insertion would make a node its own ancestor.
    #[error("inserting {child} under {parent} would create a cycle")]
    HierarchyCycle { parent: NodeId, child: NodeId },
}
