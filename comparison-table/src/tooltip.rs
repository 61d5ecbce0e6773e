//! Hook for the page's tooltip widget.

use blockdom::{Document, NodeId};

/// Repositions tooltips after the visible plans change.
///
/// Implemented for any `FnMut(&mut Document, NodeId)`, so a closure works:
///
/// ```
/// use comparison_table::TooltipPositioner;
///
/// let mut calls = 0;
/// let mut positioner = |_doc: &mut blockdom::Document, _block: blockdom::NodeId| calls += 1;
/// let mut doc = blockdom::Document::default();
/// let block = doc.root();
/// positioner.adjust_element_position(&mut doc, block);
/// assert_eq!(calls, 1);
/// ```
pub trait TooltipPositioner {
    fn adjust_element_position(&mut self, doc: &mut Document, block: NodeId);
}

impl<F> TooltipPositioner for F
where
    F: FnMut(&mut Document, NodeId),
{
    fn adjust_element_position(&mut self, doc: &mut Document, block: NodeId) {
        self(doc, block)
    }
}
