use crate::NodeId;

/// Host events, already targeted at a node where that makes sense.
///
/// Observer callbacks (`IntersectionObserver`, `MutationObserver`) arrive as
/// events too, so a block sees every signal source through one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer click on the deepest node under the pointer.
    Click { target: NodeId },
    /// Key press, targeted at the focused node (or the document root).
    Key {
        target: NodeId,
        key: Key,
        modifiers: Modifiers,
    },
    /// Window scrolled. Carries no payload: positions are read from rects.
    Scroll,
    /// Viewport resized.
    Resize { width: f64, height: f64 },
    /// An observed node crossed an intersection threshold.
    Intersection {
        target: NodeId,
        entry: IntersectionEntry,
    },
    /// Class or style of an observed node changed.
    Mutation { target: NodeId },
    /// The host is about to paint; a previously requested frame callback runs.
    AnimationFrame,
}

/// Snapshot delivered with an intersection callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// `boundingClientRect.top` of the target at callback time.
    pub bounding_top: f64,
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Enter or Space, the two activation keys for buttons and options.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }
}
