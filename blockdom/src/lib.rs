pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod layout;

pub use document::{Document, NodeId};
pub use element::Element;
pub use error::DomError;
pub use event::{Event, IntersectionEntry, Key, Modifiers};
pub use focus::FocusState;
pub use layout::{DomRect, Viewport};
