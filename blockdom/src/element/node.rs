use std::collections::BTreeMap;

use crate::layout::DomRect;

/// Detached description of a subtree, turned into live nodes by
/// [`Document::insert`](crate::Document::insert).
///
/// Mirrors how authored block markup arrives: a tag, a class list,
/// attributes, optional text and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    // Identity
    pub tag: String,

    // Markup
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: Option<String>,

    // Layout, as reported by the host
    pub rect: DomRect,

    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// Heading element, `level` clamped to 1..=6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let level = level.clamp(1, 6);
        Self::new(format!("h{level}")).text(text)
    }

    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("a").attr("href", href).text(text)
    }

    // Markup
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    // Layout
    pub fn rect(mut self, rect: DomRect) -> Self {
        self.rect = rect;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
