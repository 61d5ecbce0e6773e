mod node;

pub use node::Element;

/// Tag names treated as document headings.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Returns true if `tag` names a heading element.
pub fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag.to_ascii_lowercase().as_str())
}
