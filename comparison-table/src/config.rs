//! Table configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Layout tier derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

/// Per-block configuration.
///
/// Defaults match the block stylesheet. Hosts that read block metadata can
/// deserialize it; missing keys fall back to the defaults and durations are
/// given in milliseconds.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use comparison_table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_nav_offset_property("--feds-height-nav")
///     .with_announcement_delay(Duration::from_millis(150));
/// assert_eq!(config.mobile_max_width, 767.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Widest viewport still treated as mobile.
    ///
    /// Default: 767px
    pub mobile_max_width: f64,

    /// Narrowest viewport treated as desktop.
    ///
    /// Default: 1200px
    pub desktop_min_width: f64,

    /// Root custom property holding the global nav height, read at desktop
    /// widths as the sticky trigger line.
    pub nav_offset_property: String,

    /// How long a live-region announcement stays before it is cleared.
    ///
    /// Default: 100ms
    #[serde(rename = "announcement_delay_ms", deserialize_with = "duration_ms")]
    pub announcement_delay: Duration,

    /// How long swapped-in cells keep the fade-in class.
    ///
    /// Default: 300ms
    #[serde(rename = "fade_duration_ms", deserialize_with = "duration_ms")]
    pub fade_duration: Duration,

    /// Classes that mark the enclosing section as hidden.
    pub hidden_section_classes: Vec<String>,

    /// Class added to a dropdown that must open towards the left on mobile.
    pub right_aligned_class: String,

    /// Whether the header pins itself while the table scrolls.
    pub sticky_header: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            mobile_max_width: 767.0,
            desktop_min_width: 1200.0,
            nav_offset_property: "--global-nav-height".to_string(),
            announcement_delay: Duration::from_millis(100),
            fade_duration: Duration::from_millis(300),
            hidden_section_classes: vec!["hidden".to_string(), "toggle-off".to_string()],
            right_aligned_class: "right-aligned".to_string(),
            sticky_header: true,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nav offset custom property name.
    pub fn with_nav_offset_property(mut self, property: impl Into<String>) -> Self {
        self.nav_offset_property = property.into();
        self
    }

    /// Sets the announcement clear delay.
    pub fn with_announcement_delay(mut self, delay: Duration) -> Self {
        self.announcement_delay = delay;
        self
    }

    /// Sets the fade-in duration.
    pub fn with_fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Sets the mobile and desktop thresholds.
    pub fn with_breakpoints(mut self, mobile_max_width: f64, desktop_min_width: f64) -> Self {
        self.mobile_max_width = mobile_max_width;
        self.desktop_min_width = desktop_min_width;
        self
    }

    /// Disables the sticky header.
    pub fn without_sticky_header(mut self) -> Self {
        self.sticky_header = false;
        self
    }

    /// Classify a viewport width.
    pub fn breakpoint(&self, viewport_width: f64) -> Breakpoint {
        if viewport_width <= self.mobile_max_width {
            Breakpoint::Mobile
        } else if viewport_width >= self.desktop_min_width {
            Breakpoint::Desktop
        } else {
            Breakpoint::Tablet
        }
    }
}

fn duration_ms<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
