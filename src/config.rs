//! Page configuration - selectors, class names, thresholds and timings
//!
//! Defaults describe the landing page markup the behaviors ship with:
//!
//! ```ignore
//! let config = PageConfig::default()
//!     .with_scroll_threshold(64.0)
//!     .with_resize_debounce(Duration::from_millis(150));
//! web::mount(&config)?;
//! ```

use crate::event::{Key, Modifiers};
use crate::suppress::KeyCombo;
use std::time::Duration;

/// CSS selectors for every element the behaviors attach to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub navbar: String,
    /// Matches one or more toggler controls
    pub nav_toggler: String,
    pub header: String,
    pub back_top: String,
    /// Slider root, carries the visible-items style property
    pub slider: String,
    pub slider_container: String,
    pub slider_prev: String,
    pub slider_next: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            navbar: "[data-navbar]".into(),
            nav_toggler: "[data-nav-toggler]".into(),
            header: "[data-header]".into(),
            back_top: "[data-back-top-btn]".into(),
            slider: "[data-slider]".into(),
            slider_container: "[data-slider-container]".into(),
            slider_prev: "[data-slider-prev]".into(),
            slider_next: "[data-slider-next]".into(),
        }
    }
}

/// Class names toggled by the behaviors; the stylesheet owns what they look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    /// Applied to navbar, header and back-to-top button
    pub active: String,
    /// Applied to the body while the navbar is open
    pub nav_open: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        ClassNames {
            active: "active".into(),
            nav_open: "nav-active".into(),
        }
    }
}

/// Full behavior configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub classes: ClassNames,
    /// Header turns active once the page scrolls strictly past this offset
    pub scroll_threshold: f64,
    /// Horizontal travel in pixels before a touch move counts as a swipe
    pub swipe_threshold: f64,
    /// Quiet period before a resize recomputes slider dimensions
    pub resize_debounce: Duration,
    /// Custom style property holding the visible item count
    pub visible_items_property: String,
    pub blocked_keys: Vec<KeyCombo>,
}

impl PageConfig {
    /// Same as `Default`: the stock landing page contract
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every selector
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Replace the toggled class names
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    /// Scroll offset the header must pass to activate
    pub fn with_scroll_threshold(mut self, threshold: f64) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    /// Horizontal travel that counts as a swipe
    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Quiet period before a resize is handled
    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    /// Style property to read the visible item count from
    pub fn with_visible_items_property(mut self, name: impl Into<String>) -> Self {
        self.visible_items_property = name.into();
        self
    }

    /// Replace the blocked key combinations
    pub fn with_blocked_keys(mut self, keys: Vec<KeyCombo>) -> Self {
        self.blocked_keys = keys;
        self
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            selectors: Selectors::default(),
            classes: ClassNames::default(),
            scroll_threshold: 100.0,
            swipe_threshold: 50.0,
            resize_debounce: Duration::from_millis(200),
            visible_items_property: "--slider-items".into(),
            blocked_keys: default_blocked_keys(),
        }
    }
}

/// F12, Ctrl+Shift+I, Ctrl+Shift+J and Ctrl+U
pub fn default_blocked_keys() -> Vec<KeyCombo> {
    vec![
        KeyCombo::new(Key::F(12), Modifiers::NONE),
        KeyCombo::new(Key::Char('i'), Modifiers::CTRL_SHIFT),
        KeyCombo::new(Key::Char('j'), Modifiers::CTRL_SHIFT),
        KeyCombo::new(Key::Char('u'), Modifiers::CTRL),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_markup_contract() {
        let config = PageConfig::default();
        assert_eq!(config.selectors.navbar, "[data-navbar]");
        assert_eq!(config.selectors.back_top, "[data-back-top-btn]");
        assert_eq!(config.classes.nav_open, "nav-active");
        assert_eq!(config.scroll_threshold, 100.0);
        assert_eq!(config.swipe_threshold, 50.0);
        assert_eq!(config.resize_debounce, Duration::from_millis(200));
        assert_eq!(config.visible_items_property, "--slider-items");
        assert_eq!(config.blocked_keys.len(), 4);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PageConfig::new()
            .with_scroll_threshold(10.0)
            .with_swipe_threshold(20.0)
            .with_resize_debounce(Duration::from_millis(5))
            .with_visible_items_property("--items")
            .with_blocked_keys(Vec::new());

        assert_eq!(config.scroll_threshold, 10.0);
        assert_eq!(config.swipe_threshold, 20.0);
        assert_eq!(config.resize_debounce, Duration::from_millis(5));
        assert_eq!(config.visible_items_property, "--items");
        assert!(config.blocked_keys.is_empty());
    }
}
