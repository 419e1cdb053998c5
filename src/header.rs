//! Scroll-driven header animation
//!
//! Header and back-to-top button share one state: active while the page is
//! scrolled strictly past the threshold. The state is recomputed from the
//! offset on every scroll, so there is no hysteresis.

use crate::event::{Event, EventHandler};
use crate::host::ClassList;
use anyhow::Result;

/// True when `offset_y` is past `threshold`
pub fn is_scrolled(offset_y: f64, threshold: f64) -> bool {
    offset_y > threshold
}

#[derive(Debug, Clone)]
pub struct ScrollHeader<E> {
    header: E,
    back_top: E,
    class: String,
    threshold: f64,
}

impl<E: ClassList> ScrollHeader<E> {
    /// Header and back-to-top button toggled together by `class`
    pub fn new(header: E, back_top: E, class: impl Into<String>, threshold: f64) -> Self {
        ScrollHeader {
            header,
            back_top,
            class: class.into(),
            threshold,
        }
    }

    /// Offset the page must scroll past
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Apply the state for the given scroll offset, returning it
    pub fn update(&mut self, offset_y: f64) -> Result<bool> {
        let active = is_scrolled(offset_y, self.threshold);
        self.header.set_class(&self.class, active)?;
        self.back_top.set_class(&self.class, active)?;
        Ok(active)
    }

    /// Read back from the header element
    pub fn is_active(&self) -> bool {
        self.header.has_class(&self.class)
    }
}

impl<E: ClassList> EventHandler for ScrollHeader<E> {
    fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Scroll { offset_y } = event {
            if let Err(err) = self.update(*offset_y) {
                log::error!("header update failed: {:#}", err);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessElement;

    fn header() -> (ScrollHeader<HeadlessElement>, HeadlessElement, HeadlessElement) {
        let header = HeadlessElement::new("header");
        let back_top = HeadlessElement::new("back-top");
        let animator = ScrollHeader::new(header.clone(), back_top.clone(), "active", 100.0);
        (animator, header, back_top)
    }

    #[test]
    fn test_scroll_past_threshold_activates_both() {
        let (mut animator, header, back_top) = header();
        animator.handle_event(&Event::Scroll { offset_y: 150.0 });
        assert!(header.has_class("active"));
        assert!(back_top.has_class("active"));
        assert!(animator.is_active());
    }

    #[test]
    fn test_scroll_back_deactivates_both() {
        let (mut animator, header, back_top) = header();
        animator.update(150.0).unwrap();
        animator.handle_event(&Event::Scroll { offset_y: 50.0 });
        assert!(!header.has_class("active"));
        assert!(!back_top.has_class("active"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let (mut animator, _, _) = header();
        assert!(!animator.update(100.0).unwrap());
        assert!(animator.update(100.5).unwrap());
    }

    #[test]
    fn test_update_is_idempotent() {
        let (mut animator, header, _) = header();
        animator.update(300.0).unwrap();
        animator.update(300.0).unwrap();
        assert_eq!(header.classes(), vec!["active".to_string()]);
    }
}
