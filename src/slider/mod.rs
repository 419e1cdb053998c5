//! Manual slider - position tracking, layout measurement and swipes
//!
//! The slider shows `visible` items of a longer row at a time. The current
//! position is the index of the leftmost aligned item and ranges over
//! `0..=slidable`, where `slidable = items - visible`. Both ends wrap:
//! advancing past the last position returns to 0 and retreating from 0
//! jumps to the last position.
//!
//! # Example
//! ```ignore
//! let mut slider = Slider::new(track, "--slider-items", 50.0)?;
//! slider.advance()?;   // position 1
//! slider.retreat()?;   // back to 0
//! slider.retreat()?;   // wraps to slider.slidable_items()
//! ```

pub mod swipe;

pub use swipe::{SwipeDirection, SwipeTracker};

use crate::error::PageError;
use crate::event::{Event, EventHandler};
use crate::host::SlideTrack;
use anyhow::Result;

/// Parse the visible-items style property
///
/// Accepts a positive whole number with optional surrounding whitespace;
/// `"3.0"` is accepted as 3. Zero is rejected: with nothing visible the last
/// position would point one past the final item.
pub fn parse_visible_items(property: &str, raw: &str) -> Result<usize, PageError> {
    let value = raw.trim();
    let invalid = || PageError::InvalidStyleProperty {
        property: property.to_string(),
        value: raw.to_string(),
    };

    let count = match value.parse::<usize>() {
        Ok(n) => n,
        Err(_) => match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 => n as usize,
            _ => return Err(invalid()),
        },
    };

    if count == 0 {
        return Err(invalid());
    }
    Ok(count)
}

/// Slider state over a live [`SlideTrack`]
#[derive(Debug)]
pub struct Slider<T> {
    track: T,
    property: String,
    visible_items: usize,
    slidable_items: usize,
    position: usize,
    swipe: SwipeTracker,
}

impl<T: SlideTrack> Slider<T> {
    /// Measure the track and start at position 0
    pub fn new(track: T, property: impl Into<String>, swipe_threshold: f64) -> Result<Self> {
        let mut slider = Slider {
            track,
            property: property.into(),
            visible_items: 0,
            slidable_items: 0,
            position: 0,
            swipe: SwipeTracker::new(swipe_threshold),
        };
        slider.measure()?;
        Ok(slider)
    }

    /// Index of the leftmost aligned item
    pub fn position(&self) -> usize {
        self.position
    }

    /// Items on screen at once, as last measured
    pub fn visible_items(&self) -> usize {
        self.visible_items
    }

    /// Highest valid position
    pub fn slidable_items(&self) -> usize {
        self.slidable_items
    }

    /// The underlying track
    pub fn track(&self) -> &T {
        &self.track
    }

    /// Re-read visible and slidable counts from the track
    fn measure(&mut self) -> Result<()> {
        let raw = self.track.style_property(&self.property)?;
        self.visible_items = parse_visible_items(&self.property, &raw)?;
        self.slidable_items = self.track.item_count().saturating_sub(self.visible_items);
        Ok(())
    }

    /// Align the item at the current position with the left edge
    ///
    /// The offset is read from live layout on every call, since item
    /// offsets change with the viewport width.
    pub fn render(&self) -> Result<()> {
        self.render_at(self.position)
    }

    fn render_at(&self, index: usize) -> Result<()> {
        if self.track.item_count() == 0 {
            return Ok(());
        }
        let offset = self
            .track
            .item_offset(index)
            .ok_or(PageError::MissingSlide { index })?;
        self.track.shift_to(offset)
    }

    /// Move to `index`, keeping the old position if it cannot be shown
    fn go_to(&mut self, index: usize) -> Result<()> {
        self.render_at(index)?;
        self.position = index;
        Ok(())
    }

    /// Next slide, wrapping to the first after the last
    pub fn advance(&mut self) -> Result<()> {
        let next = if self.position >= self.slidable_items {
            0
        } else {
            self.position + 1
        };
        self.go_to(next)
    }

    /// Previous slide, wrapping to the last before the first
    pub fn retreat(&mut self) -> Result<()> {
        let previous = if self.position == 0 {
            self.slidable_items
        } else {
            self.position - 1
        };
        self.go_to(previous)
    }

    /// Recompute dimensions after a viewport change
    ///
    /// The position is clamped to the new last position so it never points
    /// past the row, then the track is re-rendered.
    pub fn refresh(&mut self) -> Result<()> {
        self.measure()?;
        if self.position > self.slidable_items {
            log::debug!(
                "slider position {} clamped to {}",
                self.position,
                self.slidable_items
            );
            self.position = self.slidable_items;
        }
        self.render()
    }

    /// Arm swipe tracking at client X
    pub fn touch_start(&mut self, x: f64) {
        self.swipe.start(x);
    }

    /// Feed a touch move, navigating if it completes a swipe
    pub fn touch_move(&mut self, x: f64) -> Result<Option<SwipeDirection>> {
        let direction = self.swipe.moved(x);
        match direction {
            Some(SwipeDirection::Forward) => self.advance()?,
            Some(SwipeDirection::Backward) => self.retreat()?,
            None => return Ok(None),
        }
        log::debug!("swipe {:?} to slide {}", direction, self.position);
        Ok(direction)
    }
}

impl<T: SlideTrack> EventHandler for Slider<T> {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::TouchStart { x } => self.touch_start(*x),
            Event::TouchMove { x } => {
                if let Err(err) = self.touch_move(*x) {
                    log::error!("slider swipe failed: {:#}", err);
                }
            }
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessTrack;

    const PROP: &str = "--slider-items";

    /// Slider over `items` items of 100px with `visible` on screen
    fn slider(items: usize, visible: usize) -> Slider<HeadlessTrack> {
        Slider::new(HeadlessTrack::new(items, visible, 100.0), PROP, 50.0).unwrap()
    }

    #[test]
    fn test_initial_measurement() {
        let s = slider(6, 3);
        assert_eq!(s.position(), 0);
        assert_eq!(s.visible_items(), 3);
        assert_eq!(s.slidable_items(), 3);
    }

    #[test]
    fn test_more_visible_than_items() {
        let mut s = slider(2, 4);
        assert_eq!(s.slidable_items(), 0);
        s.advance().unwrap();
        assert_eq!(s.position(), 0);
        s.retreat().unwrap();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_advance_wraps_at_end() {
        let mut s = slider(6, 3);
        for _ in 0..3 {
            s.advance().unwrap();
        }
        assert_eq!(s.position(), 3);
        s.advance().unwrap();
        assert_eq!(s.position(), 0);
        assert_eq!(s.track().offset(), Some(0.0));
    }

    #[test]
    fn test_retreat_wraps_at_start() {
        let mut s = slider(6, 3);
        s.retreat().unwrap();
        assert_eq!(s.position(), 3);
        assert_eq!(s.track().offset(), Some(300.0));
    }

    #[test]
    fn test_advance_is_modular() {
        for slidable in 0..5 {
            for n in 0..12 {
                let mut s = slider(slidable + 2, 2);
                for _ in 0..n {
                    s.advance().unwrap();
                }
                assert_eq!(s.position(), n % (slidable + 1), "S={} N={}", slidable, n);
            }
        }
    }

    #[test]
    fn test_retreat_is_modular() {
        for slidable in 0..5 {
            for n in 0..12 {
                let mut s = slider(slidable + 2, 2);
                for _ in 0..n {
                    s.retreat().unwrap();
                }
                let period = slidable + 1;
                assert_eq!(
                    s.position(),
                    (period - n % period) % period,
                    "S={} N={}",
                    slidable,
                    n
                );
            }
        }
    }

    #[test]
    fn test_round_trip_inside_range() {
        let mut s = slider(6, 3);
        s.advance().unwrap();
        s.advance().unwrap();

        s.advance().unwrap();
        s.retreat().unwrap();
        assert_eq!(s.position(), 2);

        s.retreat().unwrap();
        s.advance().unwrap();
        assert_eq!(s.position(), 2);
    }

    #[test]
    fn test_round_trip_across_wrap_boundary() {
        // From the last position, advance wraps to 0 and retreat goes back
        let mut s = slider(6, 3);
        s.retreat().unwrap();
        assert_eq!(s.position(), 3);
        s.advance().unwrap();
        assert_eq!(s.position(), 0);
        s.retreat().unwrap();
        assert_eq!(s.position(), 3);

        // From 0, retreat wraps to the last position and advance goes back
        s.advance().unwrap();
        s.retreat().unwrap();
        assert_eq!(s.position(), 3);
        s.advance().unwrap();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut s = slider(6, 3);
        s.advance().unwrap();
        s.render().unwrap();
        let first = s.track().offset();
        s.render().unwrap();
        assert_eq!(s.track().offset(), first);
        assert_eq!(first, Some(100.0));
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn test_render_reads_live_layout() {
        let mut s = slider(6, 3);
        s.advance().unwrap();
        s.track().set_layout(3, 60.0);
        s.render().unwrap();
        assert_eq!(s.track().offset(), Some(60.0));
    }

    #[test]
    fn test_empty_track_renders_nothing() {
        let mut s = slider(0, 3);
        s.advance().unwrap();
        s.retreat().unwrap();
        assert_eq!(s.track().shift_count(), 0);
    }

    #[test]
    fn test_refresh_clamps_position() {
        let mut s = slider(6, 2);
        for _ in 0..4 {
            s.advance().unwrap();
        }
        assert_eq!(s.position(), 4);

        // Wider breakpoint shows more items, fewer positions remain
        s.track().set_layout(4, 150.0);
        s.refresh().unwrap();
        assert_eq!(s.slidable_items(), 2);
        assert_eq!(s.position(), 2);
        assert_eq!(s.track().offset(), Some(300.0));
    }

    #[test]
    fn test_refresh_keeps_valid_position() {
        let mut s = slider(6, 3);
        s.advance().unwrap();
        s.track().set_layout(2, 50.0);
        s.refresh().unwrap();
        assert_eq!(s.slidable_items(), 4);
        assert_eq!(s.position(), 1);
        assert_eq!(s.track().offset(), Some(50.0));
    }

    #[test]
    fn test_refresh_rejects_bad_property() {
        let mut s = slider(6, 3);
        s.track().set_style_value("three");
        let err = s.refresh().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PageError>(),
            Some(PageError::InvalidStyleProperty { .. })
        ));
    }

    #[test]
    fn test_zero_visible_items_rejected() {
        let err = Slider::new(HeadlessTrack::new(6, 0, 100.0), PROP, 50.0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PageError>(),
            Some(PageError::InvalidStyleProperty { .. })
        ));
    }

    #[test]
    fn test_failed_render_keeps_position() {
        let mut s = slider(6, 3);
        s.advance().unwrap();
        s.track().set_item_count(2);

        // Position 2 no longer exists until the next refresh
        let err = s.advance().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PageError>(),
            Some(PageError::MissingSlide { index: 2 })
        ));
        assert_eq!(s.position(), 1);
        assert_eq!(s.track().offset(), Some(100.0));

        s.retreat().unwrap();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_swipe_navigates_once_per_gesture() {
        let mut s = slider(6, 3);
        s.handle_event(&Event::TouchStart { x: 200.0 });
        s.handle_event(&Event::TouchMove { x: 140.0 });
        assert_eq!(s.position(), 1);

        s.handle_event(&Event::TouchMove { x: 0.0 });
        s.handle_event(&Event::TouchMove { x: 80.0 });
        assert_eq!(s.position(), 1);

        s.handle_event(&Event::TouchStart { x: 100.0 });
        assert_eq!(s.touch_move(170.0).unwrap(), Some(SwipeDirection::Backward));
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_parse_visible_items() {
        assert_eq!(parse_visible_items(PROP, "3").unwrap(), 3);
        assert_eq!(parse_visible_items(PROP, " 4 ").unwrap(), 4);
        assert_eq!(parse_visible_items(PROP, "2.0").unwrap(), 2);
        assert!(parse_visible_items(PROP, "").is_err());
        assert!(parse_visible_items(PROP, "0").is_err());
        assert!(parse_visible_items(PROP, "0.0").is_err());
        assert!(parse_visible_items(PROP, "2.5").is_err());
        assert!(parse_visible_items(PROP, "-1").is_err());
        assert!(parse_visible_items(PROP, "auto").is_err());
    }
}
