//! Horizontal swipe interpretation

/// Direction of a recognized swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: show the next slide
    Forward,
    /// Finger moved right: show the previous slide
    Backward,
}

/// Turns a touch start plus a stream of moves into at most one swipe
///
/// A gesture is armed on touch start and disarmed as soon as it crosses the
/// threshold in either direction; later moves are ignored until the next
/// touch start.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
    threshold: f64,
}

impl SwipeTracker {
    /// Disarmed tracker needing more than `threshold` pixels of travel
    pub fn new(threshold: f64) -> Self {
        SwipeTracker {
            start_x: None,
            threshold,
        }
    }

    /// True between a touch start and the swipe it completes
    pub fn is_armed(&self) -> bool {
        self.start_x.is_some()
    }

    /// Arm at client X
    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Feed a move; returns the swipe if this move completed one
    pub fn moved(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x?;
        let delta = start - x;

        let direction = if delta > self.threshold {
            SwipeDirection::Forward
        } else if delta < -self.threshold {
            SwipeDirection::Backward
        } else {
            return None;
        };

        self.start_x = None;
        Some(direction)
    }

    /// Disarm without firing
    pub fn reset(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_swipe_fires_once() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(200.0);
        assert_eq!(swipe.moved(140.0), Some(SwipeDirection::Forward));
        assert!(!swipe.is_armed());

        // Rest of the same gesture is ignored
        assert_eq!(swipe.moved(20.0), None);
        assert_eq!(swipe.moved(400.0), None);
    }

    #[test]
    fn test_backward_swipe() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(100.0);
        assert_eq!(swipe.moved(130.0), None);
        assert_eq!(swipe.moved(151.0), Some(SwipeDirection::Backward));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(100.0);
        assert_eq!(swipe.moved(50.0), None);
        assert_eq!(swipe.moved(150.0), None);
        assert!(swipe.is_armed());
    }

    #[test]
    fn test_start_at_zero_is_armed() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(0.0);
        assert!(swipe.is_armed());
        assert_eq!(swipe.moved(60.0), Some(SwipeDirection::Backward));
    }

    #[test]
    fn test_moves_without_start_are_ignored() {
        let mut swipe = SwipeTracker::new(50.0);
        assert_eq!(swipe.moved(500.0), None);

        swipe.start(300.0);
        swipe.reset();
        assert_eq!(swipe.moved(0.0), None);
    }
}
