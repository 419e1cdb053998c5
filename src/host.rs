//! Host abstraction - the seams between behaviors and the page they run in
//!
//! Behaviors never touch the DOM directly. They see elements through
//! [`ClassList`] and [`EventTarget`], the slider sees its layout through
//! [`SlideTrack`], and timers go through a [`Scheduler`]. The browser backend
//! lives in `web`; an in-memory backend lives in `headless`.

use crate::event::{Event, EventKind};
use anyhow::Result;
use std::rc::Rc;
use std::time::Duration;

/// Shared event callback. Returning true marks the event as consumed.
pub type Handler = Rc<dyn Fn(&Event) -> bool>;

/// Something listeners can be attached to (element, document, window)
pub trait EventTarget {
    /// Register `handler` for every event of `kind` delivered to this target
    fn listen(&self, kind: EventKind, handler: Handler) -> Result<()>;
}

/// Class presence on an element
pub trait ClassList {
    fn add_class(&self, name: &str) -> Result<()>;

    fn remove_class(&self, name: &str) -> Result<()>;

    /// Flip the class, returning whether it is present afterwards
    fn toggle_class(&self, name: &str) -> Result<bool>;

    fn has_class(&self, name: &str) -> bool;

    /// Add or remove depending on `on`
    fn set_class(&self, name: &str, on: bool) -> Result<()> {
        if on {
            self.add_class(name)
        } else {
            self.remove_class(name)
        }
    }
}

/// Live layout of a slider: root element plus its item container
pub trait SlideTrack {
    /// Raw value of a custom style property on the slider root
    fn style_property(&self, name: &str) -> Result<String>;

    /// Number of items in the container
    fn item_count(&self) -> usize;

    /// Left offset of an item in pixels, read from current layout
    fn item_offset(&self, index: usize) -> Option<f64>;

    /// Translate the container left by `offset` pixels
    fn shift_to(&self, offset: f64) -> Result<()>;
}

/// Deferred task execution
pub trait Scheduler {
    /// Token used to cancel a scheduled task
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<Self::Handle>;

    /// Cancel a task; cancelling one that already ran is a no-op
    fn cancel(&self, handle: Self::Handle);
}

/// Bundle of concrete types a page backend provides
pub trait Host {
    /// Document and window
    type Target: EventTarget;
    type Element: ClassList + EventTarget + Clone + 'static;
    type Track: SlideTrack + EventTarget + 'static;
    type Scheduler: Scheduler + 'static;
}

/// Element lookup on a live page, used to assemble `PageElements`
///
/// Queries return `Ok(None)` or an empty list when nothing matches; deciding
/// which elements are required is left to the caller.
pub trait Lookup {
    type Host: Host;

    /// Target for key and context menu events
    fn document(&self) -> <Self::Host as Host>::Target;

    /// Target for scroll and resize events
    fn window(&self) -> <Self::Host as Host>::Target;

    fn body(&self) -> Option<<Self::Host as Host>::Element>;

    /// First element matching `selector`
    fn query(&self, selector: &str) -> Result<Option<<Self::Host as Host>::Element>>;

    /// Every element matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Result<Vec<<Self::Host as Host>::Element>>;

    /// Combine the slider root and its item container into a track
    fn track(
        &self,
        root: <Self::Host as Host>::Element,
        container: <Self::Host as Host>::Element,
    ) -> Result<<Self::Host as Host>::Track>;

    fn scheduler(&self) -> <Self::Host as Host>::Scheduler;
}
