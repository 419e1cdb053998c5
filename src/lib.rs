//! pagewire - landing page behaviors compiled to WebAssembly
//!
//! Small, independent behaviors attached to a known page:
//! - Context menu and devtools shortcut suppression (cosmetic, not security)
//! - Mobile navigation toggle
//! - Header and back-to-top button that activate on scroll
//! - Manual slider with buttons, debounced resize and touch swipes
//!
//! Behaviors talk to the page only through the traits in [`host`]. The
//! `web` feature provides the DOM backend; [`headless`] is an in-memory
//! backend for tests and embedders.

pub mod binder;
pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod header;
pub mod headless;
pub mod host;
pub mod nav;
pub mod page;
pub mod slider;
pub mod suppress;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use binder::bind_all;
pub use config::{ClassNames, PageConfig, Selectors};
pub use debounce::Debouncer;
pub use error::PageError;
pub use event::{Event, EventHandler, EventKind, Key, KeyPress, Modifiers};
pub use header::ScrollHeader;
pub use host::{ClassList, EventTarget, Handler, Host, Lookup, Scheduler, SlideTrack};
pub use nav::NavToggler;
pub use page::{Page, PageElements};
pub use slider::{Slider, SwipeDirection, SwipeTracker};
pub use suppress::{InputSuppressor, KeyCombo};
#[cfg(feature = "web")]
pub use web::{mount, WebDocument, WebHost};
