//! Mobile navigation toggle

use crate::config::ClassNames;
use crate::event::{Event, EventHandler};
use crate::host::ClassList;
use anyhow::Result;

/// Opens and closes the navbar, mirroring the state onto the body
///
/// Every toggler control shares one `NavToggler`, so they all drive the same
/// state. Navbar and body classes flip together on each activation.
#[derive(Debug, Clone)]
pub struct NavToggler<E> {
    navbar: E,
    body: E,
    open_class: String,
    body_class: String,
}

impl<E: ClassList> NavToggler<E> {
    /// Toggler over the navbar and body classes
    pub fn new(navbar: E, body: E, classes: &ClassNames) -> Self {
        NavToggler {
            navbar,
            body,
            open_class: classes.active.clone(),
            body_class: classes.nav_open.clone(),
        }
    }

    /// Flip both classes, returning whether the navbar is now open
    pub fn toggle(&mut self) -> Result<bool> {
        let open = self.navbar.toggle_class(&self.open_class)?;
        self.body.toggle_class(&self.body_class)?;
        log::debug!("navbar {}", if open { "opened" } else { "closed" });
        Ok(open)
    }

    /// Read back from the navbar element
    pub fn is_open(&self) -> bool {
        self.navbar.has_class(&self.open_class)
    }
}

impl<E: ClassList> EventHandler for NavToggler<E> {
    fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Click = event {
            if let Err(err) = self.toggle() {
                log::error!("nav toggle failed: {:#}", err);
            }
        }
        false
    }
}
