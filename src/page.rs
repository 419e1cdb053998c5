//! Page wiring - attaches every behavior to the page's elements
//!
//! Behaviors are independent: each owns its state behind an
//! `Rc<RefCell<_>>` and is reached only through the listeners registered
//! here. Nothing is shared between them.

use crate::binder::bind_all;
use crate::config::{PageConfig, Selectors};
use crate::debounce::Debouncer;
use crate::error::PageError;
use crate::event::{Event, EventHandler, EventKind};
use crate::header::ScrollHeader;
use crate::host::{EventTarget, Handler, Host, Lookup, SlideTrack};
use crate::nav::NavToggler;
use crate::slider::Slider;
use crate::suppress::InputSuppressor;
use anyhow::Result;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Everything the behaviors attach to, already looked up
pub struct PageElements<H: Host> {
    /// Receives key and context menu events
    pub document: H::Target,
    /// Receives scroll and resize events
    pub window: H::Target,
    pub body: H::Element,
    pub navbar: H::Element,
    pub nav_togglers: Vec<H::Element>,
    pub header: H::Element,
    pub back_top: H::Element,
    /// Slider root plus item container; receives touch events
    pub slider: H::Track,
    pub slider_prev: H::Element,
    pub slider_next: H::Element,
    pub scheduler: H::Scheduler,
}

fn missing(selector: &str) -> PageError {
    PageError::MissingElement {
        selector: selector.to_string(),
    }
}

impl<H: Host> PageElements<H> {
    /// Find every required element, failing on the first one missing
    ///
    /// At least one nav toggler must match. The error names the selector
    /// that found nothing.
    pub fn lookup<L: Lookup<Host = H>>(page: &L, selectors: &Selectors) -> Result<Self> {
        let require = |selector: &str| -> Result<H::Element> {
            Ok(page.query(selector)?.ok_or_else(|| missing(selector))?)
        };

        let body = page.body().ok_or_else(|| missing("body"))?;
        let navbar = require(&selectors.navbar)?;
        let nav_togglers = page.query_all(&selectors.nav_toggler)?;
        if nav_togglers.is_empty() {
            return Err(missing(&selectors.nav_toggler).into());
        }
        let header = require(&selectors.header)?;
        let back_top = require(&selectors.back_top)?;
        let slider = page.track(
            require(&selectors.slider)?,
            require(&selectors.slider_container)?,
        )?;
        let slider_prev = require(&selectors.slider_prev)?;
        let slider_next = require(&selectors.slider_next)?;

        Ok(PageElements {
            document: page.document(),
            window: page.window(),
            body,
            navbar,
            nav_togglers,
            header,
            back_top,
            slider,
            slider_prev,
            slider_next,
            scheduler: page.scheduler(),
        })
    }
}

/// Mounted behaviors
///
/// Listeners hold their own references, so dropping the `Page` does not
/// detach anything; it only gives up this view of the state.
pub struct Page<H: Host> {
    suppressor: Rc<RefCell<InputSuppressor>>,
    nav: Rc<RefCell<NavToggler<H::Element>>>,
    header: Rc<RefCell<ScrollHeader<H::Element>>>,
    slider: Rc<RefCell<Slider<H::Track>>>,
    resize: Rc<Debouncer<H::Scheduler>>,
}

/// Listener that forwards events to a shared behavior
fn forward<B: EventHandler + 'static>(behavior: &Rc<RefCell<B>>) -> Handler {
    let behavior = Rc::clone(behavior);
    Rc::new(move |event: &Event| behavior.borrow_mut().handle_event(event))
}

/// Listener that runs a slider action and logs its failure
fn slider_action<T: SlideTrack + 'static>(
    slider: &Rc<RefCell<Slider<T>>>,
    name: &'static str,
    action: fn(&mut Slider<T>) -> Result<()>,
) -> Handler {
    let slider = Rc::clone(slider);
    Rc::new(move |_: &Event| {
        if let Err(err) = action(&mut slider.borrow_mut()) {
            log::error!("slider {} failed: {:#}", name, err);
        }
        false
    })
}

impl<H: Host> Page<H> {
    /// Build every behavior and register its listeners
    pub fn wire(elements: PageElements<H>, config: &PageConfig) -> Result<Self> {
        let PageElements {
            document,
            window,
            body,
            navbar,
            nav_togglers,
            header,
            back_top,
            slider,
            slider_prev,
            slider_next,
            scheduler,
        } = elements;

        let suppressor = Rc::new(RefCell::new(InputSuppressor::new(
            config.blocked_keys.clone(),
        )));
        document.listen(EventKind::ContextMenu, forward(&suppressor))?;
        document.listen(EventKind::KeyDown, forward(&suppressor))?;

        let nav = Rc::new(RefCell::new(NavToggler::new(navbar, body, &config.classes)));
        bind_all(&nav_togglers, EventKind::Click, forward(&nav))?;

        let header = Rc::new(RefCell::new(ScrollHeader::new(
            header,
            back_top,
            config.classes.active.clone(),
            config.scroll_threshold,
        )));
        window.listen(EventKind::Scroll, forward(&header))?;

        let slider = Rc::new(RefCell::new(Slider::new(
            slider,
            config.visible_items_property.clone(),
            config.swipe_threshold,
        )?));
        {
            let s = slider.borrow();
            s.track().listen(EventKind::TouchStart, forward(&slider))?;
            s.track().listen(EventKind::TouchMove, forward(&slider))?;
        }
        slider_next.listen(
            EventKind::Click,
            slider_action(&slider, "advance", Slider::advance),
        )?;
        slider_prev.listen(
            EventKind::Click,
            slider_action(&slider, "retreat", Slider::retreat),
        )?;

        let resize = Rc::new(Debouncer::new(scheduler, config.resize_debounce));
        {
            let resize_ref = Rc::clone(&resize);
            let slider = Rc::clone(&slider);
            window.listen(
                EventKind::Resize,
                Rc::new(move |_: &Event| {
                    let slider = Rc::clone(&slider);
                    let scheduled = resize_ref.call(move || {
                        if let Err(err) = slider.borrow_mut().refresh() {
                            log::error!("slider refresh failed: {:#}", err);
                        }
                    });
                    if let Err(err) = scheduled {
                        log::error!("could not schedule slider refresh: {:#}", err);
                    }
                    false
                }),
            )?;
        }

        log::info!(
            "page behaviors mounted ({} nav togglers, {} slides)",
            nav_togglers.len(),
            slider.borrow().track().item_count()
        );

        Ok(Page {
            suppressor,
            nav,
            header,
            slider,
            resize,
        })
    }

    /// Input suppressor state
    pub fn suppressor(&self) -> Ref<'_, InputSuppressor> {
        self.suppressor.borrow()
    }

    /// Nav toggler state
    pub fn nav(&self) -> Ref<'_, NavToggler<H::Element>> {
        self.nav.borrow()
    }

    /// Scroll header state
    pub fn header(&self) -> Ref<'_, ScrollHeader<H::Element>> {
        self.header.borrow()
    }

    /// Slider state
    pub fn slider(&self) -> Ref<'_, Slider<H::Track>> {
        self.slider.borrow()
    }

    /// Drop any pending resize recomputation
    pub fn cancel_pending_resize(&self) {
        self.resize.cancel();
    }
}
