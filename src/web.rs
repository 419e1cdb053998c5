//! Browser backend - binds behaviors to the live DOM through web-sys
//!
//! `mount` looks up every required element through [`WebDocument`] up front
//! and fails on the first missing one, naming its selector. Listeners registered here live for the
//! lifetime of the page.

use crate::config::PageConfig;
use crate::error::PageError;
use crate::event::{convert_key, Event, EventKind, KeyPress, Modifiers};
use crate::host::{ClassList, EventTarget, Handler, Host, Lookup, Scheduler, SlideTrack};
use crate::page::{Page, PageElements};
use anyhow::Result;
use std::fmt;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, TouchEvent, Window};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Marker for the DOM backend
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHost;

impl Host for WebHost {
    type Target = WebTarget;
    type Element = WebElement;
    type Track = WebTrack;
    type Scheduler = TimeoutScheduler;
}

fn dom_error(context: &'static str, value: JsValue) -> PageError {
    PageError::Dom {
        context,
        message: format!("{:?}", value),
    }
}

/// CSS transform that moves the slider container left by `offset` pixels
pub fn transform_value(offset: f64) -> String {
    format!("translateX(-{}px)", offset)
}

/// Translate a raw DOM event into our Event type
fn convert_event(kind: EventKind, event: &web_sys::Event) -> Option<Event> {
    match kind {
        EventKind::KeyDown => event.dyn_ref::<KeyboardEvent>().map(|e| {
            let modifiers = Modifiers {
                ctrl: e.ctrl_key(),
                shift: e.shift_key(),
                alt: e.alt_key(),
                meta: e.meta_key(),
            };
            Event::Key(KeyPress::new(convert_key(&e.key(), &e.code()), modifiers))
        }),
        EventKind::ContextMenu => Some(Event::ContextMenu),
        EventKind::Click => Some(Event::Click),
        EventKind::Scroll => web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .map(|offset_y| Event::Scroll { offset_y }),
        EventKind::Resize => Some(Event::Resize),
        EventKind::TouchStart => first_touch_x(event).map(|x| Event::TouchStart { x }),
        EventKind::TouchMove => first_touch_x(event).map(|x| Event::TouchMove { x }),
    }
}

fn first_touch_x(event: &web_sys::Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn add_listener(target: &web_sys::EventTarget, kind: EventKind, handler: Handler) -> Result<()> {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
        if let Some(event) = convert_event(kind, &raw) {
            if handler(&event) {
                raw.prevent_default();
            }
        }
    });
    target
        .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
        .map_err(|e| dom_error("adding listener", e))?;
    // Page-lifetime listener, never removed
    callback.forget();
    Ok(())
}

/// Document or window
#[derive(Debug, Clone)]
pub struct WebTarget(web_sys::EventTarget);

impl EventTarget for WebTarget {
    fn listen(&self, kind: EventKind, handler: Handler) -> Result<()> {
        add_listener(&self.0, kind, handler)
    }
}

/// DOM element with class and listener access
#[derive(Debug, Clone)]
pub struct WebElement(Element);

impl WebElement {
    /// Wrap a DOM element
    pub fn new(element: Element) -> Self {
        WebElement(element)
    }
}

impl EventTarget for WebElement {
    fn listen(&self, kind: EventKind, handler: Handler) -> Result<()> {
        add_listener(&self.0, kind, handler)
    }
}

impl ClassList for WebElement {
    fn add_class(&self, name: &str) -> Result<()> {
        self.0
            .class_list()
            .add_1(name)
            .map_err(|e| dom_error("adding class", e))?;
        Ok(())
    }

    fn remove_class(&self, name: &str) -> Result<()> {
        self.0
            .class_list()
            .remove_1(name)
            .map_err(|e| dom_error("removing class", e))?;
        Ok(())
    }

    fn toggle_class(&self, name: &str) -> Result<bool> {
        Ok(self
            .0
            .class_list()
            .toggle(name)
            .map_err(|e| dom_error("toggling class", e))?)
    }

    fn has_class(&self, name: &str) -> bool {
        self.0.class_list().contains(name)
    }
}

/// Slider root (style source) and item container (layout and transform)
#[derive(Debug, Clone)]
pub struct WebTrack {
    window: Window,
    root: Element,
    container: HtmlElement,
}

impl EventTarget for WebTrack {
    fn listen(&self, kind: EventKind, handler: Handler) -> Result<()> {
        add_listener(&self.container, kind, handler)
    }
}

impl SlideTrack for WebTrack {
    fn style_property(&self, name: &str) -> Result<String> {
        let style = self
            .window
            .get_computed_style(&self.root)
            .map_err(|e| dom_error("reading computed style", e))?
            .ok_or_else(|| PageError::Dom {
                context: "reading computed style",
                message: "no style declaration for slider".into(),
            })?;
        Ok(style
            .get_property_value(name)
            .map_err(|e| dom_error("reading style property", e))?)
    }

    fn item_count(&self) -> usize {
        self.container.child_element_count() as usize
    }

    fn item_offset(&self, index: usize) -> Option<f64> {
        let item = self.container.children().item(u32::try_from(index).ok()?)?;
        let item = item.dyn_into::<HtmlElement>().ok()?;
        Some(f64::from(item.offset_left()))
    }

    fn shift_to(&self, offset: f64) -> Result<()> {
        self.container
            .style()
            .set_property("transform", &transform_value(offset))
            .map_err(|e| dom_error("setting slider transform", e))?;
        Ok(())
    }
}

/// Pending `setTimeout`; owns its callback so cancelling frees it
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl fmt::Debug for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeout").field("id", &self.id).finish()
    }
}

/// `setTimeout` / `clearTimeout` on the window
#[derive(Debug, Clone)]
pub struct TimeoutScheduler {
    window: Window,
}

impl TimeoutScheduler {
    /// Schedule on `window`'s timers
    pub fn new(window: Window) -> Self {
        TimeoutScheduler { window }
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<Timeout> {
        let callback = Closure::once(task);
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|e| dom_error("scheduling timeout", e))?;
        Ok(Timeout {
            id,
            _callback: callback,
        })
    }

    fn cancel(&self, handle: Timeout) {
        self.window.clear_timeout_with_handle(handle.id);
    }
}

/// The live document and its window
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    /// The global window and its document
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(WebDocument { window, document })
    }
}

impl Lookup for WebDocument {
    type Host = WebHost;

    fn document(&self) -> WebTarget {
        WebTarget(self.document.clone().into())
    }

    fn window(&self) -> WebTarget {
        WebTarget(self.window.clone().into())
    }

    fn body(&self) -> Option<WebElement> {
        self.document.body().map(|body| WebElement(body.into()))
    }

    fn query(&self, selector: &str) -> Result<Option<WebElement>> {
        let found = self
            .document
            .query_selector(selector)
            .map_err(|e| dom_error("querying selector", e))?;
        Ok(found.map(WebElement))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<WebElement>> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| dom_error("querying selector", e))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebElement)
            .collect())
    }

    fn track(&self, root: WebElement, container: WebElement) -> Result<WebTrack> {
        let container = container
            .0
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::Dom {
                context: "reading slider container",
                message: "not an HTML element".into(),
            })?;
        Ok(WebTrack {
            window: self.window.clone(),
            root: root.0,
            container,
        })
    }

    fn scheduler(&self) -> TimeoutScheduler {
        TimeoutScheduler::new(self.window.clone())
    }
}

/// Look up the page's elements and attach every behavior
pub fn mount(config: &PageConfig) -> Result<Page<WebHost>> {
    let document = WebDocument::new()?;
    let elements = PageElements::lookup(&document, &config.selectors)?;
    Page::wire(elements, config)
}

/// Wasm entry point: mount with the default page contract
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Keeps the first logger if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);

    mount(&PageConfig::default()).map(drop).map_err(|err| {
        log::error!("mount failed: {:#}", err);
        JsValue::from_str(&format!("{:#}", err))
    })
}
