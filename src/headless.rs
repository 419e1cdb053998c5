//! Headless host - an in-memory page for tests and non-browser embedders
//!
//! Elements keep a class set and a listener registry; `dispatch` delivers an
//! event to every matching listener in registration order. The slide track
//! lays items out at a fixed width that can be changed to simulate a
//! resize, and [`ManualScheduler`] runs timers on a virtual clock.
//! [`HeadlessDocument`] answers selector lookups from a table filled in with
//! `insert`.

use crate::event::{Event, EventKind};
use crate::host::{ClassList, EventTarget, Handler, Host, Lookup, Scheduler, SlideTrack};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Marker for the in-memory backend
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl Host for HeadlessHost {
    type Target = HeadlessElement;
    type Element = HeadlessElement;
    type Track = HeadlessTrack;
    type Scheduler = ManualScheduler;
}

#[derive(Clone, Default)]
struct Listeners(Rc<RefCell<Vec<(EventKind, Handler)>>>);

impl Listeners {
    fn add(&self, kind: EventKind, handler: Handler) {
        self.0.borrow_mut().push((kind, handler));
    }

    fn count(&self, kind: EventKind) -> usize {
        self.0.borrow().iter().filter(|(k, _)| *k == kind).count()
    }

    /// Every matching listener runs; true if any of them consumed the event
    fn dispatch(&self, event: &Event) -> bool {
        // Clone out so handlers may register more listeners
        let handlers: Vec<Handler> = self
            .0
            .borrow()
            .iter()
            .filter(|(k, _)| *k == event.kind())
            .map(|(_, h)| Rc::clone(h))
            .collect();

        let mut consumed = false;
        for handler in handlers {
            consumed |= handler(event);
        }
        consumed
    }
}

/// Element with a class set and listeners; clones share state
#[derive(Clone, Default)]
pub struct HeadlessElement {
    name: Rc<str>,
    classes: Rc<RefCell<BTreeSet<String>>>,
    listeners: Listeners,
}

impl HeadlessElement {
    /// Element with no classes or listeners; `name` only shows up in debug output
    pub fn new(name: &str) -> Self {
        HeadlessElement {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name given at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deliver an event; returns true if a listener consumed it
    pub fn dispatch(&self, event: &Event) -> bool {
        self.listeners.dispatch(event)
    }

    /// Listeners registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.count(kind)
    }

    /// Current classes, sorted
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }
}

impl fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessElement")
            .field("name", &self.name)
            .field("classes", &self.classes.borrow())
            .finish()
    }
}

impl EventTarget for HeadlessElement {
    fn listen(&self, kind: EventKind, handler: Handler) -> Result<()> {
        self.listeners.add(kind, handler);
        Ok(())
    }
}

impl ClassList for HeadlessElement {
    fn add_class(&self, name: &str) -> Result<()> {
        self.classes.borrow_mut().insert(name.to_string());
        Ok(())
    }

    fn remove_class(&self, name: &str) -> Result<()> {
        self.classes.borrow_mut().remove(name);
        Ok(())
    }

    fn toggle_class(&self, name: &str) -> Result<bool> {
        let mut classes = self.classes.borrow_mut();
        if classes.remove(name) {
            Ok(false)
        } else {
            classes.insert(name.to_string());
            Ok(true)
        }
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.borrow().contains(name)
    }
}

#[derive(Debug)]
struct TrackState {
    style_value: String,
    items: usize,
    item_width: f64,
    offset: Option<f64>,
    shifts: usize,
}

/// Slider track with evenly sized items laid out left to right
#[derive(Clone)]
pub struct HeadlessTrack {
    state: Rc<RefCell<TrackState>>,
    listeners: Listeners,
}

impl HeadlessTrack {
    /// `items` children of `item_width` pixels, `visible` of them on screen
    pub fn new(items: usize, visible: usize, item_width: f64) -> Self {
        HeadlessTrack {
            state: Rc::new(RefCell::new(TrackState {
                style_value: format!(" {}", visible),
                items,
                item_width,
                offset: None,
                shifts: 0,
            })),
            listeners: Listeners::default(),
        }
    }

    /// Simulate a breakpoint change: new visible count and item width
    pub fn set_layout(&self, visible: usize, item_width: f64) {
        let mut state = self.state.borrow_mut();
        state.style_value = visible.to_string();
        state.item_width = item_width;
    }

    /// Simulate items being added or removed from the container
    pub fn set_item_count(&self, items: usize) {
        self.state.borrow_mut().items = items;
    }

    /// Set the raw style property value verbatim
    pub fn set_style_value(&self, value: &str) {
        self.state.borrow_mut().style_value = value.to_string();
    }

    /// Last offset applied by `shift_to`, if any
    pub fn offset(&self) -> Option<f64> {
        self.state.borrow().offset
    }

    /// Number of `shift_to` calls so far
    pub fn shift_count(&self) -> usize {
        self.state.borrow().shifts
    }

    /// Deliver an event to the container's listeners
    pub fn dispatch(&self, event: &Event) -> bool {
        self.listeners.dispatch(event)
    }
}

impl fmt::Debug for HeadlessTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessTrack")
            .field("state", &self.state.borrow())
            .finish()
    }
}

impl EventTarget for HeadlessTrack {
    fn listen(&self, kind: EventKind, handler: Handler) -> Result<()> {
        self.listeners.add(kind, handler);
        Ok(())
    }
}

impl SlideTrack for HeadlessTrack {
    fn style_property(&self, _name: &str) -> Result<String> {
        Ok(self.state.borrow().style_value.clone())
    }

    fn item_count(&self) -> usize {
        self.state.borrow().items
    }

    fn item_offset(&self, index: usize) -> Option<f64> {
        let state = self.state.borrow();
        (index < state.items).then(|| index as f64 * state.item_width)
    }

    fn shift_to(&self, offset: f64) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.offset = Some(offset);
        state.shifts += 1;
        Ok(())
    }
}

struct PendingTask {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    tasks: Vec<PendingTask>,
}

/// Scheduler driven by a virtual clock; clones share the clock
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    /// Scheduler with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Tasks scheduled and not yet run or cancelled
    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }

    /// Move the clock forward, running every task that becomes due in order
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                due.map(|i| {
                    let task = clock.tasks.remove(i);
                    clock.now = task.due;
                    task
                })
            };
            match next {
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.tasks.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<u64> {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.tasks.push(PendingTask { id, due, task });
        Ok(id)
    }

    fn cancel(&self, handle: u64) {
        self.clock.borrow_mut().tasks.retain(|t| t.id != handle);
    }
}

/// Page whose selector lookups are answered from an in-memory table
///
/// The slider track is supplied up front and stands in for whatever root
/// and container elements the lookup finds. Clones share the table.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    document: HeadlessElement,
    window: HeadlessElement,
    body: HeadlessElement,
    track: HeadlessTrack,
    scheduler: ManualScheduler,
    elements: Rc<RefCell<BTreeMap<String, Vec<HeadlessElement>>>>,
}

impl HeadlessDocument {
    /// Empty page over `track`; only the body exists until elements are inserted
    pub fn new(track: HeadlessTrack) -> Self {
        HeadlessDocument {
            document: HeadlessElement::new("document"),
            window: HeadlessElement::new("window"),
            body: HeadlessElement::new("body"),
            track,
            scheduler: ManualScheduler::new(),
            elements: Rc::default(),
        }
    }

    /// Make `element` match `selector`, after any elements already matching it
    pub fn insert(&self, selector: &str, element: HeadlessElement) {
        self.elements
            .borrow_mut()
            .entry(selector.to_string())
            .or_default()
            .push(element);
    }

    /// Drop every element matching `selector`
    pub fn remove(&self, selector: &str) {
        self.elements.borrow_mut().remove(selector);
    }

    /// The track handed out by lookups
    pub fn slide_track(&self) -> &HeadlessTrack {
        &self.track
    }
}

impl Lookup for HeadlessDocument {
    type Host = HeadlessHost;

    fn document(&self) -> HeadlessElement {
        self.document.clone()
    }

    fn window(&self) -> HeadlessElement {
        self.window.clone()
    }

    fn body(&self) -> Option<HeadlessElement> {
        Some(self.body.clone())
    }

    fn query(&self, selector: &str) -> Result<Option<HeadlessElement>> {
        Ok(self
            .elements
            .borrow()
            .get(selector)
            .and_then(|found| found.first().cloned()))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<HeadlessElement>> {
        Ok(self
            .elements
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    fn track(&self, _root: HeadlessElement, _container: HeadlessElement) -> Result<HeadlessTrack> {
        Ok(self.track.clone())
    }

    fn scheduler(&self) -> ManualScheduler {
        self.scheduler.clone()
    }
}
