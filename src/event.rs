//! Event system - keyboard, pointer, scroll and touch events delivered by the page

/// Keyboard key representation
///
/// Letters are always stored lowercase so that `Ctrl+Shift+I` and `Ctrl+i`
/// compare against the same `Key::Char('i')`. Keys no behavior cares about
/// collapse to `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Null,
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    /// True when every modifier set in `other` is also set in `self`
    pub fn contains(self, other: Modifiers) -> bool {
        (!other.ctrl || self.ctrl)
            && (!other.shift || self.shift)
            && (!other.alt || self.alt)
            && (!other.meta || self.meta)
    }
}

/// A key together with the modifiers held when it went down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Key press with the given modifiers held
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        KeyPress { key, modifiers }
    }

    /// Key press without modifiers
    pub fn plain(key: Key) -> Self {
        KeyPress::new(key, Modifiers::NONE)
    }
}

/// Kinds of events a behavior can listen for
///
/// Each kind maps onto exactly one DOM event type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    ContextMenu,
    Click,
    Scroll,
    Resize,
    TouchStart,
    TouchMove,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::KeyDown => "keydown",
            EventKind::ContextMenu => "contextmenu",
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
        }
    }
}

/// Page events, already stripped down to the data behaviors need
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Key went down
    Key(KeyPress),
    /// Context menu requested (right click, menu key, long press)
    ContextMenu,
    /// Element activated
    Click,
    /// Window scrolled; carries the vertical scroll offset at dispatch time
    Scroll { offset_y: f64 },
    /// Viewport resized
    Resize,
    /// First touch point went down at client X
    TouchStart { x: f64 },
    /// First touch point moved to client X
    TouchMove { x: f64 },
}

impl Event {
    /// Kind used to route this event to listeners
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Key(_) => EventKind::KeyDown,
            Event::ContextMenu => EventKind::ContextMenu,
            Event::Click => EventKind::Click,
            Event::Scroll { .. } => EventKind::Scroll,
            Event::Resize => EventKind::Resize,
            Event::TouchStart { .. } => EventKind::TouchStart,
            Event::TouchMove { .. } => EventKind::TouchMove,
        }
    }
}

/// Event handler trait for behaviors
pub trait EventHandler {
    /// Handle an event, return true if consumed (the host cancels the default action)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}

/// Convert a DOM `KeyboardEvent.code` (physical key position) to our Key type
///
/// Only letters, digits and function keys are recognized.
pub fn convert_code(code: &str) -> Key {
    let single = |rest: &str| {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    };

    if let Some(c) = code.strip_prefix("Key").and_then(single) {
        if c.is_ascii_alphabetic() {
            return Key::Char(c.to_ascii_lowercase());
        }
    }
    if let Some(c) = code.strip_prefix("Digit").and_then(single) {
        if c.is_ascii_digit() {
            return Key::Char(c);
        }
    }
    function_key(code).unwrap_or(Key::Null)
}

fn function_key(name: &str) -> Option<Key> {
    name.strip_prefix('F')
        .and_then(|n| n.parse::<u8>().ok())
        .map(Key::F)
}

/// Convert a DOM keydown to our Key type
///
/// The physical `code` wins whenever it names a letter, digit or function
/// key, so shortcuts match the same keys on every keyboard layout. The
/// printed `key` is the fallback for everything else.
pub fn convert_key(key: &str, code: &str) -> Key {
    match convert_code(code) {
        Key::Null => convert_printed(key),
        physical => physical,
    }
}

fn convert_printed(key: &str) -> Key {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Key::Char(c.to_lowercase().next().unwrap_or(c));
    }
    function_key(key).unwrap_or(Key::Null)
}
