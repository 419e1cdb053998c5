//! Input suppression - swallows the context menu and devtools shortcuts
//!
//! This is cosmetic. It is NOT a security boundary: anyone can open the
//! browser menu, disable scripts, or view the page source another way.
//! Nothing served to the page should rely on these shortcuts being blocked.

use crate::event::{Event, EventHandler, Key, KeyPress, Modifiers};

/// A key plus the modifiers that must be held for it to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a combo for `key` with the given required modifiers
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        KeyCombo { key, modifiers }
    }

    /// Extra held modifiers do not prevent a match
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key == self.key && press.modifiers.contains(self.modifiers)
    }
}

/// Cancels context menu requests and blocked key combinations
#[derive(Debug, Clone, Default)]
pub struct InputSuppressor {
    blocked: Vec<KeyCombo>,
}

impl InputSuppressor {
    /// Create a suppressor for the given combinations
    pub fn new(blocked: Vec<KeyCombo>) -> Self {
        InputSuppressor { blocked }
    }

    /// Configured combinations
    pub fn blocked(&self) -> &[KeyCombo] {
        &self.blocked
    }

    /// Check whether a key press should be swallowed
    pub fn blocks(&self, press: &KeyPress) -> bool {
        self.blocked.iter().any(|combo| combo.matches(press))
    }
}

impl EventHandler for InputSuppressor {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::ContextMenu => true,
            Event::Key(press) => {
                let blocked = self.blocks(press);
                if blocked {
                    log::debug!("suppressed key press {:?}", press);
                }
                blocked
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_blocked_keys;
    use crate::event::convert_key;

    fn suppressor() -> InputSuppressor {
        InputSuppressor::new(default_blocked_keys())
    }

    #[test]
    fn test_context_menu_always_consumed() {
        let mut s = InputSuppressor::new(Vec::new());
        assert!(s.handle_event(&Event::ContextMenu));
    }

    #[test]
    fn test_blocked_combinations() {
        let mut s = suppressor();
        let cases = [
            KeyPress::plain(Key::F(12)),
            KeyPress::new(Key::F(12), Modifiers::CTRL),
            KeyPress::new(Key::Char('i'), Modifiers::CTRL_SHIFT),
            KeyPress::new(Key::Char('j'), Modifiers::CTRL_SHIFT),
            KeyPress::new(Key::Char('u'), Modifiers::CTRL),
            KeyPress::new(Key::Char('u'), Modifiers::CTRL_SHIFT),
        ];
        for press in cases {
            assert!(s.handle_event(&Event::Key(press)), "{:?} should be blocked", press);
        }
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut s = suppressor();
        let cases = [
            KeyPress::plain(Key::F(11)),
            KeyPress::plain(Key::Char('i')),
            KeyPress::new(Key::Char('i'), Modifiers::CTRL),
            KeyPress::new(Key::Char('j'), Modifiers::CTRL),
            KeyPress::plain(Key::Char('u')),
            KeyPress::new(Key::Char('c'), Modifiers::CTRL),
            KeyPress::plain(Key::Null),
        ];
        for press in cases {
            assert!(!s.handle_event(&Event::Key(press)), "{:?} should pass", press);
        }
    }

    #[test]
    fn test_blocks_by_physical_key_on_other_layouts() {
        let s = suppressor();
        let inspect = KeyPress::new(convert_key("Ш", "KeyI"), Modifiers::CTRL_SHIFT);
        let console = KeyPress::new(convert_key("О", "KeyJ"), Modifiers::CTRL_SHIFT);
        let source = KeyPress::new(convert_key("г", "KeyU"), Modifiers::CTRL);
        assert!(s.blocks(&inspect));
        assert!(s.blocks(&console));
        assert!(s.blocks(&source));
    }

    #[test]
    fn test_ignores_unrelated_events() {
        let mut s = suppressor();
        assert!(!s.handle_event(&Event::Click));
        assert!(!s.handle_event(&Event::Scroll { offset_y: 500.0 }));
    }
}
