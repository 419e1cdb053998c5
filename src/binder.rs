//! Batch listener binding

use crate::event::EventKind;
use crate::host::{EventTarget, Handler};
use anyhow::Result;
use std::rc::Rc;

/// Attach one handler for `kind` to every target, independently and in order
///
/// An empty slice binds nothing.
pub fn bind_all<T: EventTarget>(targets: &[T], kind: EventKind, handler: Handler) -> Result<()> {
    for target in targets {
        target.listen(kind, Rc::clone(&handler))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::headless::HeadlessElement;
    use std::cell::Cell;

    fn counting_handler(count: &Rc<Cell<usize>>) -> Handler {
        let count = Rc::clone(count);
        Rc::new(move |_: &Event| {
            count.set(count.get() + 1);
            false
        })
    }

    #[test]
    fn test_binds_each_element() {
        let buttons: Vec<_> = (0..3)
            .map(|i| HeadlessElement::new(&format!("toggler{}", i)))
            .collect();
        let count = Rc::new(Cell::new(0));

        bind_all(&buttons, EventKind::Click, counting_handler(&count)).unwrap();

        for button in &buttons {
            assert_eq!(button.listener_count(EventKind::Click), 1);
            button.dispatch(&Event::Click);
        }
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_empty_collection_is_noop() {
        let count = Rc::new(Cell::new(0));
        let none: Vec<HeadlessElement> = Vec::new();
        bind_all(&none, EventKind::Click, counting_handler(&count)).unwrap();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_only_requested_kind_is_bound() {
        let button = HeadlessElement::new("toggler");
        let count = Rc::new(Cell::new(0));
        bind_all(
            std::slice::from_ref(&button),
            EventKind::Click,
            counting_handler(&count),
        )
        .unwrap();

        button.dispatch(&Event::TouchStart { x: 1.0 });
        assert_eq!(count.get(), 0);
        assert_eq!(button.listener_count(EventKind::TouchStart), 0);
    }
}
