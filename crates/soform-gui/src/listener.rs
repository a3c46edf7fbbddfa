//! Listener registration for view and form events
//!
//! Listeners are plain closures stored under a numeric ID so they can be
//! removed again. They fire in registration order.

use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Create a listener ID from a raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Registry of listeners for events of type `E`
pub struct ListenerRegistry<E> {
    listeners: BTreeMap<ListenerId, Box<dyn Fn(&E)>>,
    next_id: u64,
}

impl<E> ListenerRegistry<E> {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Register a listener and return its ID
    pub fn register(&mut self, listener: impl Fn(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Check if a listener exists
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Deliver `event` to every listener
    pub fn fire(&self, event: &E) {
        for listener in self.listeners.values() {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove all listeners
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("ids", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_register_and_fire_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::<i32>::new();
        let s1 = Rc::clone(&seen);
        let first = registry.register(move |e| s1.borrow_mut().push(("a", *e)));
        let s2 = Rc::clone(&seen);
        registry.register(move |e| s2.borrow_mut().push(("b", *e)));

        assert_eq!(first.raw(), 1);
        registry.fire(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unregister() {
        let mut registry = ListenerRegistry::<()>::new();
        let id = registry.register(|()| {});
        assert!(registry.contains(id));
        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert!(registry.is_empty());
    }
}
