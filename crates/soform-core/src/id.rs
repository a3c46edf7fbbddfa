//! Process-scoped identifier generation
//!
//! Anonymous fields, widgets and listeners need identifiers that are unique
//! within one application. The generator is passed around explicitly
//! (usually behind an `Rc`) rather than living in a global.

use std::cell::Cell;

/// Monotonic identifier source, starting at 1
#[derive(Debug)]
pub struct IdGenerator {
    next: Cell<u64>,
}

impl IdGenerator {
    /// Create a new generator
    #[must_use]
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Take the next identifier
    pub fn next_id(&self) -> u64 {
        let id = self.next.get();
        self.next.set(id + 1);
        id
    }

    /// Name given to a field that was added without one
    pub fn anonymous_name(&self) -> String {
        format!("_{}", self.next_id())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
