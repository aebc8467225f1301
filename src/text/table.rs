//! String interning table
//!
//! Shared immutable text values point at reference-counted storage. Interning
//! through a `StringTable` makes values created from equal text share one
//! allocation; the table itself holds one reference per entry.

use std::collections::HashSet;
use std::rc::Rc;

use log::trace;

/// Interning table for narrow and wide immutable text
#[derive(Debug, Default)]
pub struct StringTable {
    narrow: HashSet<Rc<str>>,
    wide: HashSet<Rc<[u16]>>,
}

impl StringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interned strings, narrow and wide together
    #[inline]
    pub fn count(&self) -> usize {
        self.narrow.len() + self.wide.len()
    }

    /// Shared storage holding `s`, created on first use
    pub fn intern(&mut self, s: &str) -> Rc<str> {
        if let Some(existing) = self.narrow.get(s) {
            return Rc::clone(existing);
        }
        let shared: Rc<str> = Rc::from(s);
        self.narrow.insert(Rc::clone(&shared));
        shared
    }

    /// Shared storage holding the wide text `units`, created on first use
    pub fn intern_wide(&mut self, units: &[u16]) -> Rc<[u16]> {
        if let Some(existing) = self.wide.get(units) {
            return Rc::clone(existing);
        }
        let shared: Rc<[u16]> = Rc::from(units);
        self.wide.insert(Rc::clone(&shared));
        shared
    }

    /// Drop entries that no value references any more
    ///
    /// Returns the number of entries removed.
    pub fn purge(&mut self) -> usize {
        let before = self.count();
        self.narrow.retain(|s| Rc::strong_count(s) > 1);
        self.wide.retain(|s| Rc::strong_count(s) > 1);
        let removed = before - self.count();
        trace!("purged {} unreferenced strings", removed);
        removed
    }
}
