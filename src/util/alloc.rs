//! Element types for checking how the collections treat the values they hold.

use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;

/// An element type that never occupies memory, so buffers holding it never allocate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedType;

/// An element which bumps a shared counter when dropped. Clones share the same counter, so
/// the number of drops across a whole collection can be checked with [`Cell::take`].
#[derive(Debug, Clone)]
pub struct CountedDrop(Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new(start: usize) -> CountedDrop {
        CountedDrop(Rc::new(Cell::new(start)))
    }
}

impl Deref for CountedDrop {
    type Target = Cell<usize>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
