use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Single-threaded observable cell owned by one animation-domain graph.
///
/// Clones share the same storage. Readers that need change notification
/// pair the cell with a [`Reaction`](crate::Reaction) instead of callbacks,
/// so a write never re-enters anything.
pub struct MutableState<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    /// Read-only view sharing this cell's storage.
    pub fn as_state(&self) -> State<T> {
        State {
            inner: self.clone(),
        }
    }
}

impl<T: Clone> MutableState<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableState")
            .field(&*self.inner.borrow())
            .finish()
    }
}

/// Read-only handle to a [`MutableState`].
pub struct State<T> {
    inner: MutableState<T>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> State<T> {
    pub fn get(&self) -> T {
        self.inner.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&self.inner).finish()
    }
}
