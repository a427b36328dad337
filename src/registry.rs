use std::cell::RefCell;
use std::rc::Rc;

use crate::id::SubscriptionId;

pub(crate) type Callback<'a, T> = Rc<RefCell<dyn FnMut(&T) + 'a>>;

struct Entry<'a, T: ?Sized> {
    id: SubscriptionId,
    callback: Callback<'a, T>,
}

/// Ordered collection of callbacks owned by a single stream.
pub(crate) struct Registry<'a, T: ?Sized> {
    entries: Vec<Entry<'a, T>>,
}

impl<'a, T: ?Sized> Registry<'a, T> {
    pub fn new() -> Self {
        Registry { entries: Vec::new() }
    }

    pub fn add<F>(&mut self, func: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'a,
    {
        let id = SubscriptionId::next();
        let callback: Callback<'a, T> = Rc::new(RefCell::new(func));
        self.entries.push(Entry { id, callback });
        id
    }

    /// Removes the first entry with the given id and hands its callback back
    /// to the caller. Unknown ids are ignored.
    pub fn remove_first(&mut self, id: SubscriptionId) -> Option<Callback<'a, T>> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).callback)
    }

    /// Callbacks in subscription order, detached from the registry so that
    /// delivery can run without holding a borrow on it.
    pub fn snapshot(&self) -> Vec<Callback<'a, T>> {
        self.entries.iter().map(|entry| entry.callback.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Invokes every callback of a snapshot with `value`, in order.
///
/// A callback that is already running further up the stack (re-entrant
/// emission) is skipped rather than borrowed twice.
pub(crate) fn deliver<T: ?Sized>(snapshot: &[Callback<'_, T>], value: &T) {
    for callback in snapshot {
        if let Ok(mut func) = callback.try_borrow_mut() {
            (&mut *func)(value);
        }
    }
}
