use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::disposable::Disposable;
use crate::id::{StreamId, SubscriptionId};
use crate::registry::{deliver, Registry};

/// Capability of something that can be told to drop a subscription and pass
/// the removal further down a chain of derived streams.
///
/// Every [`Stream`] provides it for itself.
pub trait DependentRemovable<'a> {
    /// Registers a stream derived from this one. The registration does not
    /// keep `dependent` alive.
    fn add_dependent_removable(&self, dependent: Weak<dyn DependentRemovable<'a> + 'a>);

    /// Removes the subscription `id` (if present) and forwards the removal to
    /// every registered dependent.
    fn remove_subscription(&self, id: SubscriptionId);
}

/// Upstream edge of a derived stream: the source it reads from and the id of
/// the internal subscription feeding it.
struct ChainLink<'a> {
    source: Rc<dyn DependentRemovable<'a> + 'a>,
    subscription: SubscriptionId,
}

struct StreamInner<'a, T> {
    id: StreamId,
    registry: RefCell<Registry<'a, T>>,
    dependents: RefCell<Vec<Weak<dyn DependentRemovable<'a> + 'a>>>,
    links: RefCell<Vec<ChainLink<'a>>>,
}

impl<'a, T> StreamInner<'a, T> {
    fn new() -> Self {
        StreamInner {
            id: StreamId::next(),
            registry: RefCell::new(Registry::new()),
            dependents: RefCell::new(Vec::new()),
            links: RefCell::new(Vec::new()),
        }
    }

    fn emit(&self, value: &T) {
        let snapshot = {
            let registry = self.registry.borrow();
            if registry.is_empty() {
                return;
            }
            registry.snapshot()
        };
        deliver(&snapshot, value);
    }

    fn live_dependents(&self) -> Vec<Rc<dyn DependentRemovable<'a> + 'a>> {
        let mut dependents = self.dependents.borrow_mut();
        dependents.retain(|weak| weak.strong_count() > 0);
        dependents.iter().filter_map(Weak::upgrade).collect()
    }
}

impl<'a, T> DependentRemovable<'a> for StreamInner<'a, T> {
    fn add_dependent_removable(&self, dependent: Weak<dyn DependentRemovable<'a> + 'a>) {
        self.dependents.borrow_mut().push(dependent);
    }

    fn remove_subscription(&self, id: SubscriptionId) {
        // The removed callback may own the last handle to a stream derived
        // from this one, so it is dropped only after the registry borrow ends.
        let removed = self.registry.borrow_mut().remove_first(id);
        drop(removed);
        for dependent in self.live_dependents() {
            dependent.remove_subscription(id);
        }
    }
}

impl<'a, T> Drop for StreamInner<'a, T> {
    fn drop(&mut self) {
        for link in self.links.get_mut().drain(..) {
            trace!(stream = %self.id, subscription = %link.subscription, "chain link released");
            link.source.remove_subscription(link.subscription);
        }
    }
}

/// A push stream of values of type `T`.
///
/// `Stream` is a handle: clones share the same subscribers. Values enter a
/// root stream through its [`Publisher`](crate::Publisher); derived streams
/// are built with operators such as [`map`](Stream::map) and are fed by
/// their sources.
///
/// A derived stream keeps its sources alive, while sources only refer to
/// their derived streams weakly. Dropping the last handle to a derived stream
/// removes its internal subscriptions from all of its sources.
pub struct Stream<'a, T> {
    inner: Rc<StreamInner<'a, T>>,
}

impl<'a, T: 'a> Stream<'a, T> {
    pub(crate) fn new() -> Self {
        Stream { inner: Rc::new(StreamInner::new()) }
    }

    /// Identifier of this stream.
    pub fn id(&self) -> StreamId {
        self.inner.id
    }

    /// Number of callbacks currently registered on this stream, including
    /// the internal ones feeding derived streams.
    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Number of derived streams that are still alive.
    pub fn dependent_count(&self) -> usize {
        self.inner.live_dependents().len()
    }

    /// Registers `observer` and returns the handle that removes it again.
    ///
    /// The handle keeps this stream (and, through it, its whole upstream
    /// chain) alive until it is disposed.
    pub fn subscribe<O>(&self, observer: O) -> Disposable<'a>
    where
        O: FnMut(&T) + 'a,
    {
        let id = self.inner.registry.borrow_mut().add(observer);
        trace!(stream = %self.inner.id, subscription = %id, "subscribed");
        let target: Rc<dyn DependentRemovable<'a> + 'a> = self.inner.clone();
        Disposable::new(target, self.inner.id, id)
    }

    pub(crate) fn emit(&self, value: &T) {
        self.inner.emit(value);
    }

    /// Wires `self` (a freshly derived stream) to `source`.
    ///
    /// Adds one internal subscription on `source` that hands each value to
    /// `on_value` together with this stream, registers this stream as a
    /// dependent of `source`, and records the chain link so the subscription
    /// is removed once this stream is dropped.
    pub(crate) fn link_from<S, F>(&self, source: &Stream<'a, S>, mut on_value: F)
    where
        S: 'a,
        F: FnMut(&Stream<'a, T>, &S) + 'a,
    {
        let target = Rc::downgrade(&self.inner);
        let subscription = source.inner.registry.borrow_mut().add(move |value: &S| {
            if let Some(inner) = target.upgrade() {
                on_value(&Stream { inner }, value);
            }
        });
        let dependent: Weak<StreamInner<'a, T>> = Rc::downgrade(&self.inner);
        source.add_dependent_removable(dependent);
        let upstream: Rc<StreamInner<'a, S>> = Rc::clone(&source.inner);
        self.inner.links.borrow_mut().push(ChainLink { source: upstream, subscription });
        trace!(
            stream = %self.inner.id,
            source = %source.inner.id,
            subscription = %subscription,
            "chain link created"
        );
    }
}

impl<'a, T> DependentRemovable<'a> for Stream<'a, T> {
    fn add_dependent_removable(&self, dependent: Weak<dyn DependentRemovable<'a> + 'a>) {
        self.inner.add_dependent_removable(dependent);
    }

    fn remove_subscription(&self, id: SubscriptionId) {
        self.inner.remove_subscription(id);
    }
}

impl<'a, T> Clone for Stream<'a, T> {
    fn clone(&self) -> Self {
        Stream { inner: self.inner.clone() }
    }
}

impl<'a, T> fmt::Debug for Stream<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("id", &self.inner.id)
            .field("subscribers", &self.inner.registry.borrow().len())
            .field("links", &self.inner.links.borrow().len())
            .finish()
    }
}
