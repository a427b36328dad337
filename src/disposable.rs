use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::id::{StreamId, SubscriptionId};
use crate::stream::DependentRemovable;

/// Handle that removes exactly one subscription from the stream it was
/// created on.
///
/// Until it is disposed the handle keeps its stream alive. Disposing more
/// than once is a no-op.
#[must_use = "dropping a Disposable releases the stream it keeps alive"]
pub struct Disposable<'a> {
    target: Option<Rc<dyn DependentRemovable<'a> + 'a>>,
    stream: StreamId,
    id: SubscriptionId,
}

impl<'a> Disposable<'a> {
    pub(crate) fn new(
        target: Rc<dyn DependentRemovable<'a> + 'a>,
        stream: StreamId,
        id: SubscriptionId,
    ) -> Self {
        Disposable { target: Some(target), stream, id }
    }

    /// Id of the stream the subscription lives on.
    pub fn stream_id(&self) -> StreamId {
        self.stream
    }

    /// Id of the subscription this handle removes.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether [`dispose`](Disposable::dispose) has already run.
    pub fn is_disposed(&self) -> bool {
        self.target.is_none()
    }

    /// Removes the subscription and releases the stream.
    pub fn dispose(&mut self) {
        if let Some(target) = self.target.take() {
            trace!(stream = %self.stream, subscription = %self.id, "disposed");
            target.remove_subscription(self.id);
        }
    }

    /// Hands this handle over to `disposer`.
    pub fn disposed_by(self, disposer: &mut Disposer<'a>) {
        disposer.add(self);
    }
}

impl<'a> fmt::Debug for Disposable<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("stream", &self.stream)
            .field("id", &self.id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Bag of [`Disposable`]s disposed together, in insertion order, when the bag
/// is disposed or dropped.
///
/// Typically owned by whatever object the subscriptions should live as long
/// as.
#[derive(Default)]
pub struct Disposer<'a> {
    handles: Vec<Disposable<'a>>,
}

impl<'a> Disposer<'a> {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Disposer { handles: Vec::new() }
    }

    /// Adds a handle to the bag.
    pub fn add(&mut self, disposable: Disposable<'a>) {
        self.handles.push(disposable);
    }

    /// Number of handles held.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the bag holds no handles.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Disposes every held handle in the order added and empties the bag.
    /// The bag may be reused afterwards.
    pub fn dispose(&mut self) {
        if !self.handles.is_empty() {
            trace!(handles = self.handles.len(), "disposer draining");
        }
        for mut handle in self.handles.drain(..) {
            handle.dispose();
        }
    }
}

impl<'a> Extend<Disposable<'a>> for Disposer<'a> {
    fn extend<I: IntoIterator<Item = Disposable<'a>>>(&mut self, iter: I) {
        self.handles.extend(iter);
    }
}

impl<'a> Drop for Disposer<'a> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<'a> fmt::Debug for Disposer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handles.iter()).finish()
    }
}
