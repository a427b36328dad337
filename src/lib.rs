//! Single-threaded push streams with deterministic teardown.
//!
//! A [`Publisher`] owns a root [`Stream`]. Streams are subscribed to with
//! callbacks and derived from one another with [`map`](Stream::map),
//! [`filter`](Stream::filter), [`filter_nils`](Stream::filter_nils),
//! [`combine`], [`combine3`], [`combine4`] and [`merge`]. Emission is
//! synchronous: a value has reached every subscriber of the whole derived
//! graph when [`Publisher::emit`] returns.
//!
//! Subscriptions are removed through the [`Disposable`] returned by
//! [`Stream::subscribe`], or in bulk through a [`Disposer`]. Derived streams
//! hold their sources strongly and are held by them only weakly; when the
//! last handle to a derived stream goes away, its internal subscriptions are
//! removed from every source.
//!
//! ```
//! use std::cell::RefCell;
//!
//! use reactive_chain::{Disposer, Publisher};
//!
//! let seen = RefCell::new(Vec::new());
//! let publisher = Publisher::<i32>::new();
//! let mut bag = Disposer::new();
//! publisher
//!     .stream()
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * 10)
//!     .subscribe(|x| seen.borrow_mut().push(*x))
//!     .disposed_by(&mut bag);
//! publisher.feed(1..5);
//! bag.dispose();
//! publisher.emit(6);
//! assert_eq!(*seen.borrow(), vec![20, 40]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use combine::{combine, combine3, combine4};
pub use disposable::{Disposable, Disposer};
pub use id::{StreamId, SubscriptionId};
pub use operators::merge;
pub use publisher::Publisher;
pub use stream::{DependentRemovable, Stream};

mod combine;
mod disposable;
mod id;
mod operators;
mod publisher;
mod registry;
mod stream;
