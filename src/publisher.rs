use std::borrow::Borrow;
use std::fmt;

use crate::stream::Stream;

/// Owner of a root [`Stream`] and the only way to push values into one.
pub struct Publisher<'a, T> {
    stream: Stream<'a, T>,
}

impl<'a, T: 'a> Publisher<'a, T> {
    /// Creates a publisher with a fresh root stream.
    pub fn new() -> Self {
        Publisher { stream: Stream::new() }
    }

    /// Handle to the root stream, for subscribing and deriving.
    pub fn stream(&self) -> Stream<'a, T> {
        self.stream.clone()
    }

    /// Delivers `value` to every current subscriber of the root stream and,
    /// through them, to the whole derived graph before returning.
    pub fn emit<B>(&self, value: B)
    where
        B: Borrow<T>,
    {
        self.stream.emit(value.borrow());
    }

    /// Emits every item of `iter` in order.
    pub fn feed<B, I>(&self, iter: I)
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        for value in iter {
            self.emit(value);
        }
    }
}

impl<'a, T: 'a> Default for Publisher<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> fmt::Debug for Publisher<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher").field("stream", &self.stream).finish()
    }
}
