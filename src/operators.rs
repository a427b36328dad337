use crate::stream::Stream;

impl<'a, T: 'a> Stream<'a, T> {
    /// Derived stream emitting `func(v)` for every value `v` of this one.
    pub fn map<U, F>(&self, mut func: F) -> Stream<'a, U>
    where
        U: 'a,
        F: FnMut(&T) -> U + 'a,
    {
        let derived: Stream<'a, U> = Stream::new();
        derived.link_from(self, move |out, x| out.emit(&func(x)));
        derived
    }

    /// Derived stream emitting only the values for which `pred` holds.
    pub fn filter<F>(&self, mut pred: F) -> Stream<'a, T>
    where
        F: FnMut(&T) -> bool + 'a,
    {
        let derived = Stream::new();
        derived.link_from(self, move |out, x| {
            if pred(x) {
                out.emit(x);
            }
        });
        derived
    }

    /// Derived stream emitting `v` for every `func(x)` that returns `Some(v)`.
    pub fn filter_map<U, F>(&self, mut func: F) -> Stream<'a, U>
    where
        U: 'a,
        F: FnMut(&T) -> Option<U> + 'a,
    {
        let derived: Stream<'a, U> = Stream::new();
        derived.link_from(self, move |out, x| {
            if let Some(value) = func(x) {
                out.emit(&value);
            }
        });
        derived
    }

    /// Derived stream forwarding every value of `self` and of `other`, in the
    /// order they are emitted.
    pub fn merge(&self, other: &Stream<'a, T>) -> Stream<'a, T> {
        merge(self, other)
    }
}

impl<'a, T: 'a> Stream<'a, Option<T>> {
    /// Derived stream of the present values, with `None`s dropped.
    pub fn filter_nils(&self) -> Stream<'a, T> {
        let derived: Stream<'a, T> = Stream::new();
        derived.link_from(self, |out, x: &Option<T>| {
            if let Some(value) = x {
                out.emit(value);
            }
        });
        derived
    }
}

/// Stream forwarding every value of `lhs` and `rhs` as soon as it arrives.
pub fn merge<'a, T: 'a>(lhs: &Stream<'a, T>, rhs: &Stream<'a, T>) -> Stream<'a, T> {
    let derived = Stream::new();
    derived.link_from(lhs, |out, x| out.emit(x));
    derived.link_from(rhs, |out, x| out.emit(x));
    derived
}
