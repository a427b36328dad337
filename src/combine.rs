//! Fan-in of two to four streams into a stream of tuples.
//!
//! A combined stream keeps the latest value of each source. Nothing is
//! emitted until every source has produced at least once; from then on each
//! value from any source emits a tuple of the latest values of all sources.

use std::cell::RefCell;
use std::rc::Rc;

use crate::stream::Stream;

type Slots2<A, B> = (Option<A>, Option<B>);
type Slots3<A, B, C> = (Option<A>, Option<B>, Option<C>);
type Slots4<A, B, C, D> = (Option<A>, Option<B>, Option<C>, Option<D>);

/// Latest-value slots of a combined stream.
trait Latest {
    type Output;

    /// The tuple of all slots, or `None` while any slot is still empty.
    fn complete(&self) -> Option<Self::Output>;
}

impl<A: Clone, B: Clone> Latest for Slots2<A, B> {
    type Output = (A, B);

    fn complete(&self) -> Option<Self::Output> {
        match self {
            (Some(a), Some(b)) => Some((a.clone(), b.clone())),
            _ => None,
        }
    }
}

impl<A: Clone, B: Clone, C: Clone> Latest for Slots3<A, B, C> {
    type Output = (A, B, C);

    fn complete(&self) -> Option<Self::Output> {
        match self {
            (Some(a), Some(b), Some(c)) => Some((a.clone(), b.clone(), c.clone())),
            _ => None,
        }
    }
}

impl<A: Clone, B: Clone, C: Clone, D: Clone> Latest for Slots4<A, B, C, D> {
    type Output = (A, B, C, D);

    fn complete(&self) -> Option<Self::Output> {
        match self {
            (Some(a), Some(b), Some(c), Some(d)) => {
                Some((a.clone(), b.clone(), c.clone(), d.clone()))
            }
            _ => None,
        }
    }
}

/// Links `derived` to one `source`: each value is stored into its slot and,
/// once all slots are filled, the full tuple is emitted.
fn feed<'a, L, S, F>(
    derived: &Stream<'a, L::Output>,
    source: &Stream<'a, S>,
    slots: &Rc<RefCell<L>>,
    store: F,
) where
    L: Latest + 'a,
    L::Output: 'a,
    S: 'a,
    F: Fn(&mut L, &S) + 'a,
{
    let slots = slots.clone();
    derived.link_from(source, move |out, x| {
        let tuple = {
            let mut slots = slots.borrow_mut();
            store(&mut slots, x);
            slots.complete()
        };
        if let Some(tuple) = tuple {
            out.emit(&tuple);
        }
    });
}

/// Combines the latest values of `a` and `b`.
pub fn combine<'a, A, B>(a: &Stream<'a, A>, b: &Stream<'a, B>) -> Stream<'a, (A, B)>
where
    A: Clone + 'a,
    B: Clone + 'a,
{
    let derived: Stream<'a, (A, B)> = Stream::new();
    let slots: Rc<RefCell<Slots2<A, B>>> = Rc::new(RefCell::new((None, None)));
    feed(&derived, a, &slots, |s, x| s.0 = Some(x.clone()));
    feed(&derived, b, &slots, |s, x| s.1 = Some(x.clone()));
    derived
}

/// Combines the latest values of `a`, `b` and `c`.
pub fn combine3<'a, A, B, C>(
    a: &Stream<'a, A>,
    b: &Stream<'a, B>,
    c: &Stream<'a, C>,
) -> Stream<'a, (A, B, C)>
where
    A: Clone + 'a,
    B: Clone + 'a,
    C: Clone + 'a,
{
    let derived: Stream<'a, (A, B, C)> = Stream::new();
    let slots: Rc<RefCell<Slots3<A, B, C>>> = Rc::new(RefCell::new((None, None, None)));
    feed(&derived, a, &slots, |s, x| s.0 = Some(x.clone()));
    feed(&derived, b, &slots, |s, x| s.1 = Some(x.clone()));
    feed(&derived, c, &slots, |s, x| s.2 = Some(x.clone()));
    derived
}

/// Combines the latest values of `a`, `b`, `c` and `d`.
pub fn combine4<'a, A, B, C, D>(
    a: &Stream<'a, A>,
    b: &Stream<'a, B>,
    c: &Stream<'a, C>,
    d: &Stream<'a, D>,
) -> Stream<'a, (A, B, C, D)>
where
    A: Clone + 'a,
    B: Clone + 'a,
    C: Clone + 'a,
    D: Clone + 'a,
{
    let derived: Stream<'a, (A, B, C, D)> = Stream::new();
    let slots: Rc<RefCell<Slots4<A, B, C, D>>> =
        Rc::new(RefCell::new((None, None, None, None)));
    feed(&derived, a, &slots, |s, x| s.0 = Some(x.clone()));
    feed(&derived, b, &slots, |s, x| s.1 = Some(x.clone()));
    feed(&derived, c, &slots, |s, x| s.2 = Some(x.clone()));
    feed(&derived, d, &slots, |s, x| s.3 = Some(x.clone()));
    derived
}

impl<'a, T: Clone + 'a> Stream<'a, T> {
    /// Method form of [`combine`].
    pub fn combine<B: Clone + 'a>(&self, other: &Stream<'a, B>) -> Stream<'a, (T, B)> {
        combine(self, other)
    }

    /// Method form of [`combine3`].
    pub fn combine3<B, C>(&self, b: &Stream<'a, B>, c: &Stream<'a, C>) -> Stream<'a, (T, B, C)>
    where
        B: Clone + 'a,
        C: Clone + 'a,
    {
        combine3(self, b, c)
    }

    /// Method form of [`combine4`].
    pub fn combine4<B, C, D>(
        &self,
        b: &Stream<'a, B>,
        c: &Stream<'a, C>,
        d: &Stream<'a, D>,
    ) -> Stream<'a, (T, B, C, D)>
    where
        B: Clone + 'a,
        C: Clone + 'a,
        D: Clone + 'a,
    {
        combine4(self, b, c, d)
    }
}
