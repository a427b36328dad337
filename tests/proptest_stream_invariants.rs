//! Property tests for delivery, operator and disposal invariants.

use std::cell::RefCell;

use proptest::prelude::*;
use reactive_chain::{combine, merge, Disposer, Publisher};

// ── Helpers ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum Side {
    Left(i32),
    Right(i32),
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![any::<i32>().prop_map(Side::Left), any::<i32>().prop_map(Side::Right)]
}

/// Reference model of `combine`: latest value per side, emitted once both exist.
fn combine_model(events: &[Side]) -> Vec<(i32, i32)> {
    let (mut left, mut right) = (None, None);
    let mut out = Vec::new();
    for event in events {
        match *event {
            Side::Left(x) => left = Some(x),
            Side::Right(x) => right = Some(x),
        }
        if let (Some(l), Some(r)) = (left, right) {
            out.push((l, r));
        }
    }
    out
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Fan-out: every subscriber sees every value once, in subscribe order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fan_out(subscribers in 1usize..8, values in proptest::collection::vec(any::<i16>(), 0..32)) {
        let seen = RefCell::new(Vec::new());
        let p = Publisher::<i16>::new();
        let s = p.stream();
        let mut bag = Disposer::new();
        for k in 0..subscribers {
            let seen = &seen;
            s.subscribe(move |x| seen.borrow_mut().push((k, *x))).disposed_by(&mut bag);
        }
        p.feed(values.iter());
        let expected: Vec<_> = values
            .iter()
            .flat_map(|v| (0..subscribers).map(move |k| (k, *v)))
            .collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Disposal isolation: a disposed subscriber receives nothing afterwards
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn disposal_isolation(
        subscribers in 2usize..6,
        victim in 0usize..6,
        values in proptest::collection::vec(any::<i16>(), 1..16),
    ) {
        let victim = victim % subscribers;
        let counts = RefCell::new(vec![0usize; subscribers]);
        let p = Publisher::<i16>::new();
        let s = p.stream();
        let mut handles = Vec::new();
        for k in 0..subscribers {
            let counts = &counts;
            handles.push(s.subscribe(move |_| counts.borrow_mut()[k] += 1));
        }
        handles[victim].dispose();
        handles[victim].dispose();
        p.feed(values.iter());
        for (k, count) in counts.borrow().iter().enumerate() {
            let expected = if k == victim { 0 } else { values.len() };
            prop_assert_eq!(*count, expected);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Map purity and filter selectivity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn map_applies_function_once_per_value(values in proptest::collection::vec(any::<i32>(), 0..32)) {
        let seen = RefCell::new(Vec::new());
        let p = Publisher::<i32>::new();
        let _sub = p.stream().map(|x| x.wrapping_mul(3)).subscribe(|x| seen.borrow_mut().push(*x));
        p.feed(values.iter());
        let expected: Vec<i32> = values.iter().map(|x| x.wrapping_mul(3)).collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }

    #[test]
    fn filter_yields_matching_subsequence(values in proptest::collection::vec(any::<i32>(), 0..32), modulus in 1i32..5) {
        let seen = RefCell::new(Vec::new());
        let p = Publisher::<i32>::new();
        let _sub = p.stream().filter(move |x| x % modulus == 0).subscribe(|x| seen.borrow_mut().push(*x));
        p.feed(values.iter());
        let expected: Vec<i32> = values.iter().copied().filter(|x| x % modulus == 0).collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }

    #[test]
    fn filter_nils_yields_present_values(values in proptest::collection::vec(any::<Option<u8>>(), 0..32)) {
        let seen = RefCell::new(Vec::new());
        let p = Publisher::<Option<u8>>::new();
        let _sub = p.stream().filter_nils().subscribe(|x| seen.borrow_mut().push(*x));
        p.feed(values.iter());
        let expected: Vec<u8> = values.iter().flatten().copied().collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Fan-in: merge preserves emission order, combine gates on all sources
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_preserves_emission_order(events in proptest::collection::vec(arb_side(), 0..32)) {
        let seen = RefCell::new(Vec::new());
        let left = Publisher::<i32>::new();
        let right = Publisher::<i32>::new();
        let _sub = merge(&left.stream(), &right.stream()).subscribe(|x| seen.borrow_mut().push(*x));
        for event in &events {
            match *event {
                Side::Left(x) => left.emit(x),
                Side::Right(x) => right.emit(x),
            }
        }
        let expected: Vec<i32> = events
            .iter()
            .map(|event| match *event {
                Side::Left(x) | Side::Right(x) => x,
            })
            .collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }

    #[test]
    fn combine_matches_latest_value_model(events in proptest::collection::vec(arb_side(), 0..32)) {
        let seen = RefCell::new(Vec::new());
        let left = Publisher::<i32>::new();
        let right = Publisher::<i32>::new();
        let _sub = combine(&left.stream(), &right.stream()).subscribe(|x| seen.borrow_mut().push(*x));
        for event in &events {
            match *event {
                Side::Left(x) => left.emit(x),
                Side::Right(x) => right.emit(x),
            }
        }
        prop_assert_eq!(&*seen.borrow(), &combine_model(&events));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Disposer cascade leaves no registrations behind
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn disposer_releases_every_chain(depths in proptest::collection::vec(0usize..4, 1..6)) {
        let hits = RefCell::new(0usize);
        let p = Publisher::<i32>::new();
        let root = p.stream();
        {
            let mut bag = Disposer::new();
            for depth in &depths {
                let mut stream = root.clone();
                for _ in 0..*depth {
                    stream = stream.map(|x| x + 1);
                }
                let hits = &hits;
                stream.subscribe(move |_| *hits.borrow_mut() += 1).disposed_by(&mut bag);
            }
            prop_assert_eq!(bag.len(), depths.len());
            p.emit(0);
        }
        p.emit(1);
        prop_assert_eq!(*hits.borrow(), depths.len());
        prop_assert_eq!(root.subscriber_count(), 0);
        prop_assert_eq!(root.dependent_count(), 0);
    }
}
