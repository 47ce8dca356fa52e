//! Property tests for indexing, reordering, sorting and the filters.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use handle_vector::HandleVector;

fn vector(items: &[usize]) -> HandleVector<usize> {
    HandleVector::from_slice(items).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn negative_index_aliases_positive(items in prop_vec(0usize..1000, 1..64)) {
        let v = vector(&items);
        let len = items.len() as isize;
        for i in 0..len {
            prop_assert_eq!(v.at(i), v.at(i - len));
            prop_assert_eq!(v.at(i), Some(items[i as usize]));
        }
        prop_assert_eq!(v.at(len), None);
        prop_assert_eq!(v.at(-len - 1), None);
    }

    #[test]
    fn push_pop_is_a_stack(items in prop_vec(0usize..1000, 0..64)) {
        let mut v: HandleVector<usize> = HandleVector::with_capacity(1).unwrap();
        for &item in &items {
            v.push(item).unwrap();
            prop_assert!(v.len() <= v.capacity());
        }

        let mut popped = Vec::new();
        while let Some(item) = v.pop() {
            popped.push(item);
        }
        popped.reverse();
        prop_assert_eq!(popped, items);
    }

    #[test]
    fn reverse_is_an_involution(items in prop_vec(0usize..1000, 0..64)) {
        let mut v = vector(&items);
        v.reverse().reverse();
        prop_assert_eq!(v.as_slice(), &items[..]);
    }

    #[test]
    fn rotate_round_trip(items in prop_vec(0usize..1000, 0..64), k in -100isize..100) {
        let mut v = vector(&items);
        v.rotate(k);
        if !items.is_empty() {
            let shift = k.rem_euclid(items.len() as isize) as usize;
            prop_assert_eq!(v.at(shift as isize), Some(items[0]));
        }
        v.rotate(-k);
        prop_assert_eq!(v.as_slice(), &items[..]);
    }

    #[test]
    fn sort_is_idempotent(items in prop_vec(0usize..1000, 0..64)) {
        let mut v = vector(&items);
        v.sort();
        prop_assert!(v.is_sorted());

        let mut expected = items.clone();
        expected.sort_unstable();
        prop_assert_eq!(v.as_slice(), &expected[..]);

        v.sort();
        prop_assert_eq!(v.as_slice(), &expected[..]);
    }

    #[test]
    fn binary_search_finds_equal_items(
        items in prop_vec(0usize..100, 0..64),
        needle in 0usize..100,
    ) {
        let mut v = vector(&items);
        v.sort();

        match v.binary_search(&needle) {
            Some(i) => {
                prop_assert_eq!(v.at(i as isize), Some(needle));
            }
            None => {
                prop_assert!(!items.contains(&needle));
            }
        }
        prop_assert_eq!(v.contains(&needle, true), items.contains(&needle));
        prop_assert_eq!(v.contains(&needle, false), items.contains(&needle));
        prop_assert_eq!(v.count(&needle), items.iter().filter(|&&x| x == needle).count());
    }

    #[test]
    fn filter_split_partitions(items in prop_vec(0usize..1000, 0..64), modulo in 1usize..5) {
        let mut v = vector(&items);
        let rejected = v.filter_split(|x| x % modulo == 0).unwrap();

        let (kept, others): (Vec<usize>, Vec<usize>) =
            items.iter().copied().partition(|&x| x % modulo == 0);
        prop_assert_eq!(v.as_slice(), &kept[..]);
        prop_assert_eq!(rejected.as_slice(), &others[..]);

        let mut filtered = vector(&items);
        filtered.filter(|x| x % modulo == 0);
        prop_assert!(filtered.compare(&v));
    }

    #[test]
    fn joining_adds_lengths(
        a in prop_vec(0usize..1000, 0..32),
        b in prop_vec(0usize..1000, 0..32),
    ) {
        let mut x = vector(&a);
        let mut y = vector(&b);

        x.concat(&y).unwrap();
        prop_assert_eq!(x.len(), a.len() + b.len());
        prop_assert_eq!(y.len(), b.len());

        x.extend(&mut y).unwrap();
        prop_assert_eq!(x.len(), a.len() + 2 * b.len());
        prop_assert!(y.is_empty());

        let expected: Vec<usize> = a.iter().chain(&b).chain(&b).copied().collect();
        prop_assert_eq!(x.as_slice(), &expected[..]);
    }

    #[test]
    fn slice_matches_section(
        items in prop_vec(0usize..1000, 0..32),
        i1 in -40isize..40,
        i2 in -40isize..40,
    ) {
        let v = vector(&items);

        // Negative bounds count from the end, then both are clamped to the items.
        let len = items.len() as isize;
        let bound = |i: isize| {
            let i = if i < 0 { len + i } else { i };
            i.max(0).min(len) as usize
        };
        let (start, end) = (bound(i1), bound(i2));
        let expected: Vec<usize> = if start < end {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        let s = v.slice(i1, i2).unwrap();
        prop_assert_eq!(s.as_slice(), &expected[..]);

        let r = v.rslice(i1, i2).unwrap();
        let reversed: Vec<usize> = expected.iter().rev().copied().collect();
        prop_assert_eq!(r.as_slice(), &reversed[..]);
    }
}
