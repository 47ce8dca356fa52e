mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::init_logger;
use handle_vector::{Handle, HandleVector, Release, SharedVector};

type Name = *mut String;

fn name(s: &str) -> Name {
    Box::into_raw(Box::new(s.to_string()))
}

fn read(handle: Name) -> String {
    if handle.is_null() {
        return "-".to_string();
    }

    unsafe { (*handle).clone() }
}

/// Vector of boxed strings that frees its items and records the freed names.
fn owning(names: &[&str]) -> (HandleVector<Name>, Rc<RefCell<Vec<String>>>) {
    let freed = Rc::new(RefCell::new(Vec::new()));
    let sink = freed.clone();

    let mut v = HandleVector::builder()
        .comparator(|a: &Name, b: &Name| unsafe { (&**a).cmp(&**b) })
        .destructor(move |item: Name| {
            let item = unsafe { Box::from_raw(item) };
            sink.borrow_mut().push(*item);
        })
        .build()
        .unwrap();

    for n in names {
        v.push(name(n)).unwrap();
    }

    (v, freed)
}

fn names(v: &HandleVector<Name>) -> Vec<String> {
    v.iter().map(|&h| read(h)).collect()
}

#[test]
fn destructor_called_once_per_item() {
    init_logger();

    let (mut v, freed) = owning(&["a", "b", "c", "d", "e"]);
    v.clear();
    assert_eq!(freed.borrow().len(), 5);
    assert!(v.is_empty());

    drop(v);
    assert_eq!(freed.borrow().len(), 5);
}

#[test]
fn shift_and_slice() {
    init_logger();

    let (mut v, freed) = owning(&["A", "B", "C", "D", "E"]);

    v.shift(1, 2).unwrap();
    assert_eq!(names(&v), ["A", "-", "-", "B", "C", "D", "E"]);
    assert!(v.at(1).unwrap().is_null());

    v.set(1, name("X")).unwrap();
    v.set(2, name("Y")).unwrap();
    assert_eq!(names(&v), ["A", "X", "Y", "B", "C", "D", "E"]);

    v.shift(-4, -2).unwrap();
    assert_eq!(names(&v), ["A", "X", "Y", "D", "E"]);
    assert_eq!(*freed.borrow(), ["B", "C"]);

    let s = v.slice(1, -1).unwrap();
    assert_eq!(names(&s), ["X", "Y", "D"]);
    assert!(!s.has_destructor());

    let r = v.rslice(-2, 5).unwrap();
    assert_eq!(names(&r), ["E", "D"]);

    // The slices don't own their items.
    drop(s);
    drop(r);
    assert_eq!(freed.borrow().len(), 2);

    drop(v);
    assert_eq!(*freed.borrow(), ["B", "C", "A", "X", "Y", "D", "E"]);
}

#[test]
fn sort_and_search_with_custom_ordering() {
    init_logger();

    let (mut v, freed) = owning(&["pear", "apple", "fig", "kiwi"]);
    assert!(!v.is_sorted());

    v.sort();
    assert!(v.is_sorted());
    assert_eq!(names(&v), ["apple", "fig", "kiwi", "pear"]);

    let probe = name("kiwi");
    assert_eq!(v.binary_search(&probe), Some(2));
    assert_eq!(v.linear_search(&probe), Some(2));
    assert!(v.contains(&probe, true));
    assert_eq!(v.count(&probe), 1);
    v.destroy_item(probe);

    assert_eq!(read(v.max().unwrap()), "pear");
    assert_eq!(read(v.min().unwrap()), "apple");
    assert_eq!(*freed.borrow(), ["kiwi"]);
}

#[test]
fn filter_and_split_ownership() {
    init_logger();

    let (mut v, freed) = owning(&["one", "two", "three", "four", "five"]);

    let mut long = v.filter_split(|&h| unsafe { (&(*h)).len() == 3 }).unwrap();
    assert_eq!(names(&v), ["one", "two"]);
    assert_eq!(names(&long), ["three", "four", "five"]);
    assert!(freed.borrow().is_empty());

    v.filter(|&h| unsafe { (*h).starts_with('o') });
    assert_eq!(names(&v), ["one"]);
    assert_eq!(*freed.borrow(), ["two"]);

    // Hand the split-off items back to the owning vector.
    v.extend(&mut long).unwrap();
    assert!(long.is_empty());
    drop(long);
    assert_eq!(freed.borrow().len(), 1);

    drop(v);
    assert_eq!(*freed.borrow(), ["two", "one", "three", "four", "five"]);
}

#[test]
fn shared_teardown() {
    init_logger();

    let (v, freed) = owning(&["a", "b"]);
    let shared = SharedVector::new(v);
    let other = shared.iref();
    assert_eq!(shared.refs(), 2);

    other.borrow_mut().push(name("c")).unwrap();
    assert_eq!(other.dref(), Release::Retained(1));
    assert!(freed.borrow().is_empty());

    assert_eq!(names(&shared.borrow()), ["a", "b", "c"]);
    assert_eq!(shared.dref(), Release::Destroyed(None));
    assert_eq!(*freed.borrow(), ["a", "b", "c"]);
}

#[test]
fn snapshot_walk() {
    init_logger();

    let (v, _freed) = owning(&["x", "y", "z"]);
    let mut snap = v.snapshot();
    snap.i = 1;
    let rest: Vec<String> = snap.map(read).collect();
    assert_eq!(rest, ["y", "z"]);

    let mut seen = Vec::new();
    v.rforeach(|&h| {
        seen.push(read(h));
        seen.len() < 2
    });
    assert_eq!(seen, ["z", "y"]);
}

#[test]
fn panicking_filter_frees_each_item_once() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    init_logger();

    let (mut v, freed) = owning(&["a", "b", "c", "d", "e"]);
    let result = catch_unwind(AssertUnwindSafe(|| {
        v.filter(|&h| {
            let s = read(h);
            assert_ne!(s, "d", "predicate failure");
            s != "b"
        });
    }));
    assert!(result.is_err());
    assert_eq!(names(&v), ["a", "c", "d", "e"]);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = v.filter_split(|&h| {
            let s = read(h);
            assert_ne!(s, "e", "predicate failure");
            s != "a"
        });
    }));
    assert!(result.is_err());
    assert_eq!(names(&v), ["c", "d", "e", "a"]);

    drop(v);
    assert_eq!(*freed.borrow(), ["b", "c", "d", "e", "a"]);
}
