//! Linear scans, filters, sorting and searching.
//!
//! All comparisons go through the vector's comparator.

use core::cmp::Ordering;

use allocator_api2::alloc::Allocator;

use crate::error::Error;
use crate::handle::Handle;
use crate::index;
use crate::raw::RawStore;
use crate::vector::HandleVector;

impl<T: Handle, C, A: Allocator> HandleVector<T, C, A> {
    /// Returns `true` if any item satisfies the predicate. Stops at the first one.
    pub fn any<F: FnMut(&T) -> bool>(&self, f: F) -> bool {
        self.as_slice().iter().any(f)
    }

    /// Returns `true` if all items satisfy the predicate. Stops at the first one that doesn't.
    pub fn all<F: FnMut(&T) -> bool>(&self, f: F) -> bool {
        self.as_slice().iter().all(f)
    }

    /// Number of items comparing equal to `val`.
    pub fn count(&self, val: &T) -> usize {
        let cmp = &self.comparator;
        self.as_slice()
            .iter()
            .filter(|&item| cmp(val, item) == Ordering::Equal)
            .count()
    }

    /// Returns `true` if both vectors have the same length and all pairs of items compare
    /// equal according to this vector's comparator.
    pub fn compare<C2, A2: Allocator>(&self, other: &HandleVector<T, C2, A2>) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let cmp = &self.comparator;
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| cmp(a, b) == Ordering::Equal)
    }

    /// Replaces every item with `f(item)`, first to last.
    ///
    /// The replaced items are not passed to the destructor.
    pub fn map<F: FnMut(T) -> T>(&mut self, mut f: F) -> &mut Self {
        for item in self.as_mut_slice() {
            *item = f(*item);
        }

        self
    }

    /// Keeps the items satisfying the predicate, in order, and destroys the others.
    ///
    /// If the predicate or the destructor panics, the vector keeps every item that was
    /// not destroyed yet.
    pub fn filter<F: FnMut(&T) -> bool>(&mut self, mut keep: F) -> &mut Self {
        profiling::scope!("HandleVector::filter");

        let mut compaction = Compaction::new(&mut self.buffer, &mut self.len);
        while let Some(item) = compaction.peek() {
            if keep(&item) {
                compaction.keep(item);
            } else {
                compaction.skip();
                if let Some(destroy) = self.destructor.as_mut() {
                    destroy(item);
                }
            }
        }

        drop(compaction);
        self
    }

    /// Keeps the items satisfying the predicate and moves the others, in order, into a new
    /// vector.
    ///
    /// Rejected items are not destroyed. The new vector is allocated before anything is
    /// moved, so if the allocation fails this vector is left untouched. If the predicate
    /// panics, the items moved so far are handed back to the end of this vector.
    pub fn filter_split<F: FnMut(&T) -> bool>(&mut self, mut keep: F) -> Result<Self, Error>
    where
        C: Clone,
        A: Clone,
    {
        profiling::scope!("HandleVector::filter_split");

        let mut rejected = self.derive_with_capacity(self.len)?;

        let mut compaction = Compaction::new(&mut self.buffer, &mut self.len)
            .moving_to(&mut rejected.buffer, &mut rejected.len);
        while let Some(item) = compaction.peek() {
            if keep(&item) {
                compaction.keep(item);
            } else {
                compaction.reject(item);
            }
        }

        drop(compaction);
        Ok(rejected)
    }

    /// Calls `f` on every item, first to last, until it returns `false`.
    pub fn foreach<F: FnMut(&T) -> bool>(&self, mut f: F) -> &Self {
        for item in self.as_slice() {
            if !f(item) {
                break;
            }
        }

        self
    }

    /// Calls `f` on every item, last to first, until it returns `false`.
    pub fn rforeach<F: FnMut(&T) -> bool>(&self, mut f: F) -> &Self {
        for item in self.as_slice().iter().rev() {
            if !f(item) {
                break;
            }
        }

        self
    }

    /// Calls `f` on the items of the section `[index1, index2)`, first to last, until it
    /// returns `false`.
    pub fn for_section<F: FnMut(&T) -> bool>(
        &self,
        mut f: F,
        index1: isize,
        index2: isize,
    ) -> &Self {
        let section = index::resolve_section(index1, index2, self.len);
        for item in &self.as_slice()[section] {
            if !f(item) {
                break;
            }
        }

        self
    }

    pub fn is_sorted(&self) -> bool {
        let cmp = &self.comparator;
        self.as_slice()
            .windows(2)
            .all(|pair| cmp(&pair[0], &pair[1]) != Ordering::Greater)
    }

    /// Sorts the items with the comparator. The sort is not stable.
    pub fn sort(&mut self) -> &mut Self {
        profiling::scope!("HandleVector::sort");

        let cmp = &self.comparator;
        let items = unsafe { self.buffer.as_mut_slice(self.len) };
        items.sort_unstable_by(|a, b| cmp(a, b));

        self
    }

    /// Sorts the items of the section `[index1, index2)`.
    pub fn sort_section(&mut self, index1: isize, index2: isize) -> &mut Self {
        profiling::scope!("HandleVector::sort_section");

        let section = index::resolve_section(index1, index2, self.len);
        let cmp = &self.comparator;
        let items = unsafe { self.buffer.as_mut_slice(self.len) };
        items[section].sort_unstable_by(|a, b| cmp(a, b));

        self
    }

    /// Binary searches `val`. The vector must be sorted, which is not checked.
    ///
    /// If several items match, any one of them may be returned.
    pub fn binary_search(&self, val: &T) -> Option<usize> {
        let cmp = &self.comparator;
        self.as_slice().binary_search_by(|probe| cmp(probe, val)).ok()
    }

    /// Index of the first item comparing equal to `val`.
    pub fn linear_search(&self, val: &T) -> Option<usize> {
        let cmp = &self.comparator;
        self.as_slice()
            .iter()
            .position(|item| cmp(val, item) == Ordering::Equal)
    }

    /// Index of the first item of the section `[index1, index2)` comparing equal to `val`.
    pub fn linear_search_section(&self, val: &T, index1: isize, index2: isize) -> Option<usize> {
        let section = index::resolve_section(index1, index2, self.len);
        let start = section.start;
        let cmp = &self.comparator;
        self.as_slice()[section]
            .iter()
            .position(|item| cmp(val, item) == Ordering::Equal)
            .map(|i| start + i)
    }

    /// Returns `true` if an item compares equal to `val`, using a binary search if the
    /// caller knows the vector is sorted.
    pub fn contains(&self, val: &T, sorted: bool) -> bool {
        if sorted {
            self.binary_search(val).is_some()
        } else {
            self.linear_search(val).is_some()
        }
    }

    /// The greatest item. The first one wins ties.
    pub fn max(&self) -> Option<T> {
        self.find_extreme(Ordering::Greater)
    }

    /// The least item. The first one wins ties.
    pub fn min(&self) -> Option<T> {
        self.find_extreme(Ordering::Less)
    }

    fn find_extreme(&self, wanted: Ordering) -> Option<T> {
        let cmp = &self.comparator;
        let mut iter = self.as_slice().iter();
        let mut best = *iter.next()?;
        for item in iter {
            if cmp(item, &best) == wanted {
                best = *item;
            }
        }

        Some(best)
    }
}

/// In-place compaction of a vector's items.
///
/// Items `[0, kept)` are the compacted ones and `[processed, original)` have not been looked
/// at yet. The vector's length stays at zero while the compaction is alive. On drop, even
/// when unwinding from a panicking callback, the unprocessed items are moved down after the
/// kept ones and the length is restored. Items moved out to another store are handed back
/// if the compaction did not run to the end.
struct Compaction<'l, T: Copy> {
    store: &'l mut RawStore<T>,
    len: &'l mut usize,
    original: usize,
    processed: usize,
    kept: usize,
    moved: Option<(&'l mut RawStore<T>, &'l mut usize)>,
}

impl<'l, T: Copy> Compaction<'l, T> {
    fn new(store: &'l mut RawStore<T>, len: &'l mut usize) -> Self {
        let original = core::mem::replace(len, 0);
        Compaction {
            store,
            len,
            original,
            processed: 0,
            kept: 0,
            moved: None,
        }
    }

    /// The destination store must be empty and have room for all of the items.
    fn moving_to(mut self, store: &'l mut RawStore<T>, len: &'l mut usize) -> Self {
        debug_assert_eq!(*len, 0);
        debug_assert!(store.capacity() >= self.original);
        self.moved = Some((store, len));
        self
    }

    /// The next unprocessed item. It stays in the vector until `keep`, `reject` or `skip`
    /// is called.
    #[inline]
    fn peek(&self) -> Option<T> {
        if self.processed == self.original {
            return None;
        }

        unsafe { Some(self.store.read_item(self.processed)) }
    }

    #[inline]
    fn keep(&mut self, item: T) {
        debug_assert!(self.kept <= self.processed);
        unsafe {
            self.store.write_item(self.kept, item);
        }
        self.kept += 1;
        self.processed += 1;
    }

    /// Moves the next item to the destination store.
    #[inline]
    fn reject(&mut self, item: T) {
        if let Some((store, len)) = self.moved.as_mut() {
            unsafe {
                store.write_item(**len, item);
            }
            **len += 1;
        }
        self.processed += 1;
    }

    /// Drops the next item from the vector. The caller takes responsibility for it.
    #[inline]
    fn skip(&mut self) {
        self.processed += 1;
    }
}

impl<'l, T: Copy> Drop for Compaction<'l, T> {
    fn drop(&mut self) {
        let remaining = self.original - self.processed;
        let mut len = self.kept;
        unsafe {
            self.store.move_items(self.processed, len, remaining);
        }
        len += remaining;

        if remaining > 0 {
            if let Some((moved, moved_len)) = self.moved.as_mut() {
                unsafe {
                    self.store.write_slice(len, moved.as_slice(**moved_len));
                }
                len += **moved_len;
                **moved_len = 0;
            }
        }

        *self.len = len;
    }
}

#[cfg(test)]
use std::rc::Rc;

#[cfg(test)]
fn vector(items: &[usize]) -> HandleVector<usize> {
    HandleVector::from_slice(items).unwrap()
}

#[test]
fn any_all_short_circuit() {
    let v = vector(&[1, 2, 3, 4]);
    let mut calls = 0;
    assert!(v.any(|&x| {
        calls += 1;
        x == 2
    }));
    assert_eq!(calls, 2);

    calls = 0;
    assert!(!v.all(|&x| {
        calls += 1;
        x < 2
    }));
    assert_eq!(calls, 2);

    let empty = vector(&[]);
    assert!(!empty.any(|_| true));
    assert!(empty.all(|_| false));
}

#[test]
fn count_and_compare() {
    let v = vector(&[3, 1, 3, 2, 3]);
    assert_eq!(v.count(&3), 3);
    assert_eq!(v.count(&7), 0);

    let w = vector(&[3, 1, 3, 2, 3]);
    assert!(v.compare(&w));
    assert!(!v.compare(&vector(&[3, 1, 3, 2])));
    assert!(!v.compare(&vector(&[3, 1, 3, 2, 4])));
}

#[test]
fn compare_uses_first_comparator() {
    let mut v = vector(&[10, 21]);
    // Compare by value modulo 10.
    v.set_comparator(Some(Rc::new(|a: &usize, b: &usize| (a % 10).cmp(&(b % 10)))));
    let w = vector(&[0, 1]);
    assert!(v.compare(&w));
    assert!(!w.compare(&v));
}

#[test]
fn map_in_place() {
    let (destructor, log) = crate::vector::recording_destructor();
    let mut v = vector(&[1, 2, 3]);
    v.set_destructor(Some(destructor));

    v.map(|x| x * 10);
    assert_eq!(v.as_slice(), &[10, 20, 30]);
    // The replaced items are not destroyed.
    assert!(log.borrow().is_empty());

    drop(v);
    assert_eq!(*log.borrow(), vec![10, 20, 30]);
}

#[test]
fn filter_destroys_rejects() {
    use std::cell::RefCell;

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let mut v = vector(&[1, 2, 3, 4, 5, 6]);
    v.set_destructor(Some(Box::new(move |x: usize| sink.borrow_mut().push(x))));

    v.filter(|x| x % 2 == 0);
    assert_eq!(v.as_slice(), &[2, 4, 6]);
    assert_eq!(*log.borrow(), vec![1, 3, 5]);
}

#[test]
fn filter_split_moves_rejects() {
    use std::cell::Cell;

    let destroyed = Rc::new(Cell::new(0));
    let counter = destroyed.clone();
    let mut v: HandleVector<usize, &str> = HandleVector::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
    v.set_destructor(Some(Box::new(move |_| counter.set(counter.get() + 1))));
    v.set_context(Some("ctx"));

    let rejected = v.filter_split(|x| x % 3 == 0).unwrap();
    assert_eq!(v.as_slice(), &[3, 6]);
    assert_eq!(rejected.as_slice(), &[1, 2, 4, 5]);
    assert_eq!(rejected.context(), Some(&"ctx"));
    assert!(!rejected.has_destructor());
    assert_eq!(destroyed.get(), 0);
}

#[test]
fn filter_panicking_predicate() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let (destructor, log) = crate::vector::recording_destructor();
    let mut v = vector(&[1, 2, 3, 4, 5]);
    v.set_destructor(Some(destructor));

    let result = catch_unwind(AssertUnwindSafe(|| {
        v.filter(|&x| {
            assert_ne!(x, 4, "predicate failure");
            x != 2
        });
    }));
    assert!(result.is_err());

    // 2 was destroyed, 4 and 5 were never looked at.
    assert_eq!(v.as_slice(), &[1, 3, 4, 5]);
    assert_eq!(*log.borrow(), vec![2]);

    drop(v);
    assert_eq!(*log.borrow(), vec![2, 1, 3, 4, 5]);
}

#[test]
fn filter_panicking_destructor() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let (mut record, log) = crate::vector::recording_destructor();
    let mut v = vector(&[1, 2, 3, 4]);
    v.set_destructor(Some(Box::new(move |x: usize| {
        record(x);
        assert_ne!(x, 3, "destructor failure");
    })));

    let result = catch_unwind(AssertUnwindSafe(|| {
        v.filter(|&x| x % 2 == 0);
    }));
    assert!(result.is_err());

    // 3 was handed to the destructor before it panicked, so it is gone.
    assert_eq!(v.as_slice(), &[2, 4]);
    assert_eq!(*log.borrow(), vec![1, 3]);

    drop(v);
    assert_eq!(*log.borrow(), vec![1, 3, 2, 4]);
}

#[test]
fn filter_split_panicking_predicate() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let (destructor, log) = crate::vector::recording_destructor();
    let mut v = vector(&[1, 2, 3, 4, 5]);
    v.set_destructor(Some(destructor));

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = v.filter_split(|&x| {
            assert_ne!(x, 4, "predicate failure");
            x != 2
        });
    }));
    assert!(result.is_err());

    // The rejected item comes back at the end, nothing was destroyed.
    assert_eq!(v.as_slice(), &[1, 3, 4, 5, 2]);
    assert!(log.borrow().is_empty());

    drop(v);
    assert_eq!(*log.borrow(), vec![1, 3, 4, 5, 2]);
}

#[test]
fn traversal() {
    let v = vector(&[1, 2, 3, 4, 5]);

    let mut seen = Vec::new();
    v.foreach(|&x| {
        seen.push(x);
        x < 3
    });
    assert_eq!(seen, vec![1, 2, 3]);

    seen.clear();
    v.rforeach(|&x| {
        seen.push(x);
        x > 3
    });
    assert_eq!(seen, vec![5, 4, 3]);

    seen.clear();
    v.for_section(|&x| {
        seen.push(x);
        true
    }, 1, -1);
    assert_eq!(seen, vec![2, 3, 4]);

    seen.clear();
    v.for_section(|&x| {
        seen.push(x);
        true
    }, 4, 2);
    assert!(seen.is_empty());
}

#[test]
fn sorting() {
    let mut v = vector(&[5, 3, 9, 1, 7]);
    assert!(!v.is_sorted());
    v.sort();
    assert_eq!(v.as_slice(), &[1, 3, 5, 7, 9]);
    assert!(v.is_sorted());

    let mut w = vector(&[9, 8, 7, 6, 5]);
    w.sort_section(1, -1);
    assert_eq!(w.as_slice(), &[9, 6, 7, 8, 5]);
    w.sort_section(3, 1);
    assert_eq!(w.as_slice(), &[9, 6, 7, 8, 5]);

    assert!(vector(&[]).is_sorted());
    assert!(vector(&[2, 2, 2]).is_sorted());
}

#[test]
fn searching() {
    let v = vector(&[1, 3, 5, 7, 9]);
    assert_eq!(v.binary_search(&7), Some(3));
    assert_eq!(v.binary_search(&4), None);
    assert!(v.contains(&9, true));
    assert!(!v.contains(&2, false));

    let w = vector(&[4, 2, 4, 8, 4]);
    assert_eq!(w.linear_search(&4), Some(0));
    assert_eq!(w.linear_search(&5), None);
    assert_eq!(w.linear_search_section(&4, 1, 5), Some(2));
    assert_eq!(w.linear_search_section(&4, -2, -1), None);
    assert_eq!(w.linear_search_section(&4, -1, 5), Some(4));
    assert_eq!(w.linear_search_section(&4, 3, 1), None);
}

#[test]
fn extremes() {
    assert_eq!(vector(&[]).max(), None);
    assert_eq!(vector(&[]).min(), None);

    let v = vector(&[4, 9, 1, 9, 1]);
    assert_eq!(v.max(), Some(9));
    assert_eq!(v.min(), Some(1));

    // Ties go to the first item seen.
    let mut w = vector(&[12, 22, 5]);
    w.set_comparator(Some(Rc::new(|a: &usize, b: &usize| (a % 10).cmp(&(b % 10)))));
    assert_eq!(w.min(), Some(12));
    assert_eq!(w.max(), Some(5));
}
