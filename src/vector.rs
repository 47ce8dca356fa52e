use core::cmp::Ordering;
use core::fmt;
use core::ops::{Index, Range};
use std::rc::Rc;

use allocator_api2::alloc::{Allocator, Global};

use crate::builder::DEFAULT_CAPACITY;
use crate::error::Error;
use crate::handle::{identity_order, Handle};
use crate::index;
use crate::raw::RawStore;
use crate::util;

/// Three-way comparison between two handles.
pub type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Cleanup function called once for each item irrevocably removed from a vector.
pub type Destructor<T> = Box<dyn FnMut(T)>;

fn default_comparator<T: Handle>() -> Comparator<T> {
    Rc::new(identity_order::<T>)
}

/// A growable array of opaque handles.
///
/// Besides the items, the vector carries an ordering used by the sorting and searching
/// algorithms, an optional destructor that it calls on every item it drops, and a context
/// that it never looks at.
///
/// Items that are moved out (`pop`, `extend`, `filter_split`) or overwritten (`set`, `map`)
/// are never passed to the destructor. Items that are discarded (`discard`, `clear`,
/// negative `shift`, `filter`, shrinking `resize`, teardown) always are, exactly once.
pub struct HandleVector<T: Handle, C = (), A: Allocator = Global> {
    pub(crate) buffer: RawStore<T>,
    pub(crate) len: usize,
    pub(crate) comparator: Comparator<T>,
    pub(crate) destructor: Option<Destructor<T>>,
    pub(crate) context: Option<C>,
    allocator: A,
}

impl<T: Handle, C> HandleVector<T, C, Global> {
    /// Creates an empty vector with the default capacity.
    pub fn new() -> Result<Self, Error> {
        Self::with_capacity_in(DEFAULT_CAPACITY, Global)
    }

    /// Creates an empty vector with room for `cap` items (at least one).
    pub fn with_capacity(cap: usize) -> Result<Self, Error> {
        Self::with_capacity_in(cap, Global)
    }

    pub fn from_slice(items: &[T]) -> Result<Self, Error> {
        let mut v = Self::with_capacity(items.len())?;
        v.extend_from_slice(items)?;
        Ok(v)
    }
}

impl<T: Handle, C, A: Allocator> HandleVector<T, C, A> {
    pub fn new_in(allocator: A) -> Result<Self, Error> {
        Self::with_capacity_in(DEFAULT_CAPACITY, allocator)
    }

    /// Creates an empty vector with room for `cap` items (at least one), using the
    /// provided allocator.
    pub fn with_capacity_in(cap: usize, allocator: A) -> Result<Self, Error> {
        let buffer = RawStore::try_allocate_in(cap.max(1), &allocator)?;

        Ok(HandleVector {
            buffer,
            len: 0,
            comparator: default_comparator(),
            destructor: None,
            context: None,
            allocator,
        })
    }

    /// Creates an empty vector sharing this vector's ordering, context and allocator,
    /// but not its destructor.
    pub(crate) fn derive_with_capacity(&self, cap: usize) -> Result<Self, Error>
    where
        C: Clone,
        A: Clone,
    {
        let mut v = Self::with_capacity_in(cap, self.allocator.clone())?;
        v.comparator = self.comparator.clone();
        v.context = self.context.clone();

        Ok(v)
    }

    /// Calls the destructor, if any, on every item of `range` in forward order.
    ///
    /// Does not change the length.
    pub(crate) fn destroy_range(&mut self, range: Range<usize>) {
        debug_assert!(range.end <= self.len);
        if let Some(destroy) = self.destructor.as_mut() {
            let items = unsafe { self.buffer.as_slice(self.len) };
            for &item in &items[range] {
                destroy(item);
            }
        }
    }

    fn teardown(&mut self) {
        self.clear();
        unsafe {
            self.buffer.deallocate_in(&self.allocator);
        }
    }

    /// Tears the vector down and gives the context back.
    ///
    /// The destructor is called on every remaining item in forward order before the storage
    /// is released. Dropping the vector does the same but drops the context.
    pub fn destroy(mut self) -> Option<C> {
        self.teardown();
        self.context.take()
    }

    /// Calls the destructor, if any, on an item that is not necessarily in the vector.
    pub fn destroy_item(&mut self, item: T) -> &mut Self {
        if let Some(destroy) = self.destructor.as_mut() {
            destroy(item);
        }

        self
    }

    /// Replaces the ordering. `None` restores the default identity ordering.
    pub fn set_comparator(&mut self, comparator: Option<Comparator<T>>) -> &mut Self {
        self.comparator = comparator.unwrap_or_else(default_comparator);
        self
    }

    #[inline]
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Replaces the destructor and returns the previous one. `None` makes the vector stop
    /// owning its items.
    pub fn set_destructor(&mut self, destructor: Option<Destructor<T>>) -> Option<Destructor<T>> {
        core::mem::replace(&mut self.destructor, destructor)
    }

    #[inline]
    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    /// Replaces the context and returns the previous one.
    pub fn set_context(&mut self, context: Option<C>) -> Option<C> {
        core::mem::replace(&mut self.context, context)
    }

    #[inline]
    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    #[inline]
    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    #[inline]
    pub fn take_context(&mut self) -> Option<C> {
        self.context.take()
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    /// Returns `true` if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    /// Returns the number of elements in the vector, also referred to as its ‘length’.
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns the total number of elements the vector can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns number of elements that can be added without reallocating.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.buffer.as_slice(self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.buffer.as_mut_slice(self.len) }
    }

    /// Pointer to the first item, valid until the next reallocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Tries to reserve at least enough space for `additional` extra items.
    ///
    /// The vector is left untouched if the allocation fails.
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        if self.remaining_capacity() >= additional {
            return Ok(());
        }

        let new_cap = util::grow_amortized(self.capacity(), self.len, additional)?;
        unsafe { self.buffer.try_reallocate_in(new_cap, &self.allocator) }
    }

    /// Sets the capacity to `cap` (at least one).
    ///
    /// Items that don't fit are passed to the destructor and the length is truncated
    /// before reallocating, so the truncation sticks even if the reallocation fails.
    pub fn resize(&mut self, cap: usize) -> Result<(), Error> {
        let cap = cap.max(1);
        if cap < self.len {
            log::debug!("resize truncates {} items", self.len - cap);
            self.destroy_range(cap..self.len);
            self.len = cap;
        }

        unsafe { self.buffer.try_reallocate_in(cap, &self.allocator) }
    }

    pub fn shrink_to_fit(&mut self) -> Result<(), Error> {
        self.resize(self.len)
    }

    /// Appends an item, growing the storage if needed.
    ///
    /// On allocation failure the item is not pushed and the vector is unchanged.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        let len = self.len;
        if len == self.capacity() {
            self.reserve(1)?;
        }

        unsafe {
            self.buffer.write_item(len, item);
        }
        self.len = len + 1;

        Ok(())
    }

    /// Removes the last item and hands it to the caller without destroying it.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.buffer.read_item(self.len)) }
    }

    /// Returns the last item without removing it.
    #[inline]
    pub fn top(&self) -> Option<T> {
        self.as_slice().last().copied()
    }

    /// Returns the item at `index`. Negative indices count from the end.
    #[inline]
    pub fn at(&self, index: isize) -> Option<T> {
        index::resolve(index, self.len).map(|i| self.as_slice()[i])
    }

    #[inline]
    fn checked_index(&self, index: isize) -> Result<usize, Error> {
        index::resolve(index, self.len).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Overwrites the item at `index`.
    ///
    /// The previous item is not passed to the destructor.
    pub fn set(&mut self, index: isize, item: T) -> Result<(), Error> {
        let i = self.checked_index(index)?;
        self.as_mut_slice()[i] = item;

        Ok(())
    }

    pub fn swap(&mut self, index1: isize, index2: isize) -> Result<(), Error> {
        let i1 = self.checked_index(index1)?;
        let i2 = self.checked_index(index2)?;
        self.as_mut_slice().swap(i1, i2);

        Ok(())
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.as_mut_slice().reverse();
        self
    }

    /// Reverses the items of the section `[index1, index2)` in place.
    pub fn reverse_section(&mut self, index1: isize, index2: isize) -> &mut Self {
        let section = index::resolve_section(index1, index2, self.len);
        self.as_mut_slice()[section].reverse();
        self
    }

    /// Rotates the items `k` places to the right. Negative values rotate to the left.
    pub fn rotate(&mut self, k: isize) -> &mut Self {
        let len = self.len;
        if len == 0 {
            return self;
        }

        let k = k.rem_euclid(len as isize) as usize;
        self.as_mut_slice().rotate_right(k);
        self
    }

    /// Moves the items starting at the anchor `index` away from or toward it.
    ///
    /// If `n` is positive, a gap of `n` null handles is opened at the anchor and the storage
    /// grows as needed. On allocation failure the vector is unchanged.
    ///
    /// If `n` is negative, up to `|n|` items starting at the anchor are destroyed and the
    /// following items are moved back to close the gap.
    ///
    /// The anchor may be equal to the length.
    pub fn shift(&mut self, index: isize, n: isize) -> Result<(), Error> {
        if n == 0 {
            return Ok(());
        }

        let len = self.len;
        let anchor =
            index::resolve_anchor(index, len).ok_or(Error::IndexOutOfRange { index, len })?;

        profiling::scope!("HandleVector::shift");

        if n > 0 {
            let n = n as usize;
            self.reserve(n)?;
            unsafe {
                self.buffer.move_items(anchor, anchor + n, len - anchor);
                self.buffer.fill(anchor, n, T::NULL);
            }
            self.len = len + n;
        } else {
            let count = n.unsigned_abs().min(len - anchor);
            self.destroy_range(anchor..anchor + count);
            unsafe {
                self.buffer.move_items(anchor + count, anchor, len - anchor - count);
            }
            self.len = len - count;
        }

        Ok(())
    }

    /// Destroys and removes the last `n` items.
    pub fn discard(&mut self, n: usize) -> &mut Self {
        let len = self.len;
        let count = n.min(len);
        self.destroy_range(len - count..len);
        self.len = len - count;
        self
    }

    /// Destroys and removes all items. The capacity is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.destroy_range(0..self.len);
        self.len = 0;
        self
    }

    /// Creates a shallow copy with the same capacity.
    ///
    /// The ordering and context are copied, the destructor is not: the copy does not own
    /// its items.
    pub fn copy(&self) -> Result<Self, Error>
    where
        C: Clone,
        A: Clone,
    {
        let mut v = self.derive_with_capacity(self.capacity())?;
        unsafe {
            v.buffer.write_slice(0, self.as_slice());
        }
        v.len = self.len;

        Ok(v)
    }

    /// Appends a copy of every item of the slice.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), Error> {
        let len = self.len;
        self.reserve(items.len())?;
        unsafe {
            self.buffer.write_slice(len, items);
        }
        self.len = len + items.len();

        Ok(())
    }

    /// Moves every item of `other` to the end of this vector, leaving `other` empty.
    ///
    /// The moved items are not destroyed. If the allocation fails neither vector is modified.
    pub fn extend<C2, A2: Allocator>(
        &mut self,
        other: &mut HandleVector<T, C2, A2>,
    ) -> Result<(), Error> {
        profiling::scope!("HandleVector::extend");
        self.extend_from_slice(other.as_slice())?;
        other.len = 0;

        Ok(())
    }

    /// Appends a copy of every item of `other`, which is left untouched.
    pub fn concat<C2, A2: Allocator>(
        &mut self,
        other: &HandleVector<T, C2, A2>,
    ) -> Result<(), Error> {
        profiling::scope!("HandleVector::concat");
        self.extend_from_slice(other.as_slice())
    }

    /// Appends a copy of this vector's items to itself.
    pub fn concat_self(&mut self) -> Result<(), Error> {
        profiling::scope!("HandleVector::concat_self");
        let len = self.len;
        self.reserve(len)?;
        unsafe {
            self.buffer.move_items(0, len, len);
        }
        self.len = len * 2;

        Ok(())
    }

    /// Creates a vector containing a shallow copy of the section `[index1, index2)`.
    ///
    /// The capacity of the new vector is the number of copied items (at least one). The
    /// ordering and context are copied, the destructor is not.
    pub fn slice(&self, index1: isize, index2: isize) -> Result<Self, Error>
    where
        C: Clone,
        A: Clone,
    {
        let section = index::resolve_section(index1, index2, self.len);
        let mut v = self.derive_with_capacity(section.len())?;
        let items = &self.as_slice()[section];
        unsafe {
            v.buffer.write_slice(0, items);
        }
        v.len = items.len();

        Ok(v)
    }

    /// Same as [`HandleVector::slice`] with the items in reverse order.
    pub fn rslice(&self, index1: isize, index2: isize) -> Result<Self, Error>
    where
        C: Clone,
        A: Clone,
    {
        let section = index::resolve_section(index1, index2, self.len);
        let mut v = self.derive_with_capacity(section.len())?;
        let items = &self.as_slice()[section];
        for (i, &item) in items.iter().rev().enumerate() {
            unsafe {
                v.buffer.write_item(i, item);
            }
        }
        v.len = items.len();

        Ok(v)
    }
}

impl<T: Handle, C, A: Allocator> Drop for HandleVector<T, C, A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T: Handle + fmt::Debug, C, A: Allocator> fmt::Debug for HandleVector<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: Handle, C, A: Allocator> AsRef<[T]> for HandleVector<T, C, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Handle, C, A: Allocator, I> Index<I> for HandleVector<T, C, A>
where
    I: core::slice::SliceIndex<[T]>,
{
    type Output = <I as core::slice::SliceIndex<[T]>>::Output;

    fn index(&self, index: I) -> &Self::Output {
        self.as_slice().index(index)
    }
}

impl<'a, T: Handle, C, A: Allocator> IntoIterator for &'a HandleVector<T, C, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> core::slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

#[cfg(test)]
pub(crate) fn recording_destructor() -> (Destructor<usize>, Rc<core::cell::RefCell<Vec<usize>>>) {
    let log = Rc::new(core::cell::RefCell::new(Vec::new()));
    let sink = log.clone();
    (Box::new(move |item| sink.borrow_mut().push(item)), log)
}

#[cfg(test)]
fn abcde() -> HandleVector<usize> {
    HandleVector::from_slice(&[1, 2, 3, 4, 5]).unwrap()
}

#[test]
fn push_pop_top() {
    let mut v: HandleVector<usize> = HandleVector::new().unwrap();
    assert_eq!(v.capacity(), DEFAULT_CAPACITY);
    assert_eq!(v.pop(), None);
    assert_eq!(v.top(), None);

    for i in 1..=20 {
        v.push(i).unwrap();
    }

    assert_eq!(v.len(), 20);
    assert!(v.capacity() >= 20);
    assert_eq!(v.top(), Some(20));
    assert_eq!(v.pop(), Some(20));
    assert_eq!(v.pop(), Some(19));
    assert_eq!(v.len(), 18);
}

#[test]
fn zero_capacity_is_one() {
    let v: HandleVector<usize> = HandleVector::with_capacity(0).unwrap();
    assert_eq!(v.capacity(), 1);
}

#[test]
fn pop_does_not_destroy() {
    let (destructor, log) = recording_destructor();
    let mut v = abcde();
    v.set_destructor(Some(destructor));

    assert_eq!(v.pop(), Some(5));
    assert!(log.borrow().is_empty());
}

#[test]
fn negative_indexing() {
    let v = abcde();
    for i in 0..5isize {
        assert_eq!(v.at(i), v.at(i - 5));
    }
    assert_eq!(v.at(-1), Some(5));
    assert_eq!(v.at(5), None);
    assert_eq!(v.at(-6), None);
}

#[test]
fn set_does_not_destroy() {
    let (destructor, log) = recording_destructor();
    let mut v = abcde();
    v.set_destructor(Some(destructor));

    v.set(-1, 50).unwrap();
    v.set(0, 10).unwrap();
    assert_eq!(v.as_slice(), &[10, 2, 3, 4, 50]);
    assert!(log.borrow().is_empty());

    assert_eq!(v.set(5, 0), Err(Error::IndexOutOfRange { index: 5, len: 5 }));
}

#[test]
fn swap() {
    let mut v = abcde();
    v.swap(0, -1).unwrap();
    assert_eq!(v.as_slice(), &[5, 2, 3, 4, 1]);
    assert!(v.swap(0, 7).is_err());
    assert_eq!(v.as_slice(), &[5, 2, 3, 4, 1]);
}

#[test]
fn reverse() {
    let mut v = abcde();
    v.reverse();
    assert_eq!(v.as_slice(), &[5, 4, 3, 2, 1]);
    v.reverse_section(1, -1);
    assert_eq!(v.as_slice(), &[5, 2, 3, 4, 1]);
    // Inverted section is a no-op.
    v.reverse_section(3, 1);
    assert_eq!(v.as_slice(), &[5, 2, 3, 4, 1]);
}

#[test]
fn rotate() {
    let mut v = abcde();
    v.rotate(2);
    assert_eq!(v.as_slice(), &[4, 5, 1, 2, 3]);
    v.rotate(-2);
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
    v.rotate(-1);
    assert_eq!(v.as_slice(), &[2, 3, 4, 5, 1]);
    v.rotate(11);
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);

    let mut empty: HandleVector<usize> = HandleVector::new().unwrap();
    empty.rotate(3);
    assert!(empty.is_empty());
}

#[test]
fn shift_insert() {
    let mut v = abcde();
    v.shift(1, 2).unwrap();
    assert_eq!(v.as_slice(), &[1, 0, 0, 2, 3, 4, 5]);
    assert_eq!(v.len(), 7);

    // Anchor at the end.
    v.shift(7, 1).unwrap();
    assert_eq!(v.as_slice(), &[1, 0, 0, 2, 3, 4, 5, 0]);

    v.shift(-1, 1).unwrap();
    assert_eq!(v.as_slice(), &[1, 0, 0, 2, 3, 4, 5, 0, 0]);

    assert!(v.shift(10, 1).is_err());
    assert_eq!(v.len(), 9);
}

#[test]
fn shift_remove() {
    let (destructor, log) = recording_destructor();
    let mut v = abcde();
    v.set_destructor(Some(destructor));

    v.shift(1, -2).unwrap();
    assert_eq!(v.as_slice(), &[1, 4, 5]);
    assert_eq!(*log.borrow(), vec![2, 3]);

    // Clamped to the items after the anchor.
    v.shift(-2, -10).unwrap();
    assert_eq!(v.as_slice(), &[1]);
    assert_eq!(*log.borrow(), vec![2, 3, 4, 5]);

    v.shift(0, 0).unwrap();
    assert_eq!(v.as_slice(), &[1]);
}

#[test]
fn discard_and_clear() {
    let (destructor, log) = recording_destructor();
    let mut v = abcde();
    v.set_destructor(Some(destructor));

    v.discard(2);
    assert_eq!(v.as_slice(), &[1, 2, 3]);
    assert_eq!(*log.borrow(), vec![4, 5]);

    v.discard(10);
    assert!(v.is_empty());
    assert_eq!(*log.borrow(), vec![4, 5, 1, 2, 3]);

    let cap = v.capacity();
    v.push(7).unwrap();
    v.clear();
    assert_eq!(v.capacity(), cap);
    assert_eq!(*log.borrow(), vec![4, 5, 1, 2, 3, 7]);
}

#[test]
fn resize_truncates() {
    let (destructor, log) = recording_destructor();
    let mut v = abcde();
    v.set_destructor(Some(destructor));

    v.resize(3).unwrap();
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.as_slice(), &[1, 2, 3]);
    assert_eq!(*log.borrow(), vec![4, 5]);

    v.resize(0).unwrap();
    assert_eq!(v.capacity(), 1);
    assert_eq!(v.as_slice(), &[1]);

    v.resize(32).unwrap();
    assert_eq!(v.capacity(), 32);
    v.shrink_to_fit().unwrap();
    assert_eq!(v.capacity(), 1);
}

#[test]
fn copy_does_not_own() {
    let (destructor, log) = recording_destructor();
    let mut v: HandleVector<usize, &'static str> = HandleVector::with_capacity(16).unwrap();
    v.extend_from_slice(&[1, 2, 3]).unwrap();
    v.set_destructor(Some(destructor));
    v.set_context(Some("ctx"));

    let copy = v.copy().unwrap();
    assert_eq!(copy.capacity(), 16);
    assert_eq!(copy.as_slice(), &[1, 2, 3]);
    assert_eq!(copy.context(), Some(&"ctx"));
    assert!(!copy.has_destructor());

    drop(copy);
    assert!(log.borrow().is_empty());

    assert_eq!(v.destroy(), Some("ctx"));
    assert_eq!(*log.borrow(), vec![1, 2, 3]);
}

#[test]
fn extend_moves() {
    let (destructor, log) = recording_destructor();
    let mut a = abcde();
    let mut b: HandleVector<usize> = HandleVector::from_slice(&[6, 7]).unwrap();
    b.set_destructor(Some(destructor));

    a.extend(&mut b).unwrap();
    assert_eq!(a.as_slice(), &[1, 2, 3, 4, 5, 6, 7]);
    assert!(b.is_empty());

    drop(b);
    assert!(log.borrow().is_empty());
}

#[test]
fn concat_copies() {
    let mut a = abcde();
    let b: HandleVector<usize> = HandleVector::from_slice(&[6, 7]).unwrap();

    a.concat(&b).unwrap();
    assert_eq!(a.as_slice(), &[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(b.as_slice(), &[6, 7]);

    let mut c: HandleVector<usize> = HandleVector::from_slice(&[1, 2]).unwrap();
    c.concat_self().unwrap();
    assert_eq!(c.as_slice(), &[1, 2, 1, 2]);
}

#[test]
fn slices() {
    let v = abcde();

    let s = v.slice(-3, -1).unwrap();
    assert_eq!(s.as_slice(), &[3, 4]);
    assert_eq!(s.capacity(), 2);

    let r = v.rslice(-3, -1).unwrap();
    assert_eq!(r.as_slice(), &[4, 3]);

    let empty = v.slice(3, 1).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.capacity(), 1);

    assert_eq!(v.slice(0, 100).unwrap().as_slice(), v.as_slice());
}

#[test]
fn teardown_order() {
    let (destructor, log) = recording_destructor();
    let mut v = abcde();
    v.set_destructor(Some(destructor));
    drop(v);
    assert_eq!(*log.borrow(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn destroy_item() {
    let (destructor, log) = recording_destructor();
    let mut v: HandleVector<usize> = HandleVector::new().unwrap();
    v.destroy_item(3);
    v.set_destructor(Some(destructor));
    v.destroy_item(4);
    assert_eq!(*log.borrow(), vec![4]);
    assert!(v.is_empty());

    let previous = v.set_destructor(None);
    assert!(previous.is_some());
    assert!(!v.has_destructor());
}

#[test]
fn comparator_reset() {
    let mut v = abcde();
    v.set_comparator(Some(Rc::new(|a: &usize, b: &usize| b.cmp(a))));
    assert_eq!((v.comparator())(&1, &2), Ordering::Greater);
    v.set_comparator(None);
    assert_eq!((v.comparator())(&1, &2), Ordering::Less);
}
