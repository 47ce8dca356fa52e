use core::iter::FusedIterator;

use allocator_api2::alloc::Allocator;

use crate::handle::Handle;
use crate::vector::HandleVector;

/// A view of a vector's items as they were when the snapshot was taken.
///
/// The cursor `i` starts at 0 and can be moved freely; iterating the snapshot advances it.
/// The snapshot borrows the vector, so the vector cannot be mutated while it is alive.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'l, T> {
    pub i: usize,
    items: &'l [T],
}

impl<'l, T: Copy> Snapshot<'l, T> {
    /// Length of the vector when the snapshot was taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &'l [T] {
        self.items
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    /// The item under the cursor.
    #[inline]
    pub fn current(&self) -> Option<T> {
        self.items.get(self.i).copied()
    }
}

impl<'l, T: Copy> Iterator for Snapshot<'l, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.current()?;
        self.i += 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.i);
        (remaining, Some(remaining))
    }
}

impl<'l, T: Copy> FusedIterator for Snapshot<'l, T> {}

impl<T: Handle, C, A: Allocator> HandleVector<T, C, A> {
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            i: 0,
            items: self.as_slice(),
        }
    }
}

#[test]
fn iterate() {
    let v: HandleVector<usize> = HandleVector::from_slice(&[1, 2, 3]).unwrap();
    let mut snap = v.snapshot();
    assert_eq!(snap.len(), 3);
    assert_eq!(snap.as_ptr(), v.as_ptr());
    assert_eq!(snap.current(), Some(1));

    snap.i = 1;
    assert_eq!(snap.len(), 3);
    assert_eq!(snap.collect::<Vec<_>>(), vec![2, 3]);

    let total: usize = v.snapshot().sum();
    assert_eq!(total, 6);
}

#[test]
fn cursor_past_the_end() {
    let v: HandleVector<usize> = HandleVector::from_slice(&[1]).unwrap();
    let mut snap = v.snapshot();
    snap.i = 5;
    assert_eq!(snap.current(), None);
    assert_eq!(snap.size_hint(), (0, Some(0)));
    assert_eq!(snap.next(), None);
}
