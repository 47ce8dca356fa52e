use core::alloc::Layout;
use core::mem;

use crate::error::Error;

pub(crate) const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

/// Layout of a backing array holding `n` items.
pub fn array_layout<T>(n: usize) -> Result<Layout, Error> {
    Layout::array::<T>(n).map_err(|_| Error::CapacityOverflow)
}

/// Computes the capacity to grow to so that `additional` more items fit after `len`.
///
/// Capacity at least doubles (`2 * cap + 1`) so that pushing is amortized O(1).
pub fn grow_amortized(cap: usize, len: usize, additional: usize) -> Result<usize, Error> {
    let required = len.checked_add(additional).ok_or(Error::CapacityOverflow)?;
    let new_cap = cap.saturating_mul(2).saturating_add(1).max(required);

    const MAX: usize = isize::MAX as usize;

    if new_cap > MAX {
        if required <= MAX {
            return Ok(required);
        }

        return Err(Error::CapacityOverflow);
    }

    Ok(new_cap)
}

// Waiting for `non_null_convenience` to be stabilized.
pub mod nnptr {
    use core::ptr::{self, NonNull};

    #[inline(always)]
    pub unsafe fn read<T>(src: NonNull<T>) -> T {
        ptr::read(src.as_ptr())
    }

    #[inline(always)]
    pub unsafe fn write<T>(dst: NonNull<T>, val: T) {
        ptr::write(dst.as_ptr(), val)
    }

    /// Overlapping copy (memmove).
    #[inline(always)]
    pub unsafe fn copy<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
        ptr::copy(src.as_ptr(), dst.as_ptr(), count)
    }

    #[inline(always)]
    pub unsafe fn copy_nonoverlapping<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), count)
    }

    #[inline(always)]
    pub unsafe fn add<T>(p: NonNull<T>, count: usize) -> NonNull<T> {
        NonNull::new_unchecked(p.as_ptr().add(count))
    }
}

#[test]
fn grow_doubles_plus_one() {
    assert_eq!(grow_amortized(7, 7, 1), Ok(15));
    assert_eq!(grow_amortized(1, 1, 1), Ok(3));
    // A large request wins over doubling.
    assert_eq!(grow_amortized(4, 4, 100), Ok(104));
}

#[test]
fn grow_overflow() {
    assert_eq!(grow_amortized(8, usize::MAX, 1), Err(Error::CapacityOverflow));
    assert_eq!(
        grow_amortized(isize::MAX as usize, isize::MAX as usize, 1),
        Err(Error::CapacityOverflow)
    );
    assert_eq!(
        grow_amortized(isize::MAX as usize - 2, isize::MAX as usize - 2, 1),
        Ok(isize::MAX as usize - 1)
    );
}

#[test]
fn layout_overflow() {
    assert_eq!(array_layout::<u64>(usize::MAX), Err(Error::CapacityOverflow));
    assert_eq!(array_layout::<u64>(4).map(|l| l.size()), Ok(32));
}
