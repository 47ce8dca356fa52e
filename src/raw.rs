use core::ptr::NonNull;

use allocator_api2::alloc::Allocator;

use crate::error::Error;
use crate::util::{self, nnptr};

/// The backing array of a vector.
///
/// Does not know its length and does not keep a reference to its allocator: both are
/// managed by the owning vector, which must pass the same allocator to every call.
pub struct RawStore<T> {
    data: NonNull<T>,
    cap: usize,
}

impl<T: Copy> RawStore<T> {
    /// A store that owns no memory.
    #[inline]
    pub fn dangling() -> Self {
        RawStore {
            data: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocates an uninitialized array of `cap` items.
    pub fn try_allocate_in<A: Allocator>(cap: usize, allocator: &A) -> Result<Self, Error> {
        debug_assert!(!util::is_zst::<T>());
        if cap == 0 {
            return Ok(Self::dangling());
        }

        let layout = util::array_layout::<T>(cap)?;
        let allocation = allocator.allocate(layout).map_err(|_| {
            log::debug!("failed to allocate {} items ({} bytes)", cap, layout.size());
            Error::Allocator { layout }
        })?;

        Ok(RawStore {
            data: allocation.cast::<T>(),
            cap,
        })
    }

    /// Grows or shrinks the array to `new_cap` items, keeping the first `min(cap, new_cap)`.
    ///
    /// The store is left untouched if the allocator fails.
    ///
    /// # Safety
    ///
    /// The provided allocator must be the one this store was created with.
    pub unsafe fn try_reallocate_in<A: Allocator>(
        &mut self,
        new_cap: usize,
        allocator: &A,
    ) -> Result<(), Error> {
        let old_cap = self.cap;
        if new_cap == old_cap {
            return Ok(());
        }

        if old_cap == 0 {
            *self = Self::try_allocate_in(new_cap, allocator)?;
            return Ok(());
        }

        if new_cap == 0 {
            self.deallocate_in(allocator);
            return Ok(());
        }

        let old_layout = util::array_layout::<T>(old_cap)?;
        let new_layout = util::array_layout::<T>(new_cap)?;
        let old_alloc = self.data.cast::<u8>();

        let result = if new_layout.size() >= old_layout.size() {
            allocator.grow(old_alloc, old_layout, new_layout)
        } else {
            allocator.shrink(old_alloc, old_layout, new_layout)
        };

        let new_alloc = result.map_err(|_| {
            log::debug!("failed to reallocate from {} to {} items", old_cap, new_cap);
            Error::Allocator { layout: new_layout }
        })?;

        log::trace!("reallocated from {} to {} items", old_cap, new_cap);

        self.data = new_alloc.cast::<T>();
        self.cap = new_cap;

        Ok(())
    }

    /// Releases the array, leaving the store in its dangling state.
    ///
    /// It is safe (no-op) to call this on a store that is already dangling.
    ///
    /// # Safety
    ///
    /// The provided allocator must be the one this store was created with.
    pub unsafe fn deallocate_in<A: Allocator>(&mut self, allocator: &A) {
        if self.cap == 0 {
            return;
        }

        if let Ok(layout) = util::array_layout::<T>(self.cap) {
            allocator.deallocate(self.data.cast::<u8>(), layout);
        }

        *self = Self::dangling();
    }

    #[inline]
    /// Returns the total number of items the store can hold.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// # Safety
    ///
    /// The first `len` items must be initialized.
    #[inline]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.cap);
        core::slice::from_raw_parts(self.data.as_ptr(), len)
    }

    /// # Safety
    ///
    /// The first `len` items must be initialized.
    #[inline]
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.cap);
        core::slice::from_raw_parts_mut(self.data.as_ptr(), len)
    }

    #[inline(always)]
    unsafe fn item_ptr(&self, index: usize) -> NonNull<T> {
        nnptr::add(self.data, index)
    }

    /// # Safety
    ///
    /// `index` must be less than the capacity.
    #[inline]
    pub unsafe fn write_item(&mut self, index: usize, val: T) {
        debug_assert!(index < self.cap);
        nnptr::write(self.item_ptr(index), val);
    }

    /// # Safety
    ///
    /// The item at `index` must be initialized.
    #[inline]
    pub unsafe fn read_item(&self, index: usize) -> T {
        debug_assert!(index < self.cap);
        nnptr::read(self.item_ptr(index))
    }

    /// Moves `count` items from `src` to `dst`. The two ranges may overlap.
    ///
    /// # Safety
    ///
    /// Both ranges must be within the capacity.
    #[inline]
    pub unsafe fn move_items(&mut self, src: usize, dst: usize, count: usize) {
        debug_assert!(src + count <= self.cap);
        debug_assert!(dst + count <= self.cap);
        nnptr::copy(self.item_ptr(src), self.item_ptr(dst), count);
    }

    /// Copies `items` into the store starting at `dst`.
    ///
    /// # Safety
    ///
    /// `dst + items.len()` must be within the capacity and `items` must not alias the store.
    #[inline]
    pub unsafe fn write_slice(&mut self, dst: usize, items: &[T]) {
        debug_assert!(dst + items.len() <= self.cap);
        let src = NonNull::new_unchecked(items.as_ptr() as *mut T);
        nnptr::copy_nonoverlapping(src, self.item_ptr(dst), items.len());
    }

    /// Fills `count` slots starting at `dst` with `val`.
    ///
    /// # Safety
    ///
    /// `dst + count` must be within the capacity.
    #[inline]
    pub unsafe fn fill(&mut self, dst: usize, count: usize, val: T) {
        debug_assert!(dst + count <= self.cap);
        for i in dst..dst + count {
            self.write_item(i, val);
        }
    }
}

#[cfg(test)]
use allocator_api2::alloc::Global;

#[test]
fn allocate_grow_shrink() {
    let allocator = Global;
    let mut store = RawStore::<u64>::try_allocate_in(2, &allocator).unwrap();
    assert_eq!(store.capacity(), 2);

    unsafe {
        store.write_item(0, 10);
        store.write_item(1, 11);

        store.try_reallocate_in(8, &allocator).unwrap();
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.as_slice(2), &[10, 11]);

        store.fill(2, 3, 0);
        store.move_items(0, 3, 2);
        assert_eq!(store.as_slice(5), &[10, 11, 0, 10, 11]);

        store.try_reallocate_in(1, &allocator).unwrap();
        assert_eq!(store.as_slice(1), &[10]);

        store.deallocate_in(&allocator);
        assert_eq!(store.capacity(), 0);
        // No-op on a dangling store.
        store.deallocate_in(&allocator);
    }
}

#[test]
fn zero_capacity_is_dangling() {
    let allocator = Global;
    let mut store = RawStore::<usize>::try_allocate_in(0, &allocator).unwrap();
    assert_eq!(store.capacity(), 0);

    unsafe {
        store.try_reallocate_in(4, &allocator).unwrap();
        assert_eq!(store.capacity(), 4);
        store.write_slice(0, &[1, 2, 3]);
        assert_eq!(store.read_item(2), 3);
        store.deallocate_in(&allocator);
    }
}
