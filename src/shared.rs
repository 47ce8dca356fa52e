use core::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use allocator_api2::alloc::{Allocator, Global};

use crate::error::Error;
use crate::handle::Handle;
use crate::vector::HandleVector;

/// A reference counted handle to a [`HandleVector`].
///
/// The count is not atomic: shared vectors cannot be sent to other threads. The vector is
/// torn down when the last reference is released.
pub struct SharedVector<T: Handle, C = (), A: Allocator = Global> {
    inner: Rc<RefCell<HandleVector<T, C, A>>>,
}

/// Outcome of [`SharedVector::dref`].
#[derive(Debug, PartialEq, Eq)]
pub enum Release<C> {
    /// Other references are still alive.
    Retained(usize),
    /// This was the last reference. The vector has been torn down and its context
    /// is handed back.
    Destroyed(Option<C>),
}

impl<T: Handle, C, A: Allocator> SharedVector<T, C, A> {
    /// Wraps a vector with a reference count of one.
    pub fn new(vector: HandleVector<T, C, A>) -> Self {
        SharedVector {
            inner: Rc::new(RefCell::new(vector)),
        }
    }

    /// Creates a new reference without allocating.
    ///
    /// Equivalent to `Clone::clone`.
    #[inline]
    pub fn iref(&self) -> Self {
        SharedVector {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Releases this reference, tearing the vector down if it was the last one.
    pub fn dref(self) -> Release<C> {
        match Rc::try_unwrap(self.inner) {
            Ok(cell) => Release::Destroyed(cell.into_inner().destroy()),
            Err(inner) => Release::Retained(Rc::strong_count(&inner) - 1),
        }
    }

    /// Number of references to the vector.
    #[inline]
    pub fn refs(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    #[inline]
    pub fn is_unique(&self) -> bool {
        self.refs() == 1
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Panics if the vector is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, HandleVector<T, C, A>> {
        self.inner.borrow()
    }

    /// Panics if the vector is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, HandleVector<T, C, A>> {
        self.inner.borrow_mut()
    }

    /// Takes the vector back if this is the only reference.
    pub fn try_unwrap(self) -> Result<HandleVector<T, C, A>, Self> {
        Rc::try_unwrap(self.inner)
            .map(RefCell::into_inner)
            .map_err(|inner| SharedVector { inner })
    }

    /// Moves every item of `other` to the end of this vector.
    ///
    /// Does nothing if both refer to the same vector.
    pub fn extend(&self, other: &Self) -> Result<(), Error> {
        if self.ptr_eq(other) {
            return Ok(());
        }

        self.borrow_mut().extend(&mut *other.borrow_mut())
    }

    /// Appends a copy of every item of `other`, which may be this same vector.
    pub fn concat(&self, other: &Self) -> Result<(), Error> {
        if self.ptr_eq(other) {
            return self.borrow_mut().concat_self();
        }

        self.borrow_mut().concat(&*other.borrow())
    }
}

impl<T: Handle, C, A: Allocator> Clone for SharedVector<T, C, A> {
    fn clone(&self) -> Self {
        self.iref()
    }
}

impl<T: Handle, C, A: Allocator> From<HandleVector<T, C, A>> for SharedVector<T, C, A> {
    fn from(vector: HandleVector<T, C, A>) -> Self {
        SharedVector::new(vector)
    }
}

#[test]
fn ref_counting() {
    use std::cell::Cell;

    let destroyed = Rc::new(Cell::new(0));
    let counter = destroyed.clone();

    let v = HandleVector::<usize, &str>::builder()
        .destructor(move |_| counter.set(counter.get() + 1))
        .context("ctx")
        .build()
        .unwrap();

    let a = SharedVector::new(v);
    a.borrow_mut().extend_from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(a.refs(), 1);
    assert!(a.is_unique());

    let b = a.iref();
    let c = b.clone();
    assert_eq!(a.refs(), 3);
    assert!(a.ptr_eq(&c));

    assert_eq!(b.dref(), Release::Retained(2));
    assert_eq!(c.dref(), Release::Retained(1));
    assert_eq!(destroyed.get(), 0);
    assert_eq!(a.borrow().as_slice(), &[1, 2, 3]);

    assert_eq!(a.dref(), Release::Destroyed(Some("ctx")));
    assert_eq!(destroyed.get(), 3);
}

#[test]
fn try_unwrap() {
    let a: SharedVector<usize> = SharedVector::new(HandleVector::from_slice(&[1, 2]).unwrap());
    let b = a.iref();
    let a = a.try_unwrap().unwrap_err();
    drop(b);
    let v = a.try_unwrap().ok().unwrap();
    assert_eq!(v.as_slice(), &[1, 2]);
}

#[test]
fn self_extend_and_concat() {
    let a: SharedVector<usize> = SharedVector::new(HandleVector::from_slice(&[1, 2]).unwrap());
    let alias = a.iref();

    a.extend(&alias).unwrap();
    assert_eq!(a.borrow().as_slice(), &[1, 2]);

    a.concat(&alias).unwrap();
    assert_eq!(a.borrow().as_slice(), &[1, 2, 1, 2]);

    let b: SharedVector<usize> = SharedVector::new(HandleVector::from_slice(&[7]).unwrap());
    a.extend(&b).unwrap();
    assert_eq!(a.borrow().as_slice(), &[1, 2, 1, 2, 7]);
    assert!(b.borrow().is_empty());
}
