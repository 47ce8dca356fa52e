use core::cmp::Ordering;
use std::rc::Rc;

use allocator_api2::alloc::{Allocator, Global};

use crate::error::Error;
use crate::handle::Handle;
use crate::vector::{Comparator, Destructor, HandleVector};

/// Capacity of vectors created without an explicit one.
pub const DEFAULT_CAPACITY: usize = 7;

/// Construction-time configuration of a [`HandleVector`].
pub struct VectorBuilder<T: Handle, C = ()> {
    capacity: usize,
    comparator: Option<Comparator<T>>,
    destructor: Option<Destructor<T>>,
    context: Option<C>,
}

impl<T: Handle, C> Default for VectorBuilder<T, C> {
    fn default() -> Self {
        VectorBuilder {
            capacity: DEFAULT_CAPACITY,
            comparator: None,
            destructor: None,
            context: None,
        }
    }
}

impl<T: Handle, C> VectorBuilder<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting capacity. Zero is rounded up to one.
    pub fn capacity(mut self, cap: usize) -> Self {
        self.capacity = cap;
        self
    }

    pub fn comparator<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        self.comparator = Some(Rc::new(cmp));
        self
    }

    pub fn destructor<F>(mut self, destroy: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        self.destructor = Some(Box::new(destroy));
        self
    }

    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    pub fn build(self) -> Result<HandleVector<T, C>, Error> {
        self.build_in(Global)
    }

    pub fn build_in<A: Allocator>(self, allocator: A) -> Result<HandleVector<T, C, A>, Error> {
        let mut v = HandleVector::with_capacity_in(self.capacity, allocator)?;
        v.set_comparator(self.comparator);
        v.set_destructor(self.destructor);
        v.set_context(self.context);

        Ok(v)
    }
}

impl<T: Handle, C> HandleVector<T, C, Global> {
    pub fn builder() -> VectorBuilder<T, C> {
        VectorBuilder::new()
    }
}

#[test]
fn defaults() {
    let v: HandleVector<usize> = VectorBuilder::new().build().unwrap();
    assert_eq!(v.capacity(), DEFAULT_CAPACITY);
    assert!(!v.has_destructor());
    assert!(v.context().is_none());
    assert_eq!((v.comparator())(&1, &2), Ordering::Less);
}

#[test]
fn configured() {
    use std::cell::Cell;

    let destroyed = Rc::new(Cell::new(0));
    let counter = destroyed.clone();

    let mut v = HandleVector::<usize, u32>::builder()
        .capacity(0)
        .comparator(|a, b| b.cmp(a))
        .destructor(move |_| counter.set(counter.get() + 1))
        .context(42)
        .build()
        .unwrap();

    assert_eq!(v.capacity(), 1);
    assert_eq!(v.context(), Some(&42));

    v.extend_from_slice(&[1, 3, 2]).unwrap();
    v.sort();
    assert_eq!(v.as_slice(), &[3, 2, 1]);

    assert_eq!(v.destroy(), Some(42));
    assert_eq!(destroyed.get(), 3);
}
