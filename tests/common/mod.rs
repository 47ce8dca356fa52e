#![allow(dead_code)]

use core::alloc::Layout;
use core::ptr::NonNull;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use allocator_api2::alloc::{AllocError, Allocator, Global};
use handle_vector::Destructor;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An allocator that serves a limited number of allocations, then fails.
///
/// Reallocations count as allocations. Clones share the same budget.
#[derive(Clone, Default)]
pub struct Budget {
    remaining: Rc<Cell<usize>>,
}

impl Budget {
    pub fn new(allocations: usize) -> Self {
        Budget {
            remaining: Rc::new(Cell::new(allocations)),
        }
    }

    pub fn set(&self, allocations: usize) {
        self.remaining.set(allocations);
    }

    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

unsafe impl Allocator for Budget {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(AllocError);
        }

        self.remaining.set(remaining - 1);
        Global.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        Global.deallocate(ptr, layout)
    }
}

/// A destructor that records the items it is called on.
pub fn recorder() -> (Destructor<usize>, Rc<RefCell<Vec<usize>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();

    (Box::new(move |item| sink.borrow_mut().push(item)), log)
}
