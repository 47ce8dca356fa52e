use core::cmp::Ordering;
use core::ptr::{self, NonNull};

/// An opaque, fixed-width value stored by a vector.
///
/// The vector never looks at the bit pattern of a handle, except through
/// [`Handle::addr`] for the default identity ordering.
pub trait Handle: Copy + 'static {
    /// The value used to fill the gaps opened by `shift`.
    const NULL: Self;

    /// The raw identity of the handle (its address for pointers).
    fn addr(self) -> usize;

    #[inline]
    fn is_null(self) -> bool {
        self.addr() == Self::NULL.addr()
    }
}

impl<U: 'static> Handle for *const U {
    const NULL: Self = ptr::null();

    #[inline]
    fn addr(self) -> usize {
        self as usize
    }
}

impl<U: 'static> Handle for *mut U {
    const NULL: Self = ptr::null_mut();

    #[inline]
    fn addr(self) -> usize {
        self as usize
    }
}

impl<U: 'static> Handle for Option<NonNull<U>> {
    const NULL: Self = None;

    #[inline]
    fn addr(self) -> usize {
        match self {
            Some(p) => p.as_ptr() as usize,
            None => 0,
        }
    }
}

macro_rules! impl_integer_handle {
    ($($ty:ty),*) => {
        $(
            impl Handle for $ty {
                const NULL: Self = 0;

                #[inline]
                fn addr(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_integer_handle!(usize, u64, u32, isize, i64);

/// The default ordering: compares the raw identity of two handles.
pub fn identity_order<T: Handle>(a: &T, b: &T) -> Ordering {
    a.addr().cmp(&b.addr())
}

#[test]
fn pointer_identity() {
    let values = [1u8, 2, 3];
    let a: *const u8 = &values[0];
    let b: *const u8 = &values[2];

    assert_eq!(identity_order(&a, &b), Ordering::Less);
    assert_eq!(identity_order(&b, &a), Ordering::Greater);
    assert_eq!(identity_order(&a, &a), Ordering::Equal);
    assert!(<*const u8 as Handle>::NULL.is_null());
    assert!(!a.is_null());
}

#[test]
fn option_non_null() {
    let mut value = 5u32;
    let p = NonNull::new(&mut value as *mut u32);
    assert!(!p.is_null());
    assert!(<Option<NonNull<u32>> as Handle>::NULL.is_null());
    assert_eq!(p.addr(), &mut value as *mut u32 as usize);
}

#[test]
fn integers() {
    assert_eq!(identity_order(&3usize, &7usize), Ordering::Less);
    assert!(0u64.is_null());
    // Negative integers compare by their bit pattern.
    assert_eq!(identity_order(&-1i64, &1i64), Ordering::Greater);
}
