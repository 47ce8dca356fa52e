use core::alloc::Layout;

use thiserror::Error;

/// Errors reported by fallible vector operations.
///
/// Lookups that can only fail because of a bad index return `Option` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested capacity does not fit in `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator could not provide the requested memory.
    #[error("allocator failed to provide {} bytes (align {})", .layout.size(), .layout.align())]
    Allocator {
        /// The layout that was passed to the allocator.
        layout: Layout,
    },

    /// An index or anchor resolved outside of the vector.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}

impl Error {
    /// Returns `true` for the two allocation failure variants.
    pub fn is_alloc_error(&self) -> bool {
        matches!(self, Error::CapacityOverflow | Error::Allocator { .. })
    }
}

#[test]
fn messages() {
    let layout = Layout::from_size_align(32, 8).unwrap();
    assert_eq!(
        Error::Allocator { layout }.to_string(),
        "allocator failed to provide 32 bytes (align 8)"
    );
    assert_eq!(
        Error::IndexOutOfRange { index: -6, len: 5 }.to_string(),
        "index -6 out of range for length 5"
    );
    assert!(Error::CapacityOverflow.is_alloc_error());
    assert!(!Error::IndexOutOfRange { index: 0, len: 0 }.is_alloc_error());
}
