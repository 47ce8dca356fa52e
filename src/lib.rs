//! A resizable vector of opaque handles.
//!
//! [`HandleVector`] stores fixed-width handles (raw pointers, ids, ...) that it never
//! interprets. It carries a pluggable ordering used by the sorting and searching
//! algorithms, an optional destructor called on every item the vector drops, and a
//! caller-controlled context.
//!
//! Indices are signed: `-1` is the last item. Sections are half-open: `(index1, index2)`
//! includes `index1` and excludes `index2`. Empty and inverted sections are no-ops.
//!
//! Memory comes from an [`allocator_api2`] allocator and allocation failures are reported
//! as errors rather than aborting.
//!
//! ```
//! use handle_vector::HandleVector;
//!
//! let mut v: HandleVector<usize> = HandleVector::new().unwrap();
//! for i in [5, 3, 8, 1] {
//!     v.push(i).unwrap();
//! }
//!
//! assert_eq!(v.at(-1), Some(1));
//! v.sort();
//! assert_eq!(v.binary_search(&5), Some(2));
//! assert_eq!(v.slice(1, -1).unwrap().as_slice(), &[3, 5]);
//! ```

mod algorithms;
mod builder;
mod error;
mod handle;
mod raw;
mod shared;
mod snapshot;
mod util;
mod vector;

pub mod index;

pub use allocator_api2::alloc::{Allocator, Global};

pub use builder::{VectorBuilder, DEFAULT_CAPACITY};
pub use error::Error;
pub use handle::{identity_order, Handle};
pub use shared::{Release, SharedVector};
pub use snapshot::Snapshot;
pub use vector::{Comparator, Destructor, HandleVector};
