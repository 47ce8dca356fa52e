//! Index and section resolution.
//!
//! Every operation taking a signed index or a section goes through these functions so that
//! negative indices, out of range values and inverted sections are handled the same way
//! everywhere.

use core::ops::Range;

/// Maps a possibly negative index to an offset without checking it.
///
/// Negative values count from the end: `-1` is the last item.
#[inline]
fn normalize(index: isize, len: usize) -> isize {
    if index < 0 {
        // len <= isize::MAX since the backing array never exceeds isize::MAX bytes.
        len as isize + index
    } else {
        index
    }
}

/// Resolves `index` to an offset in `[0, len)`, or `None` if it is out of range.
#[inline]
pub fn resolve(index: isize, len: usize) -> Option<usize> {
    let i = normalize(index, len);
    if i >= 0 && (i as usize) < len {
        Some(i as usize)
    } else {
        None
    }
}

/// Resolves an insertion or removal anchor to an offset in `[0, len]`.
///
/// Unlike [`resolve`], the anchor may be one past the last item.
#[inline]
pub fn resolve_anchor(index: isize, len: usize) -> Option<usize> {
    let i = normalize(index, len);
    if i >= 0 && (i as usize) <= len {
        Some(i as usize)
    } else {
        None
    }
}

/// Resolves the half-open section `[index1, index2)`.
///
/// Both bounds are normalized then clamped to `[0, len]`. An inverted section resolves
/// to an empty range.
#[inline]
pub fn resolve_section(index1: isize, index2: isize, len: usize) -> Range<usize> {
    let clamp = |index: isize| normalize(index, len).clamp(0, len as isize) as usize;
    let start = clamp(index1);
    let end = clamp(index2);

    if start >= end {
        return start..start;
    }

    start..end
}

#[test]
fn single_index() {
    assert_eq!(resolve(0, 5), Some(0));
    assert_eq!(resolve(4, 5), Some(4));
    assert_eq!(resolve(5, 5), None);
    assert_eq!(resolve(-1, 5), Some(4));
    assert_eq!(resolve(-5, 5), Some(0));
    assert_eq!(resolve(-6, 5), None);
    assert_eq!(resolve(0, 0), None);
    assert_eq!(resolve(-1, 0), None);
    assert_eq!(resolve(isize::MIN, 5), None);
    assert_eq!(resolve(isize::MAX, 5), None);
}

#[test]
fn anchors() {
    assert_eq!(resolve_anchor(5, 5), Some(5));
    assert_eq!(resolve_anchor(6, 5), None);
    assert_eq!(resolve_anchor(0, 0), Some(0));
    assert_eq!(resolve_anchor(-1, 5), Some(4));
    assert_eq!(resolve_anchor(-6, 5), None);
}

#[test]
fn sections() {
    assert_eq!(resolve_section(0, 5, 5), 0..5);
    assert_eq!(resolve_section(-3, -1, 5), 2..4);
    assert_eq!(resolve_section(1, -1, 5), 1..4);
    // Clamped.
    assert_eq!(resolve_section(-10, 10, 5), 0..5);
    assert_eq!(resolve_section(3, 100, 5), 3..5);
    // Empty and inverted.
    assert!(resolve_section(2, 2, 5).is_empty());
    assert!(resolve_section(4, 1, 5).is_empty());
    assert!(resolve_section(-1, -3, 5).is_empty());
    assert!(resolve_section(0, 3, 0).is_empty());
}
