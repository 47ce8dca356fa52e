mod common;

use common::{init_logger, recorder, Budget};
use handle_vector::{Error, HandleVector, VectorBuilder};

type BudgetVector = HandleVector<usize, (), Budget>;

fn filled(budget: &Budget, cap: usize, items: &[usize]) -> BudgetVector {
    let mut v = HandleVector::with_capacity_in(cap, budget.clone()).unwrap();
    v.extend_from_slice(items).unwrap();
    v
}

#[test]
fn creation_failure() {
    init_logger();

    let budget = Budget::new(0);
    let result: Result<BudgetVector, Error> = HandleVector::with_capacity_in(4, budget.clone());
    assert!(matches!(result, Err(Error::Allocator { .. })));

    let result: Result<BudgetVector, Error> = VectorBuilder::new().build_in(budget);
    assert!(result.unwrap_err().is_alloc_error());
}

#[test]
fn push_failure_leaves_vector_unchanged() {
    init_logger();

    let budget = Budget::new(1);
    let mut v = filled(&budget, 2, &[1, 2]);
    assert_eq!(budget.remaining(), 0);

    assert!(v.push(3).is_err());
    assert_eq!(v.as_slice(), &[1, 2]);
    assert_eq!(v.capacity(), 2);

    budget.set(1);
    v.push(3).unwrap();
    assert_eq!(v.as_slice(), &[1, 2, 3]);
    assert_eq!(v.capacity(), 5);
}

#[test]
fn shift_failure_leaves_vector_unchanged() {
    init_logger();

    let budget = Budget::new(1);
    let mut v = filled(&budget, 3, &[1, 2, 3]);

    assert!(v.shift(1, 4).is_err());
    assert_eq!(v.as_slice(), &[1, 2, 3]);

    // Removing never allocates.
    v.shift(0, -1).unwrap();
    assert_eq!(v.as_slice(), &[2, 3]);
}

#[test]
fn extend_failure_leaves_both_unchanged() {
    init_logger();

    let budget = Budget::new(2);
    let mut a = filled(&budget, 2, &[1, 2]);
    let mut b = filled(&budget, 2, &[3, 4]);

    assert!(a.extend(&mut b).is_err());
    assert_eq!(a.as_slice(), &[1, 2]);
    assert_eq!(b.as_slice(), &[3, 4]);

    assert!(a.concat(&b).is_err());
    assert!(a.concat_self().is_err());
    assert_eq!(a.as_slice(), &[1, 2]);
}

#[test]
fn resize_truncates_even_if_reallocation_fails() {
    init_logger();

    let (destructor, log) = recorder();
    let budget = Budget::new(1);
    let mut v = filled(&budget, 8, &[1, 2, 3, 4, 5]);
    v.set_destructor(Some(destructor));

    assert!(v.resize(2).is_err());
    assert_eq!(v.as_slice(), &[1, 2]);
    assert_eq!(v.capacity(), 8);
    assert_eq!(*log.borrow(), vec![3, 4, 5]);

    budget.set(1);
    v.resize(2).unwrap();
    assert_eq!(v.capacity(), 2);
    assert_eq!(*log.borrow(), vec![3, 4, 5]);
}

#[test]
fn filter_split_failure_is_atomic() {
    init_logger();

    let (destructor, log) = recorder();
    let budget = Budget::new(1);
    let mut v = filled(&budget, 6, &[1, 2, 3, 4, 5, 6]);
    v.set_destructor(Some(destructor));

    assert!(v.filter_split(|x| x % 2 == 0).is_err());
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5, 6]);
    assert!(log.borrow().is_empty());

    budget.set(1);
    let rejected = v.filter_split(|x| x % 2 == 0).unwrap();
    assert_eq!(v.as_slice(), &[2, 4, 6]);
    assert_eq!(rejected.as_slice(), &[1, 3, 5]);
    assert!(log.borrow().is_empty());
}

#[test]
fn derived_vector_failure() {
    init_logger();

    let budget = Budget::new(1);
    let v = filled(&budget, 4, &[1, 2, 3]);

    assert!(v.copy().is_err());
    assert!(v.slice(0, 2).is_err());
    assert!(v.rslice(0, 2).is_err());
    assert_eq!(v.as_slice(), &[1, 2, 3]);
}
