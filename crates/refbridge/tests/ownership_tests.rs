//! Reference ownership tests
//!
//! Every wrap, clone, cast and drop must leave the foreign reference count
//! where the ownership convention says it should be.

mod common;

use common::*;
#[allow(unused_imports)]
use common::{assert_eq, assert_ne};
use refbridge::sys;
use refbridge::{
    Array, ForeignHandle, ForeignObject, ForeignString, ForeignType, MutableArray, Number,
};

// ============================================================================
// Wrapping
// ============================================================================

#[test]
fn test_retain_and_wrap_is_net_zero() {
    let owner = int(10);
    let before = owner.retain_count();
    {
        let wrapped = unsafe { Number::retain_and_wrap(owner.as_raw()) }.unwrap();
        assert_eq!(wrapped.retain_count(), before + 1);
    }
    assert_eq!(owner.retain_count(), before);
}

#[test]
fn test_adopt_consumes_the_owned_unit() {
    let raw = unsafe { sys::fo_number_create_i64(5) };
    let observer = unsafe { ForeignHandle::retain_and_wrap(raw) }.unwrap();
    assert_eq!(observer.retain_count(), 2);

    let adopted = unsafe { Number::adopt(raw) }.unwrap();
    assert_eq!(observer.retain_count(), 2);
    drop(adopted);
    assert_eq!(observer.retain_count(), 1);
}

#[test]
fn test_adopt_mismatch_releases() {
    let raw = unsafe { sys::fo_number_create_i64(5) };
    let observer = unsafe { ForeignHandle::retain_and_wrap(raw) }.unwrap();

    assert!(unsafe { Array::adopt(raw) }.is_none());
    assert_eq!(observer.retain_count(), 1);
}

#[test]
fn test_retain_and_wrap_mismatch_retains_nothing() {
    let number = int(5);
    assert!(unsafe { ForeignString::retain_and_wrap(number.as_raw()) }.is_none());
    assert_eq!(number.retain_count(), 1);
}

#[test]
fn test_null_is_absent_everywhere() {
    unsafe {
        assert!(Number::adopt(std::ptr::null()).is_none());
        assert!(Number::retain_and_wrap(std::ptr::null()).is_none());
        assert!(ForeignObject::retain_and_wrap(std::ptr::null()).is_none());
    }
}

#[test]
fn test_into_raw_then_adopt() {
    let number = int(8);
    let raw = number.into_handle().into_raw();
    let number = unsafe { Number::adopt(raw) }.unwrap();
    assert_eq!(number.retain_count(), 1);
    assert_eq!(number.to_i64(), Some(8));
}

// ============================================================================
// Clone and drop
// ============================================================================

#[test]
fn test_clone_retains_and_drop_releases() {
    let number = int(1);
    let clones: Vec<Number> = (0..4).map(|_| number.clone()).collect();
    assert_eq!(number.retain_count(), 5);
    drop(clones);
    assert_eq!(number.retain_count(), 1);
}

#[test]
fn test_upcast_moves_the_unit() {
    let array = MutableArray::new().unwrap();
    let observer = array.as_object();
    assert_eq!(observer.retain_count(), 2);

    let immutable: Array = array.into();
    assert_eq!(observer.retain_count(), 2);
    drop(immutable);
    assert_eq!(observer.retain_count(), 1);
}

// ============================================================================
// Ledger
// ============================================================================

#[test]
fn test_ledger_balances_after_scope() {
    let start = start_audit();
    {
        let array = heterogeneous_array();
        let copies: Vec<ForeignObject> = array.iter().collect();
        let strings: Vec<ForeignString> = array.iter().of_type().collect();
        assert_eq!(copies.len(), 3);
        assert_eq!(strings.len(), 1);
        let _ = array.get(0).and_then(|o| o.cast::<Number>());
    }
    assert_balanced_since(&start);
}

#[test]
fn test_ledger_counts_events() {
    let start = start_audit();
    let number = int(3);
    let copy = number.clone();
    let report = refbridge::audit::report().since(&start);
    assert_eq!(report.adopted, 1);
    assert_eq!(report.retained, 1);
    assert_eq!(report.live(), 2);
    drop(copy);
    drop(number);
    assert_balanced_since(&start);
}

#[test]
fn test_ledger_tracks_disowned_units() {
    let start = start_audit();
    let raw = int(3).into_handle().into_raw();
    let report = refbridge::audit::report().since(&start);
    assert_eq!(report.disowned, 1);
    assert!(report.is_balanced());
    drop(unsafe { ForeignHandle::adopt(raw) });
}

// ============================================================================
// Weak references
// ============================================================================

#[test]
fn test_weak_handle_does_not_keep_alive() {
    let number = int(77);
    let weak = number.as_handle().downgrade().unwrap();
    assert_eq!(number.retain_count(), 1);

    let strong = weak.upgrade().map(ForeignObject::new).unwrap();
    assert_eq!(strong.cast::<Number>().and_then(|n| n.to_i64()), Some(77));
    drop(strong);
    drop(number);
    assert!(!weak.is_alive());
    assert!(weak.upgrade().is_none());
}

// ============================================================================
// Threads
// ============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_immutable_scalars_cross_threads() {
    assert_send_sync::<Number>();
    assert_send_sync::<refbridge::Boolean>();
    assert_send_sync::<refbridge::Null>();
    assert_send_sync::<refbridge::Data>();

    let number = int(9);
    let shared = number.clone();
    let seen = std::thread::spawn(move || {
        let copy = shared.clone();
        copy.to_i64()
    })
    .join()
    .unwrap();

    assert_eq!(seen, Some(9));
    assert_eq!(number.retain_count(), 1);
}
