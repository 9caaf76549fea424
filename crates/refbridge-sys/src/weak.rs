//! Weak observation references
//!
//! A weak reference never keeps its target alive. It must be destroyed
//! with `fo_weak_destroy`.

use crate::object::Object;
use crate::{FoTypeRef, FoWeakRef};
use std::mem::ManuallyDrop;
use std::ptr;
use std::sync::{Arc, Weak};

/// Creates a weak reference to `obj`, or null if `obj` is null.
///
/// # Safety
///
/// `obj` must be null or a live object.
pub unsafe extern "C" fn fo_weak_create(obj: FoTypeRef) -> FoWeakRef {
    if obj.is_null() {
        return ptr::null_mut();
    }
    let strong = ManuallyDrop::new(Arc::from_raw(obj as *const Object));
    Box::into_raw(Box::new(Arc::downgrade(&strong))) as FoWeakRef
}

/// Returns an owned reference to the target, or null if it was destroyed.
///
/// # Safety
///
/// `weak` must be null or a live weak reference.
pub unsafe extern "C" fn fo_weak_copy_target(weak: FoWeakRef) -> FoTypeRef {
    match (weak as *const Weak<Object>).as_ref().and_then(Weak::upgrade) {
        Some(strong) => Arc::into_raw(strong) as FoTypeRef,
        None => ptr::null(),
    }
}

/// # Safety
///
/// `weak` must be null or a live weak reference.
pub unsafe extern "C" fn fo_weak_is_alive(weak: FoWeakRef) -> bool {
    (weak as *const Weak<Object>)
        .as_ref()
        .is_some_and(|w| w.strong_count() > 0)
}

/// # Safety
///
/// `weak` must be null or a weak reference not yet destroyed.
pub unsafe extern "C" fn fo_weak_destroy(weak: FoWeakRef) {
    if !weak.is_null() {
        drop(Box::from_raw(weak as *mut Weak<Object>));
    }
}
