//! Ordered sequences, immutable and mutable
//!
//! Arrays retain their elements. Reads return borrowed references.

use crate::object::{index_of, into_raw, object, reaches, Body, Kind, Object, Retained};
use crate::{ref_slice, FoIndex, FoTypeID, FoTypeRef};
use std::cell::UnsafeCell;
use std::ptr;

fn create(elements: Vec<Retained>, mutable: bool) -> FoTypeRef {
    let body = Body::Array(UnsafeCell::new(elements));
    into_raw(if mutable {
        Object::mutable(body)
    } else {
        Object::immutable(body)
    })
}

/// Retains every reference in the slice; `None` if any is null.
pub(crate) unsafe fn retain_all(refs: &[FoTypeRef]) -> Option<Vec<Retained>> {
    if refs.iter().any(|r| r.is_null()) {
        return None;
    }
    Some(refs.iter().map(|&r| Retained::retain(r)).collect())
}

fn index(idx: FoIndex, len: usize) -> Option<usize> {
    usize::try_from(idx).ok().filter(|&i| i < len)
}

pub extern "C" fn fo_array_get_type_id() -> FoTypeID {
    Kind::Array.type_id()
}

/// Creates an immutable array of `count` values (owned). Returns null if
/// any value is null.
///
/// # Safety
///
/// `values` must point to `count` live references.
pub unsafe extern "C" fn fo_array_create(values: *const FoTypeRef, count: FoIndex) -> FoTypeRef {
    match ref_slice(values, count).and_then(|refs| retain_all(refs)) {
        Some(elements) => create(elements, false),
        None => ptr::null(),
    }
}

/// Creates an empty mutable array (owned).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_array_create_mutable(capacity: FoIndex) -> FoTypeRef {
    let capacity = usize::try_from(capacity).unwrap_or(0);
    create(Vec::with_capacity(capacity), true)
}

/// Creates a mutable copy of any array (owned), or null if `array` is not
/// an array.
///
/// # Safety
///
/// `array` must be null or a live object.
pub unsafe extern "C" fn fo_array_create_mutable_copy(array: FoTypeRef) -> FoTypeRef {
    match object(array).and_then(|o| o.array()) {
        Some(elements) => {
            let copy = elements.iter().map(|e| Retained::retain(e.as_raw())).collect();
            create(copy, true)
        }
        None => ptr::null(),
    }
}

/// # Safety
///
/// `array` must be null or a live object.
pub unsafe extern "C" fn fo_array_get_count(array: FoTypeRef) -> FoIndex {
    object(array)
        .and_then(|o| o.array())
        .map_or(0, |e| e.len() as FoIndex)
}

/// Element at `idx` (borrowed), or null when out of range.
///
/// # Safety
///
/// `array` must be null or a live object.
pub unsafe extern "C" fn fo_array_get_value_at_index(array: FoTypeRef, idx: FoIndex) -> FoTypeRef {
    let Some(elements) = object(array).and_then(|o| o.array()) else {
        return ptr::null();
    };
    match index(idx, elements.len()) {
        Some(i) => elements[i].as_raw(),
        None => ptr::null(),
    }
}

/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_array_contains_value(array: FoTypeRef, value: FoTypeRef) -> bool {
    object(array)
        .and_then(|o| o.array())
        .is_some_and(|e| index_of(e, value).is_some())
}

/// Appends `value` to a mutable array, retaining it. Fails if `value` is
/// or contains the array.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_array_append_value(array: FoTypeRef, value: FoTypeRef) -> bool {
    if value.is_null() || reaches(value, array) {
        return false;
    }
    match object(array).and_then(|o| o.array_mut()) {
        Some(elements) => {
            elements.push(Retained::retain(value));
            true
        }
        None => false,
    }
}

/// Inserts `value` before `idx` (`idx == count` appends). Fails if
/// `value` is or contains the array.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_array_insert_value_at_index(
    array: FoTypeRef,
    idx: FoIndex,
    value: FoTypeRef,
) -> bool {
    if value.is_null() || reaches(value, array) {
        return false;
    }
    let Some(elements) = object(array).and_then(|o| o.array_mut()) else {
        return false;
    };
    match index(idx, elements.len() + 1) {
        Some(i) => {
            elements.insert(i, Retained::retain(value));
            true
        }
        None => false,
    }
}

/// Replaces the element at `idx`, releasing the previous one. Fails if
/// `value` is or contains the array.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_array_set_value_at_index(
    array: FoTypeRef,
    idx: FoIndex,
    value: FoTypeRef,
) -> bool {
    if value.is_null() || reaches(value, array) {
        return false;
    }
    let Some(elements) = object(array).and_then(|o| o.array_mut()) else {
        return false;
    };
    match index(idx, elements.len()) {
        Some(i) => {
            // Retain before the old element is released; they may be the same object.
            elements[i] = Retained::retain(value);
            true
        }
        None => false,
    }
}

/// Removes and releases the element at `idx`.
///
/// # Safety
///
/// `array` must be null or a live object.
pub unsafe extern "C" fn fo_array_remove_value_at_index(array: FoTypeRef, idx: FoIndex) -> bool {
    let Some(elements) = object(array).and_then(|o| o.array_mut()) else {
        return false;
    };
    match index(idx, elements.len()) {
        Some(i) => {
            elements.remove(i);
            true
        }
        None => false,
    }
}

/// # Safety
///
/// `array` must be null or a live object.
pub unsafe extern "C" fn fo_array_remove_all_values(array: FoTypeRef) -> bool {
    match object(array).and_then(|o| o.array_mut()) {
        Some(elements) => {
            elements.clear();
            true
        }
        None => false,
    }
}
