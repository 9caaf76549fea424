//! UTF-8 string objects, immutable and mutable

use crate::object::{into_raw, object, Body, Kind, Object};
use crate::{byte_slice, FoIndex, FoTypeID, FoTypeRef};
use std::cell::UnsafeCell;
use std::ptr;

pub(crate) fn create(value: String, mutable: bool) -> FoTypeRef {
    let body = Body::String(UnsafeCell::new(value));
    into_raw(if mutable {
        Object::mutable(body)
    } else {
        Object::immutable(body)
    })
}

pub extern "C" fn fo_string_get_type_id() -> FoTypeID {
    Kind::String.type_id()
}

/// Creates an immutable string from UTF-8 bytes (owned).
///
/// Returns null when the bytes are not valid UTF-8.
///
/// # Safety
///
/// `bytes` must point to `len` readable bytes.
pub unsafe extern "C" fn fo_string_create_with_bytes(bytes: *const u8, len: FoIndex) -> FoTypeRef {
    match byte_slice(bytes, len).and_then(|b| std::str::from_utf8(b).ok()) {
        Some(s) => create(s.to_owned(), false),
        None => ptr::null(),
    }
}

/// Creates an empty mutable string (owned).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_string_create_mutable() -> FoTypeRef {
    create(String::new(), true)
}

/// Creates a mutable copy of any string (owned), or null if `string` is not
/// a string.
///
/// # Safety
///
/// `string` must be null or a live object.
pub unsafe extern "C" fn fo_string_create_mutable_copy(string: FoTypeRef) -> FoTypeRef {
    match object(string).and_then(|o| o.string()) {
        Some(s) => create(s.clone(), true),
        None => ptr::null(),
    }
}

/// Length in UTF-8 bytes; 0 for non-strings.
///
/// # Safety
///
/// `string` must be null or a live object.
pub unsafe extern "C" fn fo_string_get_length(string: FoTypeRef) -> FoIndex {
    object(string)
        .and_then(|o| o.string())
        .map_or(0, |s| s.len() as FoIndex)
}

/// Interior pointer to the UTF-8 bytes (borrowed). Valid until the string
/// is mutated or destroyed.
///
/// # Safety
///
/// `string` must be null or a live object; `out_len` must be writable.
pub unsafe extern "C" fn fo_string_get_bytes_ptr(string: FoTypeRef, out_len: *mut FoIndex) -> *const u8 {
    match object(string).and_then(|o| o.string()) {
        Some(s) if !out_len.is_null() => {
            *out_len = s.len() as FoIndex;
            s.as_ptr()
        }
        _ => ptr::null(),
    }
}

/// Appends UTF-8 bytes to a mutable string. Returns false for immutable
/// targets or invalid UTF-8.
///
/// # Safety
///
/// `string` must be null or a live object; `bytes` must point to `len`
/// readable bytes.
pub unsafe extern "C" fn fo_string_append_bytes(string: FoTypeRef, bytes: *const u8, len: FoIndex) -> bool {
    let Some(target) = object(string).and_then(|o| o.string_mut()) else {
        return false;
    };
    match byte_slice(bytes, len).and_then(|b| std::str::from_utf8(b).ok()) {
        Some(s) => {
            target.push_str(s);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fo_equal, fo_hash, fo_is_mutable, fo_release};

    #[test]
    fn test_invalid_utf8_fails() {
        let bytes = [0xffu8, 0xfe];
        unsafe {
            assert!(fo_string_create_with_bytes(bytes.as_ptr(), 2).is_null());
            assert!(fo_string_create_with_bytes(ptr::null(), 3).is_null());
            assert!(fo_string_create_with_bytes(bytes.as_ptr(), -1).is_null());
        }
    }

    #[test]
    fn test_mutable_append_and_compare() {
        unsafe {
            let m = fo_string_create_mutable();
            assert!(fo_is_mutable(m));
            assert!(fo_string_append_bytes(m, b"fo".as_ptr(), 2));
            assert!(fo_string_append_bytes(m, b"o".as_ptr(), 1));
            let s = fo_string_create_with_bytes(b"foo".as_ptr(), 3);
            assert!(!fo_is_mutable(s));
            assert!(fo_equal(m, s));
            assert_eq!(fo_hash(m), fo_hash(s));
            assert!(!fo_string_append_bytes(s, b"x".as_ptr(), 1));
            assert_eq!(fo_string_get_length(m), 3);
            fo_release(m);
            fo_release(s);
        }
    }
}
