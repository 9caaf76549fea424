//! Immutable byte buffers

use crate::object::{into_raw, object, Body, Kind, Object};
use crate::{byte_slice, FoIndex, FoTypeID, FoTypeRef};
use std::ptr;

unsafe fn bytes<'a>(data: FoTypeRef) -> Option<&'a Vec<u8>> {
    match &object(data)?.body {
        Body::Data(bytes) => Some(bytes),
        _ => None,
    }
}

pub extern "C" fn fo_data_get_type_id() -> FoTypeID {
    Kind::Data.type_id()
}

/// Creates a data object holding a copy of the bytes (owned).
///
/// # Safety
///
/// `bytes` must point to `len` readable bytes.
pub unsafe extern "C" fn fo_data_create(bytes: *const u8, len: FoIndex) -> FoTypeRef {
    match byte_slice(bytes, len) {
        Some(b) => into_raw(Object::immutable(Body::Data(b.to_vec()))),
        None => ptr::null(),
    }
}

/// # Safety
///
/// `data` must be null or a live object.
pub unsafe extern "C" fn fo_data_get_length(data: FoTypeRef) -> FoIndex {
    bytes(data).map_or(0, |b| b.len() as FoIndex)
}

/// Interior pointer to the bytes (borrowed).
///
/// # Safety
///
/// `data` must be null or a live object.
pub unsafe extern "C" fn fo_data_get_bytes_ptr(data: FoTypeRef) -> *const u8 {
    bytes(data).map_or(ptr::null(), |b| b.as_ptr())
}
