//! Number objects (64-bit integer or double)

use crate::object::{into_raw, object, Body, Kind, Object};
use crate::{FoHashCode, FoTypeID, FoTypeRef};
use std::fmt;

// Bounds of the f64 range that converts to i64 without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

const NAN_HASH: FoHashCode = 0x7ff8_0000;

#[derive(Debug, Clone, Copy)]
pub(crate) enum NumberValue {
    Int(i64),
    Float(f64),
}

/// Converts `f` to i64 if the conversion is exact.
fn exact_i64(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

impl NumberValue {
    /// Numeric equality across representations. NaN equals NaN so that
    /// equality stays reflexive.
    pub(crate) fn equals(self, other: NumberValue) -> bool {
        match (self, other) {
            (NumberValue::Int(a), NumberValue::Int(b)) => a == b,
            (NumberValue::Float(a), NumberValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (NumberValue::Int(i), NumberValue::Float(f))
            | (NumberValue::Float(f), NumberValue::Int(i)) => exact_i64(f) == Some(i),
        }
    }

    pub(crate) fn hash_code(self) -> FoHashCode {
        match self {
            NumberValue::Int(i) => i as FoHashCode,
            NumberValue::Float(f) if f.is_nan() => NAN_HASH,
            NumberValue::Float(f) => match exact_i64(f) {
                Some(i) => i as FoHashCode,
                None => f.to_bits() as FoHashCode,
            },
        }
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int(i) => write!(f, "{}", i),
            NumberValue::Float(x) => write!(f, "{}", x),
        }
    }
}

unsafe fn number(obj: FoTypeRef) -> Option<NumberValue> {
    match object(obj)?.body {
        Body::Number(n) => Some(n),
        _ => None,
    }
}

pub extern "C" fn fo_number_get_type_id() -> FoTypeID {
    Kind::Number.type_id()
}

/// Creates an integer number (owned).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_number_create_i64(value: i64) -> FoTypeRef {
    into_raw(Object::immutable(Body::Number(NumberValue::Int(value))))
}

/// Creates a floating-point number (owned).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_number_create_f64(value: f64) -> FoTypeRef {
    into_raw(Object::immutable(Body::Number(NumberValue::Float(value))))
}

/// Whether the number is stored as a double.
///
/// # Safety
///
/// `num` must be null or a live object.
pub unsafe extern "C" fn fo_number_is_float(num: FoTypeRef) -> bool {
    matches!(number(num), Some(NumberValue::Float(_)))
}

/// Writes the value as i64. Returns false if `num` is not a number or the
/// conversion would lose information.
///
/// # Safety
///
/// `num` must be null or a live object; `out` must be writable.
pub unsafe extern "C" fn fo_number_get_i64(num: FoTypeRef, out: *mut i64) -> bool {
    let value = match number(num) {
        Some(NumberValue::Int(i)) => Some(i),
        Some(NumberValue::Float(f)) => exact_i64(f),
        None => None,
    };
    match (value, out.is_null()) {
        (Some(i), false) => {
            *out = i;
            true
        }
        _ => false,
    }
}

/// Writes the value as f64. Integers convert with rounding.
///
/// # Safety
///
/// `num` must be null or a live object; `out` must be writable.
pub unsafe extern "C" fn fo_number_get_f64(num: FoTypeRef, out: *mut f64) -> bool {
    let value = match number(num) {
        Some(NumberValue::Int(i)) => i as f64,
        Some(NumberValue::Float(f)) => f,
        None => return false,
    };
    if out.is_null() {
        return false;
    }
    *out = value;
    true
}
